use chrono::{Datelike, Duration, Local, NaiveDate};
use eframe::egui::{self, Context, RichText, Ui};
use eframe::{App, Frame};
use tracing::info;

use crate::cache::CachedResolver;
use crate::catalog::PhaseCatalog;
use crate::grid::{days_in_month, resolve_month, MonthGrid};
use crate::resolver::{
    phase_for, CycleQuery, CycleSnapshot, DEFAULT_CYCLE_LENGTH, MAX_CYCLE_LENGTH,
    MIN_CYCLE_LENGTH,
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[month as usize - 1]
}

/// Journal text lives only in widget state; the save action acknowledges the
/// entry without writing it anywhere.
#[derive(Debug, Default)]
struct JournalEntry {
    draft: String,
    acknowledged: bool,
}

pub struct CycleSyncApp {
    catalog: PhaseCatalog,
    cycle_start: NaiveDate,
    cycle_length: u32,
    selected_date: Option<NaiveDate>,
    journal: JournalEntry,
    resolver: CachedResolver,
    today: NaiveDate,
}

impl CycleSyncApp {
    pub fn new(catalog: PhaseCatalog) -> Self {
        let today = Local::now().date_naive();
        let cycle_start = today - Duration::days(1);
        Self {
            catalog,
            cycle_start,
            cycle_length: DEFAULT_CYCLE_LENGTH,
            selected_date: None,
            journal: JournalEntry::default(),
            resolver: CachedResolver::new(cycle_start, DEFAULT_CYCLE_LENGTH),
            today,
        }
    }

    fn refresh_today(&mut self) {
        let now = Local::now().date_naive();
        if now != self.today {
            info!("local date rolled over to {}", now);
            self.today = now;
        }
    }

    fn render_header(&self, ui: &mut Ui) {
        ui.heading("CycleSync Pro");
        ui.label("Your Career Calendar for Every Cycle Phase");
    }

    fn render_inputs(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Day 1 of your cycle:");
            if date_field(ui, &mut self.cycle_start) {
                info!("cycle start set to {}", self.cycle_start);
            }
            ui.add_space(24.0);
            let slider = egui::Slider::new(
                &mut self.cycle_length,
                MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH,
            )
            .text("Cycle length (days)");
            if ui.add(slider).changed() {
                info!("cycle length set to {}", self.cycle_length);
            }
        });
    }

    fn render_phase_fields(&self, ui: &mut Ui, snapshot: CycleSnapshot) {
        let phase = snapshot.phase(&self.catalog);
        ui.label(format!("Phase: {}", phase.name));
        ui.label(format!("Hormonal Landscape: {}", phase.hormonal_landscape));
        ui.label(phase.behavior_insight);
        ui.label(RichText::new("Professional Strategies:").strong());
        for strategy in &phase.strategies {
            ui.label(format!("• {}", strategy));
        }
    }

    fn render_today_panel(&self, ui: &mut Ui) {
        let query = CycleQuery::today(self.cycle_start, self.cycle_length);
        let snapshot = self.resolver.resolve(query, &self.catalog);
        ui.label(RichText::new(format!("Today is Cycle Day {}", snapshot.cycle_day)).strong());
        self.render_phase_fields(ui, snapshot);
    }

    fn render_month_grid(&mut self, ui: &mut Ui) {
        let grid = MonthGrid::for_date(self.today);
        let cells = resolve_month(
            &grid,
            self.cycle_start,
            self.cycle_length,
            &self.catalog,
            &self.resolver,
        );

        ui.heading(format!("{} {}", month_name(grid.month), grid.year));
        egui::Grid::new("month_grid")
            .spacing([4.0, 4.0])
            .min_col_width(28.0)
            .show(ui, |ui| {
                for weekday in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
                    ui.label(weekday);
                }
                ui.end_row();

                let mut column = 0;
                for _ in 0..grid.leading_blanks {
                    ui.label("");
                    column += 1;
                }
                for cell in &cells {
                    let selected = self.selected_date == Some(cell.date);
                    let response = ui
                        .selectable_label(selected, format!("{:>2}", cell.date.day()))
                        .on_hover_text(phase_for(cell.snapshot.cycle_day, &self.catalog).name);
                    if response.clicked() {
                        self.selected_date = Some(cell.date);
                        info!(
                            "selected {} (cycle day {})",
                            cell.date, cell.snapshot.cycle_day
                        );
                    }
                    column += 1;
                    if column == 7 {
                        ui.end_row();
                        column = 0;
                    }
                }
            });

        if let Some(date) = self.selected_date {
            let query = CycleQuery::new(self.cycle_start, self.cycle_length, date);
            let snapshot = self.resolver.resolve(query, &self.catalog);
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!(
                    "{} is Cycle Day {}",
                    date.format("%Y-%m-%d"),
                    snapshot.cycle_day
                ))
                .strong(),
            );
            self.render_phase_fields(ui, snapshot);
        }
    }

    fn render_journal(&mut self, ui: &mut Ui) {
        ui.heading("Energy Log");
        let editor = egui::TextEdit::multiline(&mut self.journal.draft)
            .hint_text("Journal your energy/mood/work notes for today")
            .desired_rows(6)
            .desired_width(f32::INFINITY);
        if ui.add(editor).changed() {
            self.journal.acknowledged = false;
        }
        if ui.button("Save Entry").clicked() {
            self.journal.acknowledged = true;
            info!(
                "journal entry acknowledged ({} chars); entries are not persisted",
                self.journal.draft.len()
            );
        }
        if self.journal.acknowledged {
            ui.label("Entry saved! (In a real app, this would persist to a database)");
        }
    }

    fn render_metrics(&self, ui: &mut Ui) {
        ui.collapsing("Lookup metrics", |ui| {
            ui.monospace(self.resolver.metrics().report());
        });
    }
}

impl App for CycleSyncApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.refresh_today();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_header(ui);
                ui.separator();
                self.render_inputs(ui);
                ui.separator();
                self.render_today_panel(ui);
                ui.separator();
                self.render_month_grid(ui);
                ui.separator();
                self.render_journal(ui);
                if cfg!(debug_assertions) {
                    ui.add_space(12.0);
                    self.render_metrics(ui);
                }
            });
        });
    }
}

/// Year/month/day drag fields editing a single date in place.
fn date_field(ui: &mut Ui, date: &mut NaiveDate) -> bool {
    let mut year = date.year();
    let mut month = date.month();
    let mut day = date.day();
    let mut changed = false;
    ui.horizontal(|ui| {
        changed |= ui
            .add(egui::DragValue::new(&mut year).clamp_range(1970..=2100))
            .changed();
        changed |= ui
            .add(egui::DragValue::new(&mut month).clamp_range(1..=12))
            .changed();
        changed |= ui
            .add(egui::DragValue::new(&mut day).clamp_range(1..=31))
            .changed();
    });
    if changed {
        // Stepping the month can leave the day past the new month's end.
        let day = day.min(days_in_month(year, month));
        if let Some(edited) = NaiveDate::from_ymd_opt(year, month, day) {
            *date = edited;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
    }

    #[test]
    fn test_new_app_defaults() {
        let app = CycleSyncApp::new(PhaseCatalog::career_default().unwrap());
        let today = Local::now().date_naive();
        assert_eq!(app.cycle_start, today - Duration::days(1));
        assert_eq!(app.cycle_length, DEFAULT_CYCLE_LENGTH);
        assert!(app.selected_date.is_none());
        assert!(app.journal.draft.is_empty());
        assert!(!app.journal.acknowledged);
    }
}
