use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;

use crate::cache::CachedResolver;
use crate::catalog::PhaseCatalog;
use crate::resolver::{CycleQuery, CycleSnapshot};

/// Number of days in a Gregorian month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };
    (next - first).num_days() as u32
}

/// One button cell in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub snapshot: CycleSnapshot,
}

/// The displayed calendar month, laid out for a Monday-first week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 in the first week row.
    pub leading_blanks: u32,
    pub days: u32,
}

impl MonthGrid {
    pub fn for_date(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap();
        Self {
            year: date.year(),
            month: date.month(),
            leading_blanks: first.weekday().num_days_from_monday(),
            days: days_in_month(date.year(), date.month()),
        }
    }

    pub fn date_of(&self, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap()
    }
}

/// Resolves every day of the grid's month in one parallel pass, in day order.
pub fn resolve_month(
    grid: &MonthGrid,
    cycle_start: NaiveDate,
    cycle_length: u32,
    catalog: &PhaseCatalog,
    resolver: &CachedResolver,
) -> Vec<DayCell> {
    (1..=grid.days)
        .into_par_iter()
        .map(|day| {
            let date = grid.date_of(day);
            let query = CycleQuery::new(cycle_start, cycle_length, date);
            DayCell {
                date,
                snapshot: resolver.resolve(query, catalog),
            }
        })
        .collect()
}
