use chrono::{Local, NaiveDate};

use crate::catalog::{PhaseCatalog, PhaseRecord};

pub const MIN_CYCLE_LENGTH: u32 = 20;
pub const MAX_CYCLE_LENGTH: u32 = 40;
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// 1-based day index of `target_date` within a repeating cycle anchored at
/// `cycle_start`, so the start date itself is day 1.
///
/// `%` truncates toward zero in Rust, which would go non-positive for target
/// dates before the start; the remainder is renormalized so the result always
/// lands in [1, cycle_length].
pub fn cycle_day_for(cycle_start: NaiveDate, target_date: NaiveDate, cycle_length: u32) -> u32 {
    let length = i64::from(cycle_length.max(1));
    let delta = (target_date - cycle_start).num_days() + 1;
    ((((delta - 1) % length + length) % length) + 1) as u32
}

/// Index of the first phase in catalog order whose day set contains `day`.
/// Days past the covered range map to the first phase.
pub fn phase_index_for(day: u32, catalog: &PhaseCatalog) -> usize {
    catalog
        .phases()
        .iter()
        .position(|phase| phase.covers(day))
        .unwrap_or(0)
}

/// First phase in catalog order whose day set contains `day`, falling back to
/// the catalog's first phase for uncovered days.
pub fn phase_for(day: u32, catalog: &PhaseCatalog) -> &PhaseRecord {
    catalog
        .phases()
        .iter()
        .find(|phase| phase.covers(day))
        .unwrap_or_else(|| catalog.first())
}

/// One lookup's worth of input. Constructed fresh per lookup, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleQuery {
    pub cycle_start: NaiveDate,
    pub cycle_length: u32,
    pub target_date: NaiveDate,
}

impl CycleQuery {
    pub fn new(cycle_start: NaiveDate, cycle_length: u32, target_date: NaiveDate) -> Self {
        debug_assert!(
            (MIN_CYCLE_LENGTH..=MAX_CYCLE_LENGTH).contains(&cycle_length),
            "cycle length {} outside selector range",
            cycle_length
        );
        Self {
            cycle_start,
            cycle_length,
            target_date,
        }
    }

    /// Query for the current local date.
    pub fn today(cycle_start: NaiveDate, cycle_length: u32) -> Self {
        Self::new(cycle_start, cycle_length, Local::now().date_naive())
    }

    pub fn resolve(&self, catalog: &PhaseCatalog) -> CycleSnapshot {
        let cycle_day = cycle_day_for(self.cycle_start, self.target_date, self.cycle_length);
        CycleSnapshot {
            cycle_day,
            phase_index: phase_index_for(cycle_day, catalog),
        }
    }
}

/// Resolved result for one date: the cycle day plus which catalog phase it
/// landed in. The record itself is borrowed from the catalog at display time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSnapshot {
    pub cycle_day: u32,
    pub phase_index: usize,
}

impl CycleSnapshot {
    pub fn phase<'a>(&self, catalog: &'a PhaseCatalog) -> &'a PhaseRecord {
        &catalog.phases()[self.phase_index]
    }
}
