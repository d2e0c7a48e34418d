use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use lru::LruCache;
use parking_lot::RwLock;

use crate::catalog::PhaseCatalog;
use crate::resolver::{CycleQuery, CycleSnapshot};

const CACHE_CAPACITY: usize = 128;

/// Lookup counters for the debug panel.
#[derive(Debug, Default)]
pub struct Metrics {
    lookups: AtomicU64,
    cache_hits: AtomicU64,
}

impl Metrics {
    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> String {
        format!(
            "lookups: {}\ncache hits: {}",
            self.lookups(),
            self.cache_hits()
        )
    }
}

/// Per-date snapshot cache. Entries are only meaningful for the
/// (cycle start, cycle length) pair they were resolved under, so a parameter
/// change rolls the generation and drops everything.
struct SnapshotCache {
    entries: LruCache<NaiveDate, CycleSnapshot>,
    generation: (NaiveDate, u32),
}

impl SnapshotCache {
    fn new(cycle_start: NaiveDate, cycle_length: u32) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(CACHE_CAPACITY).unwrap()),
            generation: (cycle_start, cycle_length),
        }
    }

    fn roll_generation(&mut self, cycle_start: NaiveDate, cycle_length: u32) {
        let generation = (cycle_start, cycle_length);
        if self.generation != generation {
            self.entries.clear();
            self.generation = generation;
        }
    }
}

/// Shared resolution handle; the app and the month-grid precompute both go
/// through it so every grid cell costs one cache probe per frame.
#[derive(Clone)]
pub struct CachedResolver {
    cache: Arc<RwLock<SnapshotCache>>,
    metrics: Arc<Metrics>,
}

impl CachedResolver {
    pub fn new(cycle_start: NaiveDate, cycle_length: u32) -> Self {
        Self {
            cache: Arc::new(RwLock::new(SnapshotCache::new(cycle_start, cycle_length))),
            metrics: Arc::new(Metrics::default()),
        }
    }

    pub fn resolve(&self, query: CycleQuery, catalog: &PhaseCatalog) -> CycleSnapshot {
        self.metrics.record_lookup();
        {
            let mut cache = self.cache.write();
            cache.roll_generation(query.cycle_start, query.cycle_length);
            if let Some(snapshot) = cache.entries.get(&query.target_date) {
                self.metrics.record_hit();
                return *snapshot;
            }
        }
        let snapshot = query.resolve(catalog);
        self.cache.write().entries.put(query.target_date, snapshot);
        snapshot
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::cycle_day_for;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_repeat_lookup_hits_cache() {
        let catalog = PhaseCatalog::career_default().unwrap();
        let start = date(2024, 1, 1);
        let resolver = CachedResolver::new(start, 28);
        let query = CycleQuery::new(start, 28, date(2024, 1, 20));

        let first = resolver.resolve(query, &catalog);
        let second = resolver.resolve(query, &catalog);

        assert_eq!(first, second);
        assert_eq!(resolver.metrics().lookups(), 2);
        assert_eq!(resolver.metrics().cache_hits(), 1);
    }

    #[test]
    fn test_parameter_change_invalidates() {
        let catalog = PhaseCatalog::career_default().unwrap();
        let start = date(2024, 1, 1);
        let target = date(2024, 2, 4);
        let resolver = CachedResolver::new(start, 28);

        let short = resolver.resolve(CycleQuery::new(start, 28, target), &catalog);
        let long = resolver.resolve(CycleQuery::new(start, 40, target), &catalog);

        // Stale 28-day entry must not answer the 40-day query.
        assert_eq!(short.cycle_day, cycle_day_for(start, target, 28));
        assert_eq!(long.cycle_day, cycle_day_for(start, target, 40));
        assert_eq!(resolver.metrics().cache_hits(), 0);
    }

    #[test]
    fn test_cached_result_matches_direct_resolve() {
        let catalog = PhaseCatalog::career_default().unwrap();
        let start = date(2024, 3, 10);
        let resolver = CachedResolver::new(start, 30);
        for offset in 0..40 {
            let target = start + chrono::Duration::days(offset);
            let query = CycleQuery::new(start, 30, target);
            assert_eq!(resolver.resolve(query, &catalog), query.resolve(&catalog));
        }
    }
}
