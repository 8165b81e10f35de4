use std::time::Duration;

/// A snapshot of engine activity, returned by
/// [`Pathfinder::stats`](crate::Pathfinder::stats).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// A* searches actually run. Cache hits and short-circuits are not
    /// counted.
    pub total_paths_calculated: u64,
    /// Mean wall time of those searches, in milliseconds.
    pub average_path_time: f64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// `cache_hits / (cache_hits + cache_misses)`, or `0.0` before any
    /// lookup.
    pub cache_hit_rate: f64,
    pub active_cache_entries: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Counters {
    searches: u64,
    search_time: Duration,
    hits: u64,
    misses: u64,
}

impl Counters {
    pub(crate) fn record_search(&mut self, elapsed: Duration) {
        self.searches += 1;
        self.search_time += elapsed;
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn snapshot(&self, active_cache_entries: usize) -> Stats {
        let average_path_time = if self.searches == 0 {
            0.0
        } else {
            self.search_time.as_secs_f64() * 1000.0 / self.searches as f64
        };
        let lookups = self.hits + self.misses;
        let cache_hit_rate = if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        };
        Stats {
            total_paths_calculated: self.searches,
            average_path_time,
            cache_hits: self.hits,
            cache_misses: self.misses,
            cache_hit_rate,
            active_cache_entries,
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_zero_rates() {
        let s = Counters::default().snapshot(0);
        assert_eq!(s, Stats::default());
        assert_eq!(s.cache_hit_rate, 0.0);
    }

    #[test]
    fn averages_and_rates() {
        let mut c = Counters::default();
        c.record_search(Duration::from_millis(2));
        c.record_search(Duration::from_millis(4));
        c.record_hit();
        c.record_miss();
        c.record_miss();
        c.record_miss();
        let s = c.snapshot(5);
        assert_eq!(s.total_paths_calculated, 2);
        assert!((s.average_path_time - 3.0).abs() < 1e-9);
        assert_eq!(s.cache_hits, 1);
        assert_eq!(s.cache_misses, 3);
        assert!((s.cache_hit_rate - 0.25).abs() < 1e-12);
        assert_eq!(s.active_cache_entries, 5);

        c.reset();
        assert_eq!(c.snapshot(5).total_paths_calculated, 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn serializes_field_names() {
        let json = serde_json::to_value(Stats::default()).unwrap();
        assert_eq!(json["cache_hit_rate"], 0.0);
        assert_eq!(json["active_cache_entries"], 0);
    }
}
