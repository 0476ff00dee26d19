//! Two-pointer window scan over the [`KeyIndex`].
//!
//! The window `[begin, end)` always covers consecutive values, each matched to
//! a distinct resource. The scanner grows `end` one key at a time, asking the
//! [`AssignmentState`] for a free candidate and falling back to the
//! [`AugmentingSearch`] when every candidate is taken. When neither works the
//! current run is over: `begin` advances by one and its resource is released,
//! leaving the rest of the matching in place for the next attempt. A gap in the
//! values refounds the window at the gap, releasing everything before it.

use crate::assignment::AssignmentState;
use crate::augment::{AugmentingSearch, SearchStats};
use crate::index::KeyIndex;
use crate::observer::{ScanEvent, ScanObserver};
use crate::utils::theoretical_ceiling;

/// Knobs for a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Stop as soon as the best run reaches the theoretical ceiling.
    pub early_exit: bool,
    /// Check matching and window invariants after every step, panicking on
    /// the first violation.
    pub validate: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            early_exit: true,
            validate: false,
        }
    }
}

/// Counters describing how a scan went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub windows_opened: u64,
    /// Keys bound to a candidate that was already free.
    pub direct_assignments: u64,
    /// Keys bound to a candidate freed by an augmenting search.
    pub augmented_assignments: u64,
    /// Extensions that found no resource at all.
    pub blocked: u64,
    pub gap_restarts: u64,
    pub early_exit: bool,
    pub search: SearchStats,
}

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Length of the longest run of consecutive values backed by distinct
    /// resources.
    pub longest: i64,
    pub stats: ScanStats,
}

/// Drives one scan of one instance. Consumed by [`run`](Self::run).
pub struct WindowScanner<'a, O: ScanObserver> {
    index: &'a KeyIndex,
    state: AssignmentState,
    search: AugmentingSearch,
    observer: O,
    config: ScanConfig,
    stats: ScanStats,
}

impl<'a, O: ScanObserver> WindowScanner<'a, O> {
    pub fn new(index: &'a KeyIndex, config: ScanConfig, observer: O) -> Self {
        Self {
            index,
            state: AssignmentState::new(index),
            search: AugmentingSearch::new(index.resource_count()),
            observer,
            config,
            stats: ScanStats::default(),
        }
    }

    /// Scan every window and return the longest run.
    ///
    /// # Panics
    /// With [`ScanConfig::validate`] set, panics if the matching ever stops
    /// being a bijection between the window and its resources.
    pub fn run(mut self) -> ScanReport {
        let index = self.index;
        let n = index.len();
        let resources = index.resource_count();

        let span = tracing::debug_span!("scan", values = n, resources);
        let _enter = span.enter();

        let mut best = 1usize;
        let mut begin = 0usize;
        let mut end = 0usize;

        while begin + 1 < n {
            if end <= begin {
                end = begin + 1;
            }
            self.state.open_window(begin, end);
            self.state.assign_default(index, begin);
            self.stats.windows_opened += 1;
            self.observer.record(&ScanEvent::WindowOpened {
                begin,
                value: index.value(begin),
            });
            self.validate(begin, end);

            let base = index.value(begin);
            let ceiling = theoretical_ceiling(n - begin, resources);
            let mut next_begin = begin + 1;

            while end < n {
                let value = index.value(end);
                if base.checked_add((end - begin) as i64) != Some(value) {
                    next_begin = end;
                    self.stats.gap_restarts += 1;
                    self.observer
                        .record(&ScanEvent::GapRestart { key: end, value });
                    break;
                }

                let Some((slot, augmented)) = self.claim(end) else {
                    self.stats.blocked += 1;
                    self.observer.record(&ScanEvent::Blocked {
                        begin,
                        key: end,
                        value,
                    });
                    break;
                };
                self.state.bind(end, slot);
                self.state.extend_window();
                self.observer.record(&ScanEvent::Extended {
                    key: end,
                    value,
                    slot,
                    augmented,
                });
                end += 1;
                self.validate(begin, end);

                if end - begin > best {
                    best = end - begin;
                    self.observer
                        .record(&ScanEvent::NewBest { length: best, begin });
                }
                if self.config.early_exit && best >= ceiling {
                    break;
                }
            }

            if self.config.early_exit && best >= ceiling {
                self.stats.early_exit = true;
                self.observer.record(&ScanEvent::EarlyExit {
                    length: best,
                    ceiling,
                });
                break;
            }

            for key in begin..next_begin {
                self.state.release(key);
            }
            begin = next_begin;
        }

        self.stats.search = self.search.stats();
        self.observer.record(&ScanEvent::Finished { longest: best });

        ScanReport {
            longest: best as i64,
            stats: self.stats,
        }
    }

    /// Find a resource for `key`: a free candidate if there is one, otherwise
    /// whatever the augmenting search can free up.
    fn claim(&mut self, key: usize) -> Option<(usize, bool)> {
        if let Some(slot) = self.state.find_free_resource(self.index, key) {
            self.stats.direct_assignments += 1;
            return Some((slot, false));
        }
        let slot = self
            .search
            .find_unused_by_shuffling(self.index, &mut self.state, key)?;
        self.stats.augmented_assignments += 1;
        Some((slot, true))
    }

    fn validate(&self, begin: usize, end: usize) {
        debug_assert!(begin < end && end <= self.index.len());
        debug_assert_eq!(self.state.window(), begin..end);
        if !self.config.validate {
            return;
        }
        if let Err(err) = self.state.check_invariants() {
            panic!("{err}");
        }
        for key in begin..end {
            assert!(
                self.state.is_active(key),
                "key {key} inside window [{begin}, {end}) holds no resource"
            );
        }
        assert_eq!(
            self.state.active_count(),
            end - begin,
            "resources held outside window [{begin}, {end})"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResourceCatalog;
    use crate::observer::NoopObserver;

    fn scan(sets: &[&[i64]], config: ScanConfig) -> ScanReport {
        let catalog = ResourceCatalog::from_values(sets.iter().map(|s| s.to_vec()));
        let index = KeyIndex::build(&catalog).unwrap();
        WindowScanner::new(&index, config, NoopObserver).run()
    }

    const CHECKED: ScanConfig = ScanConfig {
        early_exit: true,
        validate: true,
    };

    #[test]
    fn single_value_is_length_one() {
        let report = scan(&[&[7, 7]], CHECKED);
        assert_eq!(report.longest, 1);
        assert_eq!(report.stats.windows_opened, 0);
    }

    #[test]
    fn gap_refounds_window() {
        // 1,2 then a gap, then 10,11,12.
        let report = scan(&[&[1, 10], &[2, 11], &[12, 30], &[5, 6]], CHECKED);
        assert_eq!(report.longest, 3);
        assert!(report.stats.gap_restarts >= 1);
    }

    #[test]
    fn blocked_run_advances_begin() {
        // 1..=3 on three resources, but 4 only on the resource 1 needs.
        let report = scan(&[&[1, 4], &[2], &[3], &[9]], CHECKED);
        assert_eq!(report.longest, 3);
        assert_eq!(report.stats.blocked, 1);
    }

    #[test]
    fn early_exit_stops_at_ceiling() {
        let report = scan(&[&[1, 2, 3], &[2, 3, 4], &[3, 4, 5]], CHECKED);
        assert_eq!(report.longest, 3);
        assert!(report.stats.early_exit);
        assert_eq!(report.stats.windows_opened, 1);
    }

    #[test]
    fn without_early_exit_scans_everything() {
        let config = ScanConfig {
            early_exit: false,
            validate: true,
        };
        let report = scan(&[&[1, 2, 3], &[2, 3, 4], &[3, 4, 5]], config);
        assert_eq!(report.longest, 3);
        assert!(!report.stats.early_exit);
        assert!(report.stats.windows_opened > 1);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let report = scan(&[&[i64::MIN, i64::MAX], &[i64::MAX - 1]], CHECKED);
        assert_eq!(report.longest, 2);
    }
}
