//! Solving many independent instances.
//!
//! Instances share nothing, so each one is an independent task. With the
//! `parallel` feature the tasks run on a dedicated rayon pool; results are
//! tagged with their instance index and returned in input order regardless
//! of completion order.

use crate::catalog::ResourceCatalog;
use crate::engine::StraightEngine;
use crate::error::Result;
use crate::observer::TracingObserver;
use crate::scanner::ScanConfig;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    threads: Option<usize>,
    config: ScanConfig,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a pool of exactly `threads` workers instead of one per hardware
    /// thread.
    ///
    /// # Panics
    /// Panics if `threads == 0`.
    pub fn with_threads(mut self, threads: usize) -> Self {
        assert!(threads > 0, "threads must be positive");
        self.threads = Some(threads);
        self
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    fn solve_one(&self, case: usize, catalog: &ResourceCatalog) -> (usize, Result<i64>) {
        let span = tracing::debug_span!("instance", case, resources = catalog.len());
        let _enter = span.enter();
        let result = StraightEngine::with_config(catalog, self.config)
            .map(|engine| engine.run_with(TracingObserver).longest);
        if let Err(ref err) = result {
            tracing::warn!(case, %err, "instance rejected");
        }
        (case, result)
    }

    fn in_order(mut tagged: Vec<(usize, Result<i64>)>) -> Vec<Result<i64>> {
        tagged.sort_unstable_by_key(|(case, _)| *case);
        tagged.into_iter().map(|(_, result)| result).collect()
    }
}

#[cfg(feature = "parallel")]
impl BatchRunner {
    /// Solve every instance, one task per instance, results in input order.
    pub fn run(&self, instances: &[ResourceCatalog]) -> Vec<Result<i64>> {
        let solve = || {
            instances
                .par_iter()
                .enumerate()
                .map(|(case, catalog)| self.solve_one(case, catalog))
                .collect::<Vec<_>>()
        };

        let tagged = match self.threads {
            None => solve(),
            Some(threads) => match rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
            {
                Ok(pool) => pool.install(solve),
                Err(err) => {
                    tracing::warn!(%err, threads, "falling back to the global pool");
                    solve()
                }
            },
        };
        Self::in_order(tagged)
    }
}

#[cfg(not(feature = "parallel"))]
impl BatchRunner {
    /// Solve every instance sequentially, results in input order.
    pub fn run(&self, instances: &[ResourceCatalog]) -> Vec<Result<i64>> {
        let tagged = instances
            .iter()
            .enumerate()
            .map(|(case, catalog)| self.solve_one(case, catalog))
            .collect();
        Self::in_order(tagged)
    }
}

/// Solve `instances` with the default runner.
pub fn solve_batch(instances: &[ResourceCatalog]) -> Vec<Result<i64>> {
    BatchRunner::new().run(instances)
}
