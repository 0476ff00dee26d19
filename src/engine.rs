//! Engine facade: index once, scan on demand.
//!
//! [`StraightEngine`] owns the [`KeyIndex`] of one instance. Every run starts
//! from an empty matching, so repeated runs over the same engine (or an engine
//! rebuilt from the same catalog) report the same length.
//!
//! ```
//! use straight_match::{ResourceCatalog, StraightEngine};
//!
//! let dice = ResourceCatalog::from_values([
//!     vec![4, 8, 15, 16, 23, 42],
//!     vec![8, 6, 7, 5, 30, 9],
//!     vec![1, 2, 3, 4, 55, 6],
//!     vec![2, 10, 18, 36, 54, 86],
//! ]);
//! let engine = StraightEngine::new(&dice).unwrap();
//! assert_eq!(engine.longest_run(), 4);
//! ```

use crate::catalog::ResourceCatalog;
use crate::error::Result;
use crate::index::KeyIndex;
use crate::observer::{ScanObserver, TracingObserver};
use crate::scanner::{ScanConfig, ScanReport, WindowScanner};

pub struct StraightEngine {
    index: KeyIndex,
    config: ScanConfig,
}

impl StraightEngine {
    /// Index `catalog` with the default scan configuration.
    ///
    /// # Errors
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) if the catalog
    /// cannot be indexed.
    pub fn new(catalog: &ResourceCatalog) -> Result<Self> {
        Self::with_config(catalog, ScanConfig::default())
    }

    pub fn with_config(catalog: &ResourceCatalog, config: ScanConfig) -> Result<Self> {
        let index = KeyIndex::build(catalog)?;
        Ok(Self::from_index(index, config))
    }

    pub fn from_index(index: KeyIndex, config: ScanConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &KeyIndex {
        &self.index
    }

    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Scan with events forwarded to `tracing`.
    pub fn run(&self) -> ScanReport {
        self.run_with(TracingObserver)
    }

    /// Scan with a caller-supplied observer.
    pub fn run_with<O: ScanObserver>(&self, observer: O) -> ScanReport {
        WindowScanner::new(&self.index, self.config, observer).run()
    }

    /// Length of the longest run of consecutive values.
    pub fn longest_run(&self) -> i64 {
        self.run().longest
    }
}

/// Index and scan `catalog` in one go.
pub fn longest_straight(catalog: &ResourceCatalog) -> Result<i64> {
    Ok(StraightEngine::new(catalog)?.longest_run())
}
