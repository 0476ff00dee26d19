//! Longest consecutive runs by incremental bipartite matching.
//!
//! Given a set of *resources* (dice), each offering a fixed set of integer
//! *values* (faces), this crate finds the longest run of consecutive values
//! such that every value in the run is backed by a different resource.
//!
//! ## Core idea
//! 1. [`KeyIndex`] sorts the distinct values and records, for each, which
//!    resources offer it.
//! 2. A two-pointer window slides over the sorted values. Extending the window
//!    needs one more resource; if none of the new value's candidates is free,
//!    an augmenting-path search reshuffles resources already committed to the
//!    window instead of recomputing the matching from scratch.
//! 3. When no reshuffle helps, the window gives up its leftmost value and tries
//!    again; a gap in the values refounds the window.
//!
//! The matching is maintained incrementally, so the whole scan is linear in the
//! number of values plus the cost of the augmenting searches.
//!
//! ## Quick start
//! ```
//! use straight_match::{ResourceCatalog, StraightEngine};
//!
//! let dice = ResourceCatalog::from_values([
//!     vec![1, 2, 3, 4, 5, 6],
//!     vec![1, 2, 3, 4, 5, 6],
//!     vec![1, 4, 2, 6, 5, 3],
//! ]);
//! let engine = StraightEngine::new(&dice).unwrap();
//! assert_eq!(engine.longest_run(), 3);
//! ```
//!
//! Independent instances can be solved together with [`BatchRunner`], which
//! runs one task per instance on a rayon pool when the `parallel` feature is
//! enabled.

pub mod assignment;
pub mod augment;
pub mod batch;
pub mod builder;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod index;
pub mod input;
pub mod observer;
pub mod scanner;
pub mod utils;

pub use crate::batch::{solve_batch, BatchRunner};
pub use crate::builder::StraightEngineBuilder;
pub use crate::catalog::{Resource, ResourceCatalog, ResourceId};
pub use crate::engine::{longest_straight, StraightEngine};
pub use crate::error::{Error, Result};
pub use crate::index::KeyIndex;
pub use crate::observer::{NoopObserver, ScanEvent, ScanObserver, TracingObserver};
pub use crate::scanner::{ScanConfig, ScanReport, ScanStats};
