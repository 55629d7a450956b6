//! Numeric kernel for Isotherm.
//!
//! Three operations over a time series of `f64` samples:
//!
//! - [`smoothing`]: trailing-window moving average
//! - [`stats`]: arithmetic mean and summary statistics
//! - [`regression`]: ordinary least-squares line fit
//!
//! Each is a pure function over slices. The [`ops`] module is the
//! arena-facing layer: it resolves [`Series`](isotherm_core::Series) and
//! [`ScalarSlot`](isotherm_core::ScalarSlot) addresses against an
//! [`ArenaView`](isotherm_arena::ArenaView), validates everything up front,
//! and only then computes and writes. A failed call never touches the arena.
//!
//! [`analysis`] strings the operations together the way a host loading a
//! temperature series does: smooth, summarise, fit a trend.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod ops;
pub mod regression;
pub mod smoothing;
pub mod stats;

pub use analysis::{analyze, AnalysisConfig, AnalysisError, TrendReport};
pub use regression::{linear_regression, Fit};
pub use smoothing::{moving_average, moving_average_in_place};
pub use stats::{mean, summary, Summary};
