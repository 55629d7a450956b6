//! Isotherm: a numeric kernel for smoothing and trending sample series that
//! live in a shared, element-indexed `f64` arena.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Isotherm sub-crates. Hosts that load the kernel as a C library use
//! `isotherm-ffi` instead.
//!
//! # Quick start
//!
//! ```rust
//! use isotherm::prelude::*;
//!
//! let mut arena = Arena::with_capacity(16);
//! let temps = Series::new(0, 5);
//! arena.write_series(temps, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//!
//! let mut view = arena.view();
//! ops::moving_average(&mut view, temps, Window::new(3).unwrap()).unwrap();
//! assert_eq!(view.read_series(temps).unwrap(), &[1.0, 1.5, 2.0, 3.0, 4.0]);
//!
//! let report = analyze(&mut arena, &[5.0, 7.0, 9.0, 11.0], &AnalysisConfig::default()).unwrap();
//! assert_eq!(report.mean(), 8.0);
//! assert!(report.fit.is_some());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `isotherm-core` | `Series`, `ScalarSlot`, `Window`, `KernelError` |
//! | [`arena`] | `isotherm-arena` | Arena storage, views, layouts, config |
//! | [`kernel`] | `isotherm-kernel` | Algorithms, arena entry points, analysis pipeline |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Element-indexed addressing types and the kernel error (`isotherm-core`).
pub use isotherm_core as types;

/// Arena storage, bounds-checked views and layout planning (`isotherm-arena`).
///
/// [`arena::Arena`] owns its storage; [`arena::ArenaView`] borrows storage
/// owned by someone else.
pub use isotherm_arena as arena;

/// Moving average, statistics and regression (`isotherm-kernel`).
///
/// Slice-level algorithms live at the crate root; arena-addressed entry
/// points live in [`kernel::ops`].
pub use isotherm_kernel as kernel;

/// Common imports for typical Isotherm usage.
///
/// ```rust
/// use isotherm::prelude::*;
/// ```
pub mod prelude {
    // Addressing and errors
    pub use isotherm_core::{KernelError, ScalarSlot, Series, Window};

    // Storage
    pub use isotherm_arena::{Arena, ArenaConfig, ArenaError, ArenaView, Layout};

    // Kernel
    pub use isotherm_kernel::ops;
    pub use isotherm_kernel::{
        analyze, AnalysisConfig, AnalysisError, Fit, Summary, TrendReport,
    };
}
