//! Shared memory arena and bounds-checked addressing for Isotherm.
//!
//! The arena is a flat run of `f64` elements. The host owns it: it decides
//! the capacity, writes inputs, and reads results back. The kernel only ever
//! sees an [`ArenaView`], a borrowed window over memory it did not allocate.
//!
//! ```text
//! Arena (host-owned, growable Vec<f64>)
//! └── ArenaView<'a> (&'a mut [f64], what the kernel operates on)
//!     ├── Series { offset, len }  → &[f64] / &mut [f64] after bounds check
//!     └── ScalarSlot { offset }   → single f64 after bounds check
//! Layout (host-side planner: names → Series / ScalarSlot)
//! ```
//!
//! Every address is validated once, at the view boundary. Algorithm code
//! downstream works on plain slices and never sees a raw offset.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod layout;
pub mod view;

pub use arena::Arena;
pub use config::{ArenaConfig, ConfigError};
pub use error::ArenaError;
pub use layout::{Layout, LayoutBuilder, Region};
pub use view::ArenaView;
