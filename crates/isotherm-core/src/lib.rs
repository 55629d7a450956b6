//! Core types for the Isotherm numeric kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! addressing vocabulary shared by the host and the kernel: element-indexed
//! [`Series`] views, [`ScalarSlot`] result locations, the smoothing
//! [`Window`], and the [`KernelError`] taxonomy.
//!
//! # Units
//!
//! Every offset in this crate is an **element index** into the `f64` view
//! of the arena, never a byte offset. Hosts that think in bytes must go
//! through [`Series::from_byte_offset`] / [`ScalarSlot::from_byte_offset`],
//! which reject misaligned values instead of silently truncating them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod series;

pub use error::KernelError;
pub use series::{ScalarSlot, Series, Window, ELEMENT_BYTES};
