//! Input/output helpers.
//!
//! - curve and data exports (CSV/JSON) (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
