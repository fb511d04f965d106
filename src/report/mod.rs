//! Reporting utilities: residual diagnostics, published comparison values, and
//! formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numerical code stays clean and testable
//! - output changes are localized

pub mod format;
pub mod published;
pub mod residuals;

pub use format::*;
pub use published::*;
pub use residuals::*;
