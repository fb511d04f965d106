//! The shared redshift grid every expansion history is tabulated on.

pub mod redshift;

pub use redshift::*;
