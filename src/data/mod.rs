//! Fixed observational datasets used as comparison targets.

pub mod compilation;

pub use compilation::*;
