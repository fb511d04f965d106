//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - model selection and observable enums (`ModelKind`, `Observable`)
//! - scalar cosmological parameters (`ModelParameters`) and their memo key
//! - evaluation outputs (`CurvePoint`, `ModelCurve`, `CurveFile`)
//! - runtime configuration (`EvalConfig`)

pub mod types;

pub use types::*;
