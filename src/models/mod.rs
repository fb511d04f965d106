//! Model variants layered on the expansion-history engine.
//!
//! Variants are a tagged policy (`ModelKind`) over one engine type: the policy fixes
//! which equation-of-state parameters are free and which growth index applies.

pub mod best_fit;
pub mod growth;
pub mod variant;

pub use best_fit::*;
pub use growth::*;
pub use variant::*;
