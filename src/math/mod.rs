//! Numerical kernels: point spacing, cumulative quadrature, and 1-D interpolation.

pub mod integrate;
pub mod interp;
pub mod spacing;

pub use integrate::*;
pub use interp::*;
pub use spacing::*;
