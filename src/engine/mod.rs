//! Expansion-history engine and its memoizing cache.
//!
//! Responsibilities:
//!
//! - tabulate `H(z)` on the shared grid and integrate `1/H` (`expansion`)
//! - keep one immutable engine per distinct parameter tuple (`cache`)

pub mod cache;
pub mod expansion;

pub use cache::*;
pub use expansion::*;
