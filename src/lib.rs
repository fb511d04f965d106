//! `cosmo-curves` library crate.
//!
//! The binary (`cosmo`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the expansion-history engine is reusable from other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod observables;
pub mod plot;
pub mod report;
