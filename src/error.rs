//! Error types.
//!
//! - `CosmoError`: library-level failures (parameter validation, interpolation domain,
//!   numerical breakdown). Deterministic functions of the inputs; never retried.
//! - `AppError`: what the `cosmo` binary reports (exit code + message).

use thiserror::Error;

/// Result alias for the numerical core.
pub type CosmoResult<T> = Result<T, CosmoError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CosmoError {
    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },
    #[error("z={z} is outside the interpolation domain [{min}, {max}]")]
    InterpolationDomain { z: f64, min: f64, max: f64 },
    #[error("{name} is not finite at z={z}")]
    NonFiniteObservable { name: &'static str, z: f64 },
    #[error("invalid redshift grid: {reason}")]
    InvalidGrid { reason: String },
    #[error("invalid dataset '{probe}': {reason}")]
    InvalidDataset { probe: &'static str, reason: String },
    #[error("invalid evaluation range: {reason}")]
    InvalidRange { reason: String },
}

impl CosmoError {
    pub fn invalid_parameters(reason: impl Into<String>) -> Self {
        CosmoError::InvalidParameters {
            reason: reason.into(),
        }
    }

    /// Exit code used when this error terminates the CLI.
    ///
    /// Bad user input maps to 2, numerical/domain failures to 4.
    pub fn exit_code(&self) -> u8 {
        match self {
            CosmoError::InvalidParameters { .. } | CosmoError::InvalidRange { .. } => 2,
            CosmoError::InterpolationDomain { .. }
            | CosmoError::NonFiniteObservable { .. }
            | CosmoError::InvalidGrid { .. }
            | CosmoError::InvalidDataset { .. } => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CosmoError> for AppError {
    fn from(err: CosmoError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
