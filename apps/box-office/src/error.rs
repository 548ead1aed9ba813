//! # Box Office Errors
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Box Office                         │
//! │                                                                         │
//! │  ValidationError (seat count 0) ──┐                                    │
//! │  StoreError (poisoned lock) ──────┼──► ServiceError ──┐                │
//! │  CoreError (bad transition) ──────┘                   │                │
//! │                                                       ▼                │
//! │  ConfigError (bad TOML, bad ENCORE_*) ───────────► AppError ──► exit 1 │
//! │  serde_json / io ────────────────────────────────────┘                 │
//! │                                                                         │
//! │  NOT errors: no seats found, holdback veto (both → ABORTED),           │
//! │  cancelling an unknown reservation (no-op).                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use encore_core::{CoreError, PerformanceId, ValidationError};
use encore_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by [`crate::service::TheaterService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request itself is malformed.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Unknown performance: {0}")]
    UnknownPerformance(PerformanceId),

    #[error("Failed to render receipt: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
