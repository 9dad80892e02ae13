//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` via `From`
//! where configuration checks bubble up.

use thiserror::Error;

use crate::Tick;

/// Errors raised while validating core values such as [`SimConfig`][crate::SimConfig].
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("tick {0} lies outside the simulated day")]
    OutOfDay(Tick),
}

/// Shorthand result type for `campus-core`.
pub type CoreResult<T> = Result<T, CoreError>;
