//! Error types for plan-integrity
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures are carried as a [`Violation`] so callers can still get at the
//! single user-facing message.

use thiserror::Error;

use crate::models::EntityKind;
use crate::validation::Violation;

/// Fatal migration failures; nothing is partially migrated when one occurs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// The document was written by a newer schema than this crate knows
    #[error("this data (v {found}) was saved with a newer version of the app (v {current}) — please upgrade the app")]
    FromTheFuture { found: u64, current: u32 },

    /// The document is not shaped like a model at all
    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// The main error type for plan-integrity operations
#[derive(Error, Debug)]
pub enum PlanError {
    /// Migration could not bring a document to the current schema
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// An edit or model was rejected by the validator
    #[error("{0}")]
    Validation(Violation),

    /// Entity not found errors
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlanError {
    /// Create a "not found" error
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The violation behind a validation error
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Violation> for PlanError {
    fn from(violation: Violation) -> Self {
        Self::Validation(violation)
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for plan-integrity operations
pub type PlanResult<T> = Result<T, PlanError>;
