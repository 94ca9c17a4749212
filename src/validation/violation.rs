//! Validation outcomes
//!
//! Each check returns a [`CheckResult`]. The failure side carries the entity
//! it is about so callers that want every violation can group them, while
//! `Display` stays the single user-facing message.

use std::fmt;

use crate::models::EntityKind;

/// A described validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Kind of the offending entity
    pub kind: EntityKind,
    /// Name of the offending entity (empty for model-level failures)
    pub name: String,
    pub message: String,
    internal: bool,
}

/// Outcome of one check
pub type CheckResult = Result<(), Violation>;

impl Violation {
    pub fn new(kind: EntityKind, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            message: message.into(),
            internal: false,
        }
    }

    /// A failure well-formed data should never produce
    pub fn internal_bug(kind: EntityKind, name: impl Into<String>, detail: impl fmt::Display) -> Self {
        let violation = Self {
            kind,
            name: name.into(),
            message: format!("Internal bug: {}", detail),
            internal: true,
        };
        tracing::warn!(kind = %violation.kind, name = %violation.name, "{}", violation.message);
        violation
    }

    pub fn is_internal_bug(&self) -> bool {
        self.internal
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Violation {}

/// The message a UI shows for a check: empty when the check passed
pub fn outcome_message(result: &CheckResult) -> String {
    match result {
        Ok(()) => String::new(),
        Err(violation) => violation.message.clone(),
    }
}
