//! Audit entry data structures
//!
//! Defines the operation types and the entry each committed edit produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::EntityKind;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was replaced by a record with the same name
    Update,
    /// Entity was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit entry
///
/// Records one committed edit to a model, with the affected record's JSON
/// before and after the operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the edit was committed (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Kind of the affected record
    pub kind: EntityKind,

    /// Name of the affected record
    pub name: String,

    /// The record before the operation (for updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// The record after the operation (for creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn record(
        operation: Operation,
        kind: EntityKind,
        name: String,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            kind,
            name,
            before,
            after,
            diff_summary,
        }
    }

    /// A record was added under a new name
    pub fn create<T: Serialize>(kind: EntityKind, name: impl Into<String>, record: &T) -> Self {
        let after = serde_json::to_value(record).ok();
        Self::record(Operation::Create, kind, name.into(), None, after, None)
    }

    /// A record was replaced by one with the same name
    pub fn update<T: Serialize>(
        kind: EntityKind,
        name: impl Into<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self::record(
            Operation::Update,
            kind,
            name.into(),
            serde_json::to_value(before).ok(),
            serde_json::to_value(after).ok(),
            diff_summary,
        )
    }

    pub fn delete<T: Serialize>(kind: EntityKind, name: impl Into<String>, record: &T) -> Self {
        let before = serde_json::to_value(record).ok();
        Self::record(Operation::Delete, kind, name.into(), before, None, None)
    }
}

/// One line: `UPDATE Trigger 'Retire' (DATE: "1 Jan 2040" -> "1 Jan 2045")`
impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} '{}'", self.operation, self.kind, self.name)?;
        if let Some(diff) = &self.diff_summary {
            write!(f, " ({})", diff)?;
        }
        Ok(())
    }
}
