//! Change records for model edits
//!
//! Every committed edit produces an [`AuditEntry`] with the affected record
//! before and after the change. Persisting entries is left to the host
//! application.
//!
//! # Components
//!
//! - `AuditEntry`: one committed create, update or delete, with a timestamp
//!   and optional before/after JSON.
//! - `generate_diff`: a human-readable summary of field changes between two
//!   records.
//! - `diff_models`: the records that differ between two whole models.

mod diff;
mod entry;

pub use diff::{diff_models, generate_diff, Change, ModelChange};
pub use entry::{AuditEntry, Operation};
