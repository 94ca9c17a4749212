//! Service layer for plan-integrity
//!
//! Services sit between callers and the model: every change is validated
//! before it is committed and reported as an audit entry.

pub mod edit;

pub use edit::EditService;
