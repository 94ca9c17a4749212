//! plan-integrity - keeps saved financial plans consistent
//!
//! A plan is a graph of dated assets, debts, incomes, expenses, scheduled
//! transactions, named trigger dates and named settings. This crate is the
//! layer that makes such a plan safe to edit, to load from any older schema,
//! and to hand to a projection engine.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Engine tuning knobs
//! - `error`: Custom error types
//! - `models`: Plan records and the `Model` aggregate
//! - `resolver`: Date and value expression resolution
//! - `migration`: Upgrading persisted documents to the current schema
//! - `validation`: Semantic checks over a current-schema model
//! - `audit`: Change records and model diffs
//! - `services`: Validated edits with undo/redo
//!
//! # Example
//!
//! ```rust,ignore
//! use plan_integrity::{migration, validation, Resolver};
//!
//! let resolver = Resolver::default();
//! let model = migration::migrate(document, &resolver)?;
//! let message = validation::check_model(&model, &resolver);
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod migration;
pub mod models;
pub mod resolver;
pub mod services;
pub mod validation;

pub use config::EngineConfig;
pub use error::{MigrationError, PlanError, PlanResult};
pub use migration::{migrate, CURRENT_VERSION};
pub use models::Model;
pub use resolver::{ResolveError, Resolver};
pub use services::EditService;
pub use validation::{validate, validate_all, CheckResult, Violation};
