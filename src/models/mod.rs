//! Core data models for financial plans
//!
//! This module contains the records a plan is made of: triggers, settings,
//! assets and debts, incomes, expenses, transactions, monitors and
//! generators, and the `Model` aggregate that holds them.

pub mod asset;
pub mod income;
pub mod keywords;
pub mod kind;
pub mod model;
pub mod monitor;
pub mod setting;
pub mod transaction;
pub mod trigger;

pub use asset::{Asset, HoldingKind};
pub use income::{Expense, Income};
pub use kind::EntityKind;
pub use model::{Model, Record};
pub use monitor::{Generator, Monitor};
pub use setting::{Setting, SettingType};
pub use transaction::{Transaction, TransactionType};
pub use trigger::Trigger;
