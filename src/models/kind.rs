//! Entity kinds
//!
//! Used to label violations, audit entries and diffs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of record a model holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Trigger,
    Setting,
    Asset,
    Debt,
    Income,
    Expense,
    Transaction,
    Monitor,
    Generator,
    /// The model as a whole (view range, deprecated settings, ...)
    Model,
}

impl EntityKind {
    /// Parse a kind from its display or wire spelling
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trigger" => Some(Self::Trigger),
            "setting" => Some(Self::Setting),
            "asset" => Some(Self::Asset),
            "debt" => Some(Self::Debt),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "transaction" => Some(Self::Transaction),
            "monitor" => Some(Self::Monitor),
            "generator" => Some(Self::Generator),
            "model" => Some(Self::Model),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trigger => write!(f, "Trigger"),
            Self::Setting => write!(f, "Setting"),
            Self::Asset => write!(f, "Asset"),
            Self::Debt => write!(f, "Debt"),
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transaction => write!(f, "Transaction"),
            Self::Monitor => write!(f, "Monitor"),
            Self::Generator => write!(f, "Generator"),
            Self::Model => write!(f, "Model"),
        }
    }
}
