//! Monitor and generator records
//!
//! Both are opaque to this crate: they are carried through migration and
//! diffing untouched, and only their names are checked.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A snapshot of observed spending for one named budget line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    #[serde(rename = "NAME")]
    pub name: String,

    /// Recorded observations; shape owned by the presentation layer
    #[serde(rename = "VALUES", default)]
    pub values: Value,
}

/// A template that expands into auto-generated transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "TYPE", default)]
    pub generator_type: String,

    #[serde(rename = "DETAILS", default)]
    pub details: Value,

    #[serde(rename = "ERA", default)]
    pub era: Option<i64>,
}

impl Monitor {
    /// Create a monitor with no observations yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Value::Null,
        }
    }
}

impl Generator {
    pub fn new(name: impl Into<String>, generator_type: impl Into<String>, details: Value) -> Self {
        Self {
            name: name.into(),
            generator_type: generator_type.into(),
            details,
            era: None,
        }
    }
}
