//! Setting model
//!
//! Settings are named scalars. A value may be a number, the name of another
//! setting, a number followed by a setting name ("2cpi"), or a plain word or
//! date for view-only settings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared role of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SettingType {
    /// Fixed input to the projection
    #[default]
    #[serde(rename = "const")]
    Constant,
    /// Only affects how results are displayed
    #[serde(rename = "view")]
    ViewOnly,
    /// Intended to be tweaked for what-if exploration
    #[serde(rename = "adjustable")]
    Adjustable,
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant => write!(f, "const"),
            Self::ViewOnly => write!(f, "view"),
            Self::Adjustable => write!(f, "adjustable"),
        }
    }
}

/// A named, possibly symbolic scalar value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "VALUE")]
    pub value: String,

    /// Free-text explanation shown next to the setting
    #[serde(rename = "HINT", default)]
    pub hint: String,

    #[serde(rename = "TYPE", default)]
    pub setting_type: SettingType,

    #[serde(rename = "ERA", default)]
    pub era: Option<i64>,
}

impl Setting {
    /// Create a new constant setting
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            hint: String::new(),
            setting_type: SettingType::Constant,
            era: None,
        }
    }

    /// Create a view-only setting
    pub fn view(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            setting_type: SettingType::ViewOnly,
            ..Self::new(name, value)
        }
    }

    /// Set the hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}
