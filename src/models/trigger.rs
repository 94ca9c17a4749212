//! Trigger model
//!
//! A trigger is a named date. Its DATE field is itself a date expression, so
//! triggers may be defined in terms of other triggers.

use serde::{Deserialize, Serialize};

/// A named, resolvable calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "NAME")]
    pub name: String,

    /// Date expression, e.g. "1 Jan 2030" or "Retire+1y"
    #[serde(rename = "DATE")]
    pub date: String,

    #[serde(rename = "ERA", default)]
    pub era: Option<i64>,
}

impl Trigger {
    /// Create a new trigger
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            era: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let trigger = Trigger::new("Retire", "1 Jan 2040");
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json["NAME"], "Retire");
        assert_eq!(json["DATE"], "1 Jan 2040");
        assert!(json["ERA"].is_null());
    }

    #[test]
    fn test_era_defaults_to_none() {
        let trigger: Trigger =
            serde_json::from_str(r#"{"NAME":"Retire","DATE":"1 Jan 2040"}"#).unwrap();
        assert_eq!(trigger.era, None);
    }
}
