//! Income and expense models
//!
//! Both are recurring flows between a start and an end date. An expense is an
//! income without a tax liability.

use serde::{Deserialize, Serialize};

/// A recurring income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "CATEGORY", default)]
    pub category: String,

    #[serde(rename = "START")]
    pub start: String,

    #[serde(rename = "END")]
    pub end: String,

    #[serde(rename = "VALUE")]
    pub value: String,

    /// Date at which VALUE applies; must not be after START
    #[serde(rename = "VALUE_SET")]
    pub value_set: String,

    #[serde(rename = "CPI_IMMUNE", default)]
    pub cpi_immune: bool,

    /// Up to three '/'-separated parts like "Joe(incomeTax)/Joe(NI)"
    #[serde(rename = "LIABILITY", default)]
    pub liability: String,

    /// "<n>w", "<n>m" or "<n>y"
    #[serde(rename = "RECURRENCE", default = "default_recurrence")]
    pub recurrence: String,

    #[serde(rename = "ERA", default)]
    pub era: Option<i64>,
}

/// A recurring expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "CATEGORY", default)]
    pub category: String,

    #[serde(rename = "START")]
    pub start: String,

    #[serde(rename = "END")]
    pub end: String,

    #[serde(rename = "VALUE")]
    pub value: String,

    #[serde(rename = "VALUE_SET")]
    pub value_set: String,

    #[serde(rename = "CPI_IMMUNE", default)]
    pub cpi_immune: bool,

    #[serde(rename = "RECURRENCE", default = "default_recurrence")]
    pub recurrence: String,

    #[serde(rename = "ERA", default)]
    pub era: Option<i64>,
}

pub(crate) fn default_recurrence() -> String {
    "1m".to_string()
}

impl Income {
    /// Create a monthly income whose value is set at its start date
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let start = start.into();
        Self {
            name: name.into(),
            category: String::new(),
            value_set: start.clone(),
            start,
            end: end.into(),
            value: value.into(),
            cpi_immune: false,
            liability: String::new(),
            recurrence: default_recurrence(),
            era: None,
        }
    }

    /// Set the liability expression
    pub fn with_liability(mut self, liability: impl Into<String>) -> Self {
        self.liability = liability.into();
        self
    }
}

impl Expense {
    /// Create a monthly expense whose value is set at its start date
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let start = start.into();
        Self {
            name: name.into(),
            category: String::new(),
            value_set: start.clone(),
            start,
            end: end.into(),
            value: value.into(),
            cpi_immune: false,
            recurrence: default_recurrence(),
            era: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_value_set_defaults_to_start() {
        let income = Income::new("Salary", "1 Jan 2019", "1 Jan 2030", "3000");
        assert_eq!(income.value_set, "1 Jan 2019");
        assert_eq!(income.recurrence, "1m");
    }

    #[test]
    fn test_expense_wire_names() {
        let expense = Expense::new("Rent", "1 Jan 2019", "1 Jan 2030", "800");
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["VALUE_SET"], "1 Jan 2019");
        assert_eq!(json["RECURRENCE"], "1m");
        assert!(json.get("LIABILITY").is_none());
    }
}
