//! Asset and debt model
//!
//! Assets and debts share one record shape; the `IS_A_DEBT` flag decides
//! which rules apply to it.

use serde::{Deserialize, Serialize};

use super::kind::EntityKind;

/// Which side of the balance sheet a holding sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingKind {
    Asset,
    Debt,
}

/// A dated asset or debt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "CATEGORY", default)]
    pub category: String,

    /// Date expression for when the holding comes into existence
    #[serde(rename = "START")]
    pub start: String,

    /// Value expression at START
    #[serde(rename = "VALUE")]
    pub value: String,

    /// Optional number of units; VALUE is then the price per unit
    #[serde(rename = "QUANTITY", default)]
    pub quantity: String,

    /// Growth expression, optionally with a trailing '%'
    #[serde(rename = "GROWTH", default = "default_growth")]
    pub growth: String,

    #[serde(rename = "CPI_IMMUNE", default)]
    pub cpi_immune: bool,

    #[serde(rename = "CAN_BE_NEGATIVE", default)]
    pub can_be_negative: bool,

    #[serde(rename = "IS_A_DEBT", default)]
    pub is_a_debt: bool,

    /// '/'-separated list like "Joe(CGT)"
    #[serde(rename = "LIABILITY", default)]
    pub liability: String,

    #[serde(rename = "PURCHASE_PRICE", default)]
    pub purchase_price: String,

    #[serde(rename = "ERA", default)]
    pub era: Option<i64>,
}

fn default_growth() -> String {
    "0".to_string()
}

impl Asset {
    /// Create a new asset starting at `start` with the given value
    pub fn new(name: impl Into<String>, start: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: String::new(),
            start: start.into(),
            value: value.into(),
            quantity: String::new(),
            growth: default_growth(),
            cpi_immune: false,
            can_be_negative: false,
            is_a_debt: false,
            liability: String::new(),
            purchase_price: String::new(),
            era: None,
        }
    }

    /// Create a new debt; debts may go negative by construction
    pub fn debt(name: impl Into<String>, start: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            is_a_debt: true,
            can_be_negative: true,
            ..Self::new(name, start, value)
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the growth expression
    pub fn with_growth(mut self, growth: impl Into<String>) -> Self {
        self.growth = growth.into();
        self
    }

    /// Set the liability expression
    pub fn with_liability(mut self, liability: impl Into<String>) -> Self {
        self.liability = liability.into();
        self
    }

    pub fn holding_kind(&self) -> HoldingKind {
        if self.is_a_debt {
            HoldingKind::Debt
        } else {
            HoldingKind::Asset
        }
    }

    /// The entity kind used in messages ("Asset" or "Debt")
    pub fn entity_kind(&self) -> EntityKind {
        match self.holding_kind() {
            HoldingKind::Asset => EntityKind::Asset,
            HoldingKind::Debt => EntityKind::Debt,
        }
    }

    pub fn has_quantity(&self) -> bool {
        !self.quantity.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_asset_defaults() {
        let asset = Asset::new("Stocks", "1 Jan 2019", "1000");
        assert_eq!(asset.growth, "0");
        assert!(!asset.is_a_debt);
        assert_eq!(asset.entity_kind(), EntityKind::Asset);
        assert!(!asset.has_quantity());
    }

    #[test]
    fn test_debt_constructor() {
        let debt = Asset::debt("Mortgage", "1 Jan 2019", "-150000");
        assert_eq!(debt.holding_kind(), HoldingKind::Debt);
        assert_eq!(debt.entity_kind(), EntityKind::Debt);
        assert!(debt.can_be_negative);
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let asset: Asset =
            serde_json::from_str(r#"{"NAME":"Cash","START":"1 Jan 2019","VALUE":"0"}"#).unwrap();
        assert_eq!(asset.name, "Cash");
        assert_eq!(asset.growth, "0");
        assert!(asset.liability.is_empty());
    }
}
