//! Transaction model
//!
//! Scheduled movements of value between assets, incomes, expenses and
//! settings, including revaluations, debt pay-offs and bond investments.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords::{BOND_MARKER, REVALUE_PREFIX};
use super::kind::EntityKind;

/// Kind of a scheduled transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    /// Entered by hand
    #[default]
    Custom,
    /// Produced from a generator template
    #[serde(rename = "autogen")]
    AutoGen,
    PayOffDebt,
    LiquidateAsset,
    RevalueAsset,
    RevalueDebt,
    RevalueInc,
    RevalueExp,
    RevalueSetting,
    BondInvest,
    BondMature,
    /// Any type tag this version does not know about
    #[serde(other)]
    Unrecognized,
}

impl TransactionType {
    /// Check if this is one of the revalue* kinds
    pub fn is_revaluation(&self) -> bool {
        self.revalue_target().is_some()
    }

    /// The kind of entity a revaluation of this type must target
    pub fn revalue_target(&self) -> Option<EntityKind> {
        match self {
            Self::RevalueAsset => Some(EntityKind::Asset),
            Self::RevalueDebt => Some(EntityKind::Debt),
            Self::RevalueInc => Some(EntityKind::Income),
            Self::RevalueExp => Some(EntityKind::Expense),
            Self::RevalueSetting => Some(EntityKind::Setting),
            _ => None,
        }
    }

    /// The revaluation type that targets entities of `kind`
    pub fn revaluing(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Asset => Some(Self::RevalueAsset),
            EntityKind::Debt => Some(Self::RevalueDebt),
            EntityKind::Income => Some(Self::RevalueInc),
            EntityKind::Expense => Some(Self::RevalueExp),
            EntityKind::Setting => Some(Self::RevalueSetting),
            _ => None,
        }
    }

    pub fn is_bond(&self) -> bool {
        matches!(self, Self::BondInvest | Self::BondMature)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Custom => "custom",
            Self::AutoGen => "autogen",
            Self::PayOffDebt => "payOffDebt",
            Self::LiquidateAsset => "liquidateAsset",
            Self::RevalueAsset => "revalueAsset",
            Self::RevalueDebt => "revalueDebt",
            Self::RevalueInc => "revalueInc",
            Self::RevalueExp => "revalueExp",
            Self::RevalueSetting => "revalueSetting",
            Self::BondInvest => "bondInvest",
            Self::BondMature => "bondMature",
            Self::Unrecognized => "unrecognized",
        };
        write!(f, "{}", s)
    }
}

fn default_absolute() -> bool {
    true
}

/// A scheduled transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "NAME")]
    pub name: String,

    /// Source entity or asset category; empty for revaluations
    #[serde(rename = "FROM", default)]
    pub from: String,

    /// When false, FROM_VALUE is a proportion of the source
    #[serde(rename = "FROM_ABSOLUTE", default = "default_absolute")]
    pub from_absolute: bool,

    #[serde(rename = "FROM_VALUE", default)]
    pub from_value: String,

    #[serde(rename = "TO", default)]
    pub to: String,

    /// When false, TO_VALUE is a proportion of what left FROM
    #[serde(rename = "TO_ABSOLUTE", default = "default_absolute")]
    pub to_absolute: bool,

    #[serde(rename = "TO_VALUE", default)]
    pub to_value: String,

    #[serde(rename = "DATE")]
    pub date: String,

    #[serde(rename = "STOP_DATE", default)]
    pub stop_date: String,

    #[serde(rename = "RECURRENCE", default)]
    pub recurrence: String,

    #[serde(rename = "CATEGORY", default)]
    pub category: String,

    #[serde(rename = "TYPE", default)]
    pub transaction_type: TransactionType,

    #[serde(rename = "ERA", default)]
    pub era: Option<i64>,
}

impl Transaction {
    /// Create a one-off custom transaction with nothing attached
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: String::new(),
            from_absolute: true,
            from_value: String::new(),
            to: String::new(),
            to_absolute: true,
            to_value: String::new(),
            date: date.into(),
            stop_date: String::new(),
            recurrence: String::new(),
            category: String::new(),
            transaction_type: TransactionType::Custom,
            era: None,
        }
    }

    /// Create a revaluation of `target` to `value`, named with the revalue prefix
    pub fn revaluation(
        transaction_type: TransactionType,
        name: impl Into<String>,
        target: impl Into<String>,
        value: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            to: target.into(),
            to_value: value.into(),
            transaction_type,
            ..Self::new(name, date)
        }
    }

    /// Set the source side
    pub fn with_from(mut self, from: impl Into<String>, value: impl Into<String>, absolute: bool) -> Self {
        self.from = from.into();
        self.from_value = value.into();
        self.from_absolute = absolute;
        self
    }

    /// Set the destination side
    pub fn with_to(mut self, to: impl Into<String>, value: impl Into<String>, absolute: bool) -> Self {
        self.to = to.into();
        self.to_value = value.into();
        self.to_absolute = absolute;
        self
    }

    /// Set the type
    pub fn of_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    /// Set the recurrence
    pub fn every(mut self, recurrence: impl Into<String>) -> Self {
        self.recurrence = recurrence.into();
        self
    }

    pub fn has_revalue_name(&self) -> bool {
        self.name.starts_with(REVALUE_PREFIX)
    }

    /// The setting name carried after the bond marker on FROM_VALUE
    pub fn bond_setting(&self) -> Option<&str> {
        self.from_value
            .trim()
            .strip_prefix(BOND_MARKER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_wire_names() {
        let cases = [
            (TransactionType::Custom, "custom"),
            (TransactionType::AutoGen, "autogen"),
            (TransactionType::PayOffDebt, "payOffDebt"),
            (TransactionType::LiquidateAsset, "liquidateAsset"),
            (TransactionType::RevalueInc, "revalueInc"),
            (TransactionType::BondMature, "bondMature"),
        ];
        for (ty, wire) in cases {
            assert_eq!(serde_json::to_value(ty).unwrap(), wire);
            assert_eq!(ty.to_string(), wire);
            let parsed: TransactionType = serde_json::from_value(wire.into()).unwrap();
            assert_eq!(parsed, ty);
        }
    }

    #[test]
    fn test_unknown_type_is_unrecognized() {
        let parsed: TransactionType = serde_json::from_str("\"teleport\"").unwrap();
        assert_eq!(parsed, TransactionType::Unrecognized);
    }

    #[test]
    fn test_revalue_targets() {
        assert_eq!(
            TransactionType::RevalueDebt.revalue_target(),
            Some(EntityKind::Debt)
        );
        assert_eq!(
            TransactionType::revaluing(EntityKind::Income),
            Some(TransactionType::RevalueInc)
        );
        assert!(!TransactionType::PayOffDebt.is_revaluation());
        assert!(TransactionType::BondInvest.is_bond());
    }

    #[test]
    fn test_bond_setting() {
        let txn = Transaction::new("Buy bond", "1 Jan 2020").with_from("Cash", "BMV BondValue", true);
        assert_eq!(txn.bond_setting(), Some("BondValue"));

        let plain = Transaction::new("Move", "1 Jan 2020").with_from("Cash", "100", true);
        assert_eq!(plain.bond_setting(), None);
    }

    #[test]
    fn test_absolute_flags_default_true() {
        let txn: Transaction =
            serde_json::from_str(r#"{"NAME":"Move","DATE":"1 Jan 2020"}"#).unwrap();
        assert!(txn.from_absolute);
        assert!(txn.to_absolute);
        assert_eq!(txn.transaction_type, TransactionType::Custom);
    }
}
