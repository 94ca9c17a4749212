//! Shared state and helpers for the entity checks
//!
//! The cash-start date and the `variable` setting are resolved once per
//! validation run rather than once per entity.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::violation::{CheckResult, Violation};
use crate::models::keywords::{is_reserved, VARIABLE};
use crate::models::{EntityKind, Model};
use crate::resolver::{ResolveError, Resolver};

static RECURRENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)([wmy])$").expect("recurrence pattern is valid"));

/// What a FROM or TO field refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reference {
    Asset,
    Debt,
    AssetCategory,
    Income,
    Expense,
    Setting,
}

impl Reference {
    pub(crate) fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Self::Asset => Some(EntityKind::Asset),
            Self::Debt => Some(EntityKind::Debt),
            Self::Income => Some(EntityKind::Income),
            Self::Expense => Some(EntityKind::Expense),
            Self::Setting => Some(EntityKind::Setting),
            Self::AssetCategory => None,
        }
    }
}

pub(crate) struct CheckContext<'a> {
    pub(crate) model: &'a Model,
    pub(crate) resolver: &'a Resolver,
    variable: Option<f64>,
    cash_start: Option<NaiveDate>,
}

impl<'a> CheckContext<'a> {
    pub(crate) fn new(model: &'a Model, resolver: &'a Resolver) -> Self {
        let variable = model
            .find_setting(VARIABLE)
            .and_then(|s| resolver.resolve_value(&s.value, &model.settings).ok());
        let cash_start = model
            .cash_start()
            .and_then(|expr| resolver.resolve_date(expr, &model.triggers, variable).ok());
        Self {
            model,
            resolver,
            variable,
            cash_start,
        }
    }

    pub(crate) fn cash_start(&self) -> Option<NaiveDate> {
        self.cash_start
    }

    pub(crate) fn resolve_date(&self, expr: &str) -> Result<NaiveDate, ResolveError> {
        self.resolver
            .resolve_date(expr, &self.model.triggers, self.variable)
    }

    pub(crate) fn resolve_value(&self, expr: &str) -> Result<f64, ResolveError> {
        self.resolver.resolve_value(expr, &self.model.settings)
    }

    /// Format a date for a violation message
    pub(crate) fn show(&self, date: NaiveDate) -> String {
        date.format(&self.resolver.config().date_format).to_string()
    }

    /// Resolve a date field or describe why it does not resolve
    pub(crate) fn date_field(
        &self,
        kind: EntityKind,
        name: &str,
        field: &str,
        expr: &str,
    ) -> Result<NaiveDate, Violation> {
        self.resolve_date(expr).map_err(|e| {
            tracing::debug!(%kind, name, field, expr, error = %e, "date did not resolve");
            Violation::new(
                kind,
                name,
                format!("{} '{}' {} '{}' is not a valid date", kind, name, field, expr),
            )
        })
    }

    /// Resolve a value field or describe why it does not resolve
    pub(crate) fn value_field(
        &self,
        kind: EntityKind,
        name: &str,
        field: &str,
        expr: &str,
    ) -> Result<f64, Violation> {
        self.resolve_value(expr).map_err(|e| {
            tracing::debug!(%kind, name, field, expr, error = %e, "value did not resolve");
            Violation::new(
                kind,
                name,
                format!("{} '{}' {} '{}' does not resolve to a number", kind, name, field, expr),
            )
        })
    }

    /// Start dates may not precede the cash asset's start
    pub(crate) fn check_after_cash_start(
        &self,
        kind: EntityKind,
        name: &str,
        start: NaiveDate,
    ) -> CheckResult {
        match self.cash_start {
            Some(cash) if start < cash => Err(Violation::new(
                kind,
                name,
                format!(
                    "{} '{}' starts on {} which is before cash starts on {}",
                    kind,
                    name,
                    self.show(start),
                    self.show(cash)
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Names are non-empty, not reserved, and unique across all kinds
    pub(crate) fn check_name(&self, kind: EntityKind, name: &str) -> CheckResult {
        if name.trim().is_empty() {
            return Err(Violation::new(
                kind,
                name,
                format!("{} name needs some characters", kind),
            ));
        }
        let variable_setting = kind == EntityKind::Setting && name == VARIABLE;
        if is_reserved(name) && !variable_setting {
            return Err(Violation::new(
                kind,
                name,
                format!("{} name '{}' is a reserved word", kind, name),
            ));
        }

        let family = collection_of(kind);
        let kinds = self.model.kinds_named(name);
        let same = kinds.iter().filter(|k| collection_of(**k) == family).count();
        let other = kinds.len() - same;
        if other > 0 || same > 1 {
            return Err(Violation::new(
                kind,
                name,
                format!("{} name '{}' is already in use", kind, name),
            ));
        }
        Ok(())
    }

    /// Recurrences look like "1m", "2w", "1y"
    pub(crate) fn check_recurrence(&self, kind: EntityKind, name: &str, recurrence: &str) -> CheckResult {
        let positive = RECURRENCE
            .captures(recurrence.trim())
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .is_some_and(|n| n > 0);
        if positive {
            Ok(())
        } else {
            Err(Violation::new(
                kind,
                name,
                format!(
                    "{} '{}' recurrence '{}' should be a whole number followed by w, m or y",
                    kind, name, recurrence
                ),
            ))
        }
    }

    /// What `name` refers to when used as a FROM or TO
    pub(crate) fn reference(&self, name: &str) -> Option<Reference> {
        if let Some(asset) = self.model.find_asset(name) {
            return Some(if asset.is_a_debt {
                Reference::Debt
            } else {
                Reference::Asset
            });
        }
        if self.model.find_income(name).is_some() {
            return Some(Reference::Income);
        }
        if self.model.find_expense(name).is_some() {
            return Some(Reference::Expense);
        }
        if self.model.find_setting(name).is_some() {
            return Some(Reference::Setting);
        }
        if self.model.is_asset_category(name) {
            return Some(Reference::AssetCategory);
        }
        None
    }

    /// Check whether the named asset, income or expense takes its value from a setting
    pub(crate) fn is_word_valued(&self, name: &str) -> bool {
        let value = self
            .model
            .find_asset(name)
            .map(|a| a.value.as_str())
            .or_else(|| self.model.find_income(name).map(|i| i.value.as_str()))
            .or_else(|| self.model.find_expense(name).map(|e| e.value.as_str()));
        value.is_some_and(|v| self.resolver.is_word_valued(v, &self.model.settings))
    }
}

/// Assets and debts share a collection, so they share a namespace slot
fn collection_of(kind: EntityKind) -> EntityKind {
    match kind {
        EntityKind::Debt => EntityKind::Asset,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asset, Setting, Trigger};

    fn model() -> Model {
        let mut model = Model::new("Test", 14);
        model.assets.push(Asset::new("Cash", "Start", "0"));
        model.assets.push(Asset::new("ISA", "1 Jan 2019", "Fund").with_category("Stocks"));
        model.triggers.push(Trigger::new("Start", "1 Jan 2019"));
        model.settings.push(Setting::new("Fund", "1000"));
        model.settings.push(Setting::new("variable", "2"));
        model
    }

    #[test]
    fn test_cash_start_and_variable() {
        let model = model();
        let resolver = Resolver::default();
        let ctx = CheckContext::new(&model, &resolver);
        assert_eq!(ctx.cash_start(), NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(
            ctx.resolve_date("1 Jan 2019+variabley"),
            Ok(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_check_name() {
        let model = model();
        let resolver = Resolver::default();
        let ctx = CheckContext::new(&model, &resolver);

        assert!(ctx.check_name(EntityKind::Asset, "ISA").is_ok());
        assert!(ctx.check_name(EntityKind::Debt, "New debt").is_ok());
        assert!(ctx.check_name(EntityKind::Setting, "variable").is_ok());

        let err = ctx.check_name(EntityKind::Income, "ISA").unwrap_err();
        assert_eq!(err.message, "Income name 'ISA' is already in use");
        let err = ctx.check_name(EntityKind::Trigger, "today").unwrap_err();
        assert_eq!(err.message, "Trigger name 'today' is a reserved word");
        assert!(ctx.check_name(EntityKind::Trigger, "  ").is_err());
    }

    #[test]
    fn test_recurrence() {
        let model = model();
        let resolver = Resolver::default();
        let ctx = CheckContext::new(&model, &resolver);
        for ok in ["1m", "2w", "10y"] {
            assert!(ctx.check_recurrence(EntityKind::Income, "Pay", ok).is_ok(), "{ok}");
        }
        for bad in ["", "0m", "m", "1d", "1.5m", "-1y"] {
            assert!(ctx.check_recurrence(EntityKind::Income, "Pay", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_references() {
        let model = model();
        let resolver = Resolver::default();
        let ctx = CheckContext::new(&model, &resolver);
        assert_eq!(ctx.reference("ISA"), Some(Reference::Asset));
        assert_eq!(ctx.reference("Stocks"), Some(Reference::AssetCategory));
        assert_eq!(ctx.reference("Fund"), Some(Reference::Setting));
        assert_eq!(ctx.reference("Nothing"), None);
        assert!(ctx.is_word_valued("ISA"));
        assert!(!ctx.is_word_valued("Cash"));
    }
}
