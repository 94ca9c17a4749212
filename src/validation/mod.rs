//! Semantic validation
//!
//! Checks every entity of a current-schema [`Model`] and the cross-references
//! between them. Checks run in a fixed order: settings, triggers, assets,
//! incomes, expenses, transactions, then model-level rules.
//!
//! [`validate`] stops at the first failure and is what edits and the
//! projection engine gate on. [`validate_all`] runs every check and returns
//! each violation in the same order. The `check_*` functions run one entity's
//! checks against a model, for editors that want feedback before submitting.

mod assets;
mod context;
mod flows;
mod liability;
mod model_rules;
mod settings;
mod transactions;
mod violation;

pub use violation::{outcome_message, CheckResult, Violation};

use context::CheckContext;

use crate::models::{Asset, Expense, Income, Model, Setting, Transaction, Trigger};
use crate::resolver::Resolver;

/// Runs the ordered checks over one model
pub struct Validator<'a> {
    ctx: CheckContext<'a>,
}

impl<'a> Validator<'a> {
    pub fn new(model: &'a Model, resolver: &'a Resolver) -> Self {
        Self {
            ctx: CheckContext::new(model, resolver),
        }
    }

    /// Every check outcome, lazily, in check order
    fn outcomes(&self) -> impl Iterator<Item = CheckResult> + '_ {
        let ctx = &self.ctx;
        let model = ctx.model;
        model
            .settings
            .iter()
            .map(move |s| settings::check_setting(s, ctx))
            .chain(model.triggers.iter().map(move |t| settings::check_trigger(t, ctx)))
            .chain(model.assets.iter().map(move |a| assets::check_asset(a, ctx)))
            .chain(model.incomes.iter().map(move |i| flows::check_income(i, ctx)))
            .chain(model.expenses.iter().map(move |e| flows::check_expense(e, ctx)))
            .chain(
                model
                    .transactions
                    .iter()
                    .map(move |t| transactions::check_transaction(t, ctx)),
            )
            .chain(model_rules::MODEL_RULES.iter().map(move |rule| rule(ctx)))
    }

    /// The first failing check, if any
    pub fn validate(&self) -> CheckResult {
        for outcome in self.outcomes() {
            if let Err(violation) = outcome {
                tracing::debug!(
                    model = %self.ctx.model.name,
                    kind = %violation.kind,
                    name = %violation.name,
                    "model rejected: {}",
                    violation
                );
                return Err(violation);
            }
        }
        Ok(())
    }

    /// Every failing check, in check order
    pub fn validate_all(&self) -> Vec<Violation> {
        let violations: Vec<Violation> = self.outcomes().filter_map(Result::err).collect();
        tracing::debug!(
            model = %self.ctx.model.name,
            count = violations.len(),
            "validated model"
        );
        violations
    }
}

/// Validate a model, stopping at the first failure
pub fn validate(model: &Model, resolver: &Resolver) -> CheckResult {
    Validator::new(model, resolver).validate()
}

/// Validate a model, collecting every failure
pub fn validate_all(model: &Model, resolver: &Resolver) -> Vec<Violation> {
    Validator::new(model, resolver).validate_all()
}

/// The message form of [`validate`]: empty when the model is valid
pub fn check_model(model: &Model, resolver: &Resolver) -> String {
    outcome_message(&validate(model, resolver))
}

pub fn check_setting(setting: &Setting, model: &Model, resolver: &Resolver) -> CheckResult {
    settings::check_setting(setting, &CheckContext::new(model, resolver))
}

pub fn check_trigger(trigger: &Trigger, model: &Model, resolver: &Resolver) -> CheckResult {
    settings::check_trigger(trigger, &CheckContext::new(model, resolver))
}

/// Check an asset or debt
pub fn check_asset(asset: &Asset, model: &Model, resolver: &Resolver) -> CheckResult {
    assets::check_asset(asset, &CheckContext::new(model, resolver))
}

pub fn check_income(income: &Income, model: &Model, resolver: &Resolver) -> CheckResult {
    flows::check_income(income, &CheckContext::new(model, resolver))
}

pub fn check_expense(expense: &Expense, model: &Model, resolver: &Resolver) -> CheckResult {
    flows::check_expense(expense, &CheckContext::new(model, resolver))
}

pub fn check_transaction(transaction: &Transaction, model: &Model, resolver: &Resolver) -> CheckResult {
    transactions::check_transaction(transaction, &CheckContext::new(model, resolver))
}
