//! Transaction checks
//!
//! Every transaction passes the shared date and FROM/TO shape checks, then
//! the structural rule for its type.

use chrono::NaiveDate;

use super::context::{CheckContext, Reference};
use super::violation::{CheckResult, Violation};
use crate::models::keywords::{BOND_MARKER, REVALUE_PREFIX};
use crate::models::{EntityKind, Transaction, TransactionType};

const KIND: EntityKind = EntityKind::Transaction;

type TypeRule = fn(&Transaction, &CheckContext<'_>, NaiveDate) -> CheckResult;

fn fail(t: &Transaction, message: String) -> CheckResult {
    Err(Violation::new(KIND, t.name.as_str(), message))
}

pub(crate) fn check_transaction(t: &Transaction, ctx: &CheckContext<'_>) -> CheckResult {
    let name = t.name.as_str();
    ctx.check_name(KIND, name)?;

    let rule: TypeRule = match t.transaction_type {
        TransactionType::Custom | TransactionType::AutoGen => check_custom,
        TransactionType::PayOffDebt => check_pay_off_debt,
        TransactionType::LiquidateAsset => check_liquidation,
        TransactionType::RevalueAsset
        | TransactionType::RevalueDebt
        | TransactionType::RevalueInc
        | TransactionType::RevalueExp
        | TransactionType::RevalueSetting => check_revaluation,
        TransactionType::BondInvest => check_bond_investment,
        TransactionType::BondMature => check_bond_maturity,
        TransactionType::Unrecognized => {
            return Err(Violation::internal_bug(
                KIND,
                name,
                format!("transaction '{}' has a type this version does not know", name),
            ))
        }
    };

    let date = ctx.date_field(KIND, name, "date", &t.date)?;
    if let Some(cash) = ctx.cash_start() {
        if date < cash {
            return fail(
                t,
                format!(
                    "Transaction '{}' is dated {} which is before cash starts on {}",
                    name,
                    ctx.show(date),
                    ctx.show(cash)
                ),
            );
        }
    }
    if !t.stop_date.trim().is_empty() {
        let stop = ctx.date_field(KIND, name, "stop date", &t.stop_date)?;
        if stop <= date {
            return fail(
                t,
                format!(
                    "Transaction '{}' stop date {} should be after its date {}",
                    name,
                    ctx.show(stop),
                    ctx.show(date)
                ),
            );
        }
    }
    if !t.recurrence.trim().is_empty() {
        ctx.check_recurrence(KIND, name, &t.recurrence)?;
    }

    check_sides(t, ctx)?;
    rule(t, ctx, date)
}

/// FROM and TO each come with a value, and both name something real
fn check_sides(t: &Transaction, ctx: &CheckContext<'_>) -> CheckResult {
    let name = t.name.as_str();
    let from = t.from.trim();
    let to = t.to.trim();

    match (from.is_empty(), t.from_value.trim().is_empty()) {
        (true, false) => {
            return fail(t, format!("Transaction '{}' has a from value but nothing to take it from", name))
        }
        (false, true) => {
            return fail(t, format!("Transaction '{}' needs a value to take from '{}'", name, from))
        }
        _ => {}
    }
    match (to.is_empty(), t.to_value.trim().is_empty()) {
        (true, false) => {
            return fail(t, format!("Transaction '{}' has a to value but nothing to give it to", name))
        }
        (false, true) => {
            return fail(t, format!("Transaction '{}' needs a value to give to '{}'", name, to))
        }
        _ => {}
    }

    if !from.is_empty() {
        match ctx.reference(from) {
            Some(Reference::Asset | Reference::Debt | Reference::AssetCategory | Reference::Income) => {}
            _ => {
                return fail(
                    t,
                    format!(
                        "Transaction '{}' takes from '{}' which is not an asset, asset category or income",
                        name, from
                    ),
                )
            }
        }
        if !t.transaction_type.is_bond() {
            check_amount(t, ctx, "from", &t.from_value, t.from_absolute)?;
        }
    }

    if !to.is_empty() {
        if ctx.reference(to).is_none() {
            return fail(t, format!("Transaction '{}' gives to '{}' which does not exist", name, to));
        }
        if t.transaction_type != TransactionType::RevalueSetting {
            check_amount(t, ctx, "to", &t.to_value, t.to_absolute)?;
        }
        if !t.to_absolute && ctx.is_word_valued(to) {
            return fail(
                t,
                format!(
                    "Transaction '{}' changes '{}' proportionally, but its value is set through a setting; only absolute amounts can target it",
                    name, to
                ),
            );
        }
    }
    Ok(())
}

fn check_amount(
    t: &Transaction,
    ctx: &CheckContext<'_>,
    side: &str,
    value: &str,
    absolute: bool,
) -> CheckResult {
    if absolute {
        return ctx
            .value_field(KIND, &t.name, &format!("{} value", side), value)
            .map(|_| ());
    }
    let in_range = match ctx.resolver.resolve_proportion(value) {
        Ok(p) if side == "from" => (0.0..=1.0).contains(&p),
        Ok(p) => p >= 0.0,
        Err(_) => false,
    };
    if in_range {
        Ok(())
    } else {
        fail(
            t,
            format!(
                "Transaction '{}' {} value '{}' should be a proportion such as 0.5 or 50%",
                t.name, side, value
            ),
        )
    }
}

fn check_custom(t: &Transaction, ctx: &CheckContext<'_>, _date: NaiveDate) -> CheckResult {
    let name = t.name.as_str();
    if t.has_revalue_name() {
        return fail(
            t,
            format!(
                "Transaction '{}' should not start with '{}' unless it is a revaluation",
                name, REVALUE_PREFIX
            ),
        );
    }
    let to = t.to.trim();
    if t.from.trim().is_empty() && to.is_empty() {
        return fail(t, format!("Transaction '{}' should move value from or to something", name));
    }
    if !to.is_empty() {
        match ctx.reference(to) {
            Some(Reference::Asset | Reference::Debt | Reference::AssetCategory) => {}
            _ => {
                return fail(
                    t,
                    format!(
                        "Transaction '{}' gives to '{}' which is not an asset or asset category",
                        name, to
                    ),
                )
            }
        }
    }
    Ok(())
}

fn check_pay_off_debt(t: &Transaction, ctx: &CheckContext<'_>, _date: NaiveDate) -> CheckResult {
    let name = t.name.as_str();
    if ctx.reference(t.to.trim()) != Some(Reference::Debt) {
        return fail(t, format!("Transaction '{}' pays off '{}' which is not a debt", name, t.to));
    }
    match ctx.reference(t.from.trim()) {
        Some(Reference::Asset | Reference::AssetCategory) => Ok(()),
        _ => fail(
            t,
            format!(
                "Transaction '{}' pays off a debt from '{}' which is not an asset",
                name, t.from
            ),
        ),
    }
}

fn check_liquidation(t: &Transaction, ctx: &CheckContext<'_>, _date: NaiveDate) -> CheckResult {
    let name = t.name.as_str();
    match ctx.reference(t.from.trim()) {
        Some(Reference::Asset | Reference::AssetCategory) => {}
        _ => {
            return fail(
                t,
                format!(
                    "Transaction '{}' liquidates '{}' which is not an asset or asset category",
                    name, t.from
                ),
            )
        }
    }
    if ctx.reference(t.to.trim()) != Some(Reference::Asset) {
        return fail(
            t,
            format!(
                "Transaction '{}' pays the proceeds into '{}' which is not an asset",
                name, t.to
            ),
        );
    }
    Ok(())
}

fn check_revaluation(t: &Transaction, ctx: &CheckContext<'_>, _date: NaiveDate) -> CheckResult {
    let name = t.name.as_str();
    let ty = t.transaction_type;
    if !t.has_revalue_name() {
        return fail(
            t,
            format!(
                "Transaction '{}' of type {} should have a name starting with '{}'",
                name, ty, REVALUE_PREFIX
            ),
        );
    }
    if !t.from.trim().is_empty() {
        return fail(
            t,
            format!("Transaction '{}' is a revaluation and should not take value from anything", name),
        );
    }

    let expected = ty.revalue_target();
    let actual = ctx.reference(t.to.trim()).and_then(|r| r.entity_kind());
    if expected.is_none() || actual != expected {
        let wanted = expected
            .map(|k| k.to_string().to_lowercase())
            .unwrap_or_default();
        return fail(
            t,
            format!(
                "Transaction '{}' of type {} targets '{}' which is not {} {}",
                name,
                ty,
                t.to,
                article(&wanted),
                wanted
            ),
        );
    }
    Ok(())
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Shape shared by both bond types; yields the bond's setting name
fn check_bond<'t>(t: &'t Transaction, ctx: &CheckContext<'_>) -> Result<&'t str, Violation> {
    let name = t.name.as_str();
    let bad_marker = || {
        Violation::new(
            KIND,
            name,
            format!(
                "Transaction '{}' from value '{}' should be {} followed by a setting name",
                name, t.from_value, BOND_MARKER
            ),
        )
    };
    if !t.from_absolute {
        return Err(bad_marker());
    }
    let setting = t
        .bond_setting()
        .filter(|s| ctx.model.find_setting(s).is_some())
        .ok_or_else(bad_marker)?;

    if ctx.reference(t.from.trim()) != Some(Reference::Asset) {
        return Err(Violation::new(
            KIND,
            name,
            format!("Transaction '{}' moves bond money from '{}' which is not an asset", name, t.from),
        ));
    }
    if ctx.reference(t.to.trim()) != Some(Reference::Asset) {
        return Err(Violation::new(
            KIND,
            name,
            format!("Transaction '{}' moves bond money to '{}' which is not an asset", name, t.to),
        ));
    }
    Ok(setting)
}

fn check_bond_investment(t: &Transaction, ctx: &CheckContext<'_>, date: NaiveDate) -> CheckResult {
    let setting = check_bond(t, ctx)?;
    let captured = ctx.model.transactions.iter().any(|r| {
        r.transaction_type == TransactionType::RevalueSetting
            && r.to == setting
            && ctx.resolve_date(&r.date).ok() == Some(date)
    });
    if captured {
        Ok(())
    } else {
        fail(
            t,
            format!(
                "Transaction '{}' invests in bond '{}' but no revalueSetting transaction sets it on the same date",
                t.name, setting
            ),
        )
    }
}

fn check_bond_maturity(t: &Transaction, ctx: &CheckContext<'_>, date: NaiveDate) -> CheckResult {
    let setting = check_bond(t, ctx)?;
    let invested = ctx.model.transactions.iter().any(|b| {
        b.transaction_type == TransactionType::BondInvest
            && b.bond_setting() == Some(setting)
            && ctx.resolve_date(&b.date).is_ok_and(|d| d <= date)
    });
    if invested {
        Ok(())
    } else {
        fail(
            t,
            format!(
                "Transaction '{}' matures bond '{}' but no bond investment uses it on or before that date",
                t.name, setting
            ),
        )
    }
}
