//! Setting and trigger checks

use super::context::CheckContext;
use super::violation::{CheckResult, Violation};
use crate::models::keywords::CPI;
use crate::models::{EntityKind, Setting, Trigger};
use crate::resolver::parse_literal_date;

/// Characters that would make a trigger name read as date arithmetic
const TRIGGER_OPERATORS: [char; 5] = ['+', '-', '<', '?', ':'];

pub(crate) fn check_setting(setting: &Setting, ctx: &CheckContext<'_>) -> CheckResult {
    let kind = EntityKind::Setting;
    let name = setting.name.as_str();
    ctx.check_name(kind, name)?;

    let value = setting.value.trim();
    if name == CPI {
        ctx.value_field(kind, name, "value", value)?;
        return Ok(());
    }
    if value.is_empty() {
        return Ok(());
    }

    // Another setting's name: the chain must bottom out in a number
    if ctx.model.find_setting(value).is_some() {
        return ctx
            .resolve_value(value)
            .map(|_| ())
            .map_err(|e| {
                Violation::new(
                    kind,
                    name,
                    format!(
                        "Setting '{}' value '{}' refers to a setting that does not resolve: {}",
                        name, value, e
                    ),
                )
            });
    }

    // Anything that starts like a number must be a number, an amount of a
    // setting, or a date
    let numeric_start = value
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.');
    if numeric_start && ctx.resolve_value(value).is_err() && ctx.resolve_date(value).is_err() {
        return Err(Violation::new(
            kind,
            name,
            format!(
                "Setting '{}' value '{}' is neither a number nor a date",
                name, value
            ),
        ));
    }
    Ok(())
}

pub(crate) fn check_trigger(trigger: &Trigger, ctx: &CheckContext<'_>) -> CheckResult {
    let kind = EntityKind::Trigger;
    let name = trigger.name.as_str();
    ctx.check_name(kind, name)?;

    if let Some(op) = name.chars().find(|c| TRIGGER_OPERATORS.contains(c)) {
        return Err(Violation::new(
            kind,
            name,
            format!("Trigger name '{}' should not contain '{}'", name, op),
        ));
    }
    if parse_literal_date(name).is_some() {
        return Err(Violation::new(
            kind,
            name,
            format!("Trigger name '{}' should not look like a date", name),
        ));
    }
    ctx.date_field(kind, name, "date", &trigger.date)?;
    Ok(())
}
