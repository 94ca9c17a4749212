//! One function per schema version
//!
//! Each step is total: fields it expects but does not find are left alone,
//! and records that are not JSON objects are skipped.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::StepContext;
use crate::models::keywords::{
    is_deprecated_setting, BIRTH_DATE, CPI, LEGACY_CPI, MONITOR_RANGE_END, MONITOR_RANGE_START,
    REVALUE_PREFIX, VALUE_FOCUS_DATE, VIEW_RANGE_END, VIEW_RANGE_START,
};
use crate::models::{EntityKind, TransactionType, Trigger};

/// "Revalue ISA 7": an auto-generated revaluation with its counter
static NUMBERED_REVALUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Revalue .+) (\d+)$").expect("numbered revaluation pattern is valid")
});

const DEFAULT_VIEW_START: &str = "1 Jan 2019";
const DEFAULT_VIEW_END: &str = "1 Jan 2029";

fn records<'d>(doc: &'d Value, key: &str) -> impl Iterator<Item = &'d Map<String, Value>> {
    doc.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn records_mut<'d>(
    doc: &'d mut Value,
    key: &str,
) -> impl Iterator<Item = &'d mut Map<String, Value>> {
    doc.get_mut(key)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
}

fn text<'r>(record: &'r Map<String, Value>, field: &str) -> &'r str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

/// Insert `value` when the field is absent or null
fn fill(record: &mut Map<String, Value>, field: &str, value: Value) {
    if record.get(field).map_or(true, Value::is_null) {
        record.insert(field.to_string(), value);
    }
}

fn names(doc: &Value, key: &str) -> HashSet<String> {
    records(doc, key).map(|r| text(r, "NAME").to_string()).collect()
}

fn setting_value<'d>(doc: &'d Value, name: &str) -> Option<&'d str> {
    records(doc, "settings")
        .find(|s| text(s, "NAME") == name)
        .map(|s| text(s, "VALUE"))
}

/// Append a view setting unless one with this name already exists
fn backfill_view_setting(doc: &mut Value, name: &str, value: &str, hint: &str) {
    if setting_value(doc, name).is_some() {
        return;
    }
    if let Some(settings) = doc.get_mut("settings").and_then(Value::as_array_mut) {
        settings.push(json!({
            "NAME": name,
            "VALUE": value,
            "HINT": hint,
            "TYPE": "view",
        }));
    }
}

/// v0: transactions gain a TYPE, a RECURRENCE and absolute flags
pub(super) fn type_transactions(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    let debts: HashSet<String> = records(&doc, "assets")
        .filter(|a| a.get("IS_A_DEBT").and_then(Value::as_bool).unwrap_or(false))
        .map(|a| text(a, "NAME").to_string())
        .collect();
    let assets = names(&doc, "assets");
    let incomes = names(&doc, "incomes");
    let expenses = names(&doc, "expenses");
    let settings = names(&doc, "settings");

    for t in records_mut(&mut doc, "transactions") {
        if t.get("TYPE").map_or(true, Value::is_null) {
            let to = text(t, "TO");
            let target = if !text(t, "NAME").starts_with(REVALUE_PREFIX) {
                None
            } else if debts.contains(to) {
                Some(EntityKind::Debt)
            } else if assets.contains(to) {
                Some(EntityKind::Asset)
            } else if incomes.contains(to) {
                Some(EntityKind::Income)
            } else if expenses.contains(to) {
                Some(EntityKind::Expense)
            } else if settings.contains(to) {
                Some(EntityKind::Setting)
            } else {
                None
            };
            let ty = target
                .and_then(TransactionType::revaluing)
                .unwrap_or(TransactionType::Custom);
            t.insert("TYPE".into(), json!(ty.to_string()));
        }
        fill(t, "RECURRENCE", json!(""));
        fill(t, "FROM_ABSOLUTE", json!(true));
        fill(t, "TO_ABSOLUTE", json!(true));
    }
    doc
}

/// v1: assets learn whether they are debts
pub(super) fn flag_debts(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    for asset in records_mut(&mut doc, "assets") {
        fill(asset, "IS_A_DEBT", json!(false));
        fill(asset, "CAN_BE_NEGATIVE", json!(false));
    }
    doc
}

/// v2: a setting saved twice keeps its first value
pub(super) fn fold_duplicate_settings(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    if let Some(settings) = doc.get_mut("settings").and_then(Value::as_array_mut) {
        let mut seen = HashSet::new();
        settings.retain(|s| {
            let name = s.get("NAME").and_then(Value::as_str).unwrap_or("");
            seen.insert(name.to_string())
        });
    }
    doc
}

/// v3: assets gain quantities and purchase prices
pub(super) fn add_asset_quantities(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    for asset in records_mut(&mut doc, "assets") {
        fill(asset, "QUANTITY", json!(""));
        fill(asset, "PURCHASE_PRICE", json!(""));
    }
    doc
}

/// v4: incomes and expenses become monthly by default, valued at their start
pub(super) fn add_flow_defaults(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    for key in ["incomes", "expenses"] {
        for flow in records_mut(&mut doc, key) {
            fill(flow, "RECURRENCE", json!("1m"));
            let start = flow.get("START").cloned().unwrap_or(Value::Null);
            fill(flow, "VALUE_SET", start);
        }
    }
    doc
}

/// v5: the view range becomes mandatory
pub(super) fn add_view_range(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    backfill_view_setting(&mut doc, VIEW_RANGE_START, DEFAULT_VIEW_START, "Date at the start of range to be plotted");
    backfill_view_setting(&mut doc, VIEW_RANGE_END, DEFAULT_VIEW_END, "Date at the end of range to be plotted");
    doc
}

/// v6: a birth date, empty until the user sets one
pub(super) fn add_birth_date(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    backfill_view_setting(&mut doc, BIRTH_DATE, "", "Date used for representing dates as ages");
    doc
}

/// v7: settings gain a TYPE and HINT; the legacy CPI spelling goes
pub(super) fn type_settings(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    let has_cpi = setting_value(&doc, CPI).is_some();
    if has_cpi {
        if let Some(settings) = doc.get_mut("settings").and_then(Value::as_array_mut) {
            settings.retain(|s| s.get("NAME").and_then(Value::as_str) != Some(LEGACY_CPI));
        }
    }
    for setting in records_mut(&mut doc, "settings") {
        if text(setting, "NAME") == LEGACY_CPI {
            setting.insert("NAME".into(), json!(CPI));
        }
        fill(setting, "TYPE", json!("const"));
        fill(setting, "HINT", json!(""));
    }
    for asset in records_mut(&mut doc, "assets") {
        if text(asset, "GROWTH") == LEGACY_CPI {
            asset.insert("GROWTH".into(), json!(CPI));
        }
    }
    doc
}

/// v8: numbered revaluations are zero-padded once a series passes nine
pub(super) fn renumber_revaluations(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    let mut series: HashMap<String, usize> = HashMap::new();
    for t in records(&doc, "transactions") {
        if let Some(caps) = NUMBERED_REVALUATION.captures(text(t, "NAME")) {
            *series.entry(caps[1].to_string()).or_default() += 1;
        }
    }

    for t in records_mut(&mut doc, "transactions") {
        let renamed = NUMBERED_REVALUATION
            .captures(text(t, "NAME"))
            .and_then(|caps| {
                let count = series.get(&caps[1]).copied().unwrap_or(0);
                let counter: u64 = caps[2].parse().ok()?;
                (count > 9).then(|| {
                    let width = count.to_string().len().max(2);
                    format!("{} {:0width$}", &caps[1], counter, width = width)
                })
            });
        if let Some(name) = renamed {
            t.insert("NAME".into(), json!(name));
        }
    }
    doc
}

/// v9: the value focus date, empty meaning "today"
pub(super) fn add_value_focus_date(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    backfill_view_setting(&mut doc, VALUE_FOCUS_DATE, "", "Date to use for 'today' in value tables");
    doc
}

/// v10: per-chart focus settings are gone
pub(super) fn drop_chart_focus_settings(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    if let Some(settings) = doc.get_mut("settings").and_then(Value::as_array_mut) {
        settings.retain(|s| {
            !s.get("NAME")
                .and_then(Value::as_str)
                .is_some_and(is_deprecated_setting)
        });
    }
    doc
}

/// v11: monitors arrive
pub(super) fn add_monitors(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    if let Some(object) = doc.as_object_mut() {
        fill(object, "monitors", json!([]));
    }
    doc
}

/// v12: generators arrive, and the monitor range starts as the view range
pub(super) fn add_generators_and_monitor_range(mut doc: Value, ctx: &StepContext<'_>) -> Value {
    if let Some(object) = doc.as_object_mut() {
        fill(object, "generators", json!([]));
    }

    let triggers: Vec<Trigger> = doc
        .get("triggers")
        .cloned()
        .and_then(|t| serde_json::from_value(t).ok())
        .unwrap_or_default();
    let bound = |name: &str, fallback: &str| -> String {
        setting_value(&doc, name)
            .filter(|v| ctx.resolver().resolve_date(v, &triggers, None).is_ok())
            .unwrap_or(fallback)
            .to_string()
    };
    let start = bound(VIEW_RANGE_START, DEFAULT_VIEW_START);
    let end = bound(VIEW_RANGE_END, DEFAULT_VIEW_END);

    backfill_view_setting(&mut doc, MONITOR_RANGE_START, &start, "Date at the start of range to be monitored");
    backfill_view_setting(&mut doc, MONITOR_RANGE_END, &end, "Date at the end of range to be monitored");
    doc
}

/// v13: every record carries an ERA; remaining asset and flow defaults are filled
pub(super) fn fill_eras(mut doc: Value, _ctx: &StepContext<'_>) -> Value {
    for key in super::COLLECTIONS.iter().copied().chain(["generators"]) {
        for record in records_mut(&mut doc, key) {
            record.entry("ERA").or_insert(Value::Null);
        }
    }
    for asset in records_mut(&mut doc, "assets") {
        fill(asset, "CPI_IMMUNE", json!(false));
        fill(asset, "GROWTH", json!("0"));
    }
    for key in ["incomes", "expenses"] {
        for flow in records_mut(&mut doc, key) {
            fill(flow, "CPI_IMMUNE", json!(false));
        }
    }
    doc
}
