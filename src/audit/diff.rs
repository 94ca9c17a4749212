//! Change detection between records and between whole models
//!
//! `generate_diff` describes field changes between two JSON records.
//! `diff_models` lists which records were added, removed or changed, matching
//! records by kind and name. ERA is an ordinary field here, so a change of
//! era alone counts as a change.

use serde::Serialize;
use serde_json::Value;

use crate::models::{
    Asset, EntityKind, Expense, Generator, Income, Model, Monitor, Record, Setting, Transaction,
    Trigger,
};

/// Summarize top-level field changes between two JSON records
///
/// Fields are listed in key order, changed or removed first, then added.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let changed = old.iter().filter_map(|(field, was)| match new.get(field) {
                Some(now) if now == was => None,
                Some(now) => Some(format!("{}: {} -> {}", field, show(was), show(now))),
                None => Some(format!("{}: {} -> (removed)", field, show(was))),
            });
            let added = new
                .iter()
                .filter(|(field, _)| !old.contains_key(*field))
                .map(|(field, now)| format!("{}: (added) -> {}", field, show(now)));
            changed.chain(added).collect()
        }
        _ if before == after => Vec::new(),
        _ => vec![format!("{} -> {}", show(before), show(after))],
    };
    (!changes.is_empty()).then(|| changes.join(", "))
}

/// Longest string shown in full
const SHOWN_CHARS: usize = 50;

fn show(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > SHOWN_CHARS => {
            let head: String = s.chars().take(SHOWN_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

/// How one record differs between two models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added,
    Removed,
    /// Field-level summary from [`generate_diff`]
    Changed(String),
}

/// One record that differs between two models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChange {
    pub kind: EntityKind,
    pub name: String,
    pub change: Change,
}

fn to_json<T: Serialize>(record: &T) -> Value {
    serde_json::to_value(record).unwrap_or_default()
}

fn diff_collection<R: Record>(before: &Model, after: &Model, changes: &mut Vec<ModelChange>) {
    let old = R::collection(before);
    let new = R::collection(after);

    for record in old {
        match new.iter().find(|r| r.name() == record.name()) {
            None => changes.push(ModelChange {
                kind: record.kind(),
                name: record.name().to_string(),
                change: Change::Removed,
            }),
            Some(updated) => {
                if let Some(summary) = generate_diff(&to_json(record), &to_json(updated)) {
                    changes.push(ModelChange {
                        kind: updated.kind(),
                        name: updated.name().to_string(),
                        change: Change::Changed(summary),
                    });
                }
            }
        }
    }
    for record in new {
        if !old.iter().any(|r| r.name() == record.name()) {
            changes.push(ModelChange {
                kind: record.kind(),
                name: record.name().to_string(),
                change: Change::Added,
            });
        }
    }
}

/// Every record added, removed or changed going from `before` to `after`
pub fn diff_models(before: &Model, after: &Model) -> Vec<ModelChange> {
    let mut changes = Vec::new();
    diff_collection::<Trigger>(before, after, &mut changes);
    diff_collection::<Setting>(before, after, &mut changes);
    diff_collection::<Asset>(before, after, &mut changes);
    diff_collection::<Income>(before, after, &mut changes);
    diff_collection::<Expense>(before, after, &mut changes);
    diff_collection::<Transaction>(before, after, &mut changes);
    diff_collection::<Monitor>(before, after, &mut changes);
    diff_collection::<Generator>(before, after, &mut changes);
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_diff() {
        let before = json!({"NAME": "ISA", "VALUE": "1000"});
        let after = json!({"NAME": "ISA", "VALUE": "1500"});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "VALUE: \"1000\" -> \"1500\"");
    }

    #[test]
    fn test_no_changes() {
        let before = json!({"NAME": "ISA"});
        assert!(generate_diff(&before, &before.clone()).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"NAME": "ISA", "HINT": "x"});
        let after = json!({"NAME": "ISA", "ERA": 1});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("HINT: \"x\" -> (removed)"));
        assert!(diff.contains("ERA: (added) -> 1"));
    }

    #[test]
    fn test_long_string_truncation() {
        let long_string = "é".repeat(100);
        let before = json!({"HINT": "short"});
        let after = json!({"HINT": long_string});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("..."));
    }

    #[test]
    fn test_diff_models() {
        let mut before = Model::new("Plan", 14);
        before.triggers.push(Trigger::new("Retire", "1 Jan 2040"));
        before.assets.push(Asset::debt("Loan", "1 Jan 2019", "-500"));
        before.settings.push(Setting::new("cpi", "2.5"));

        let mut after = before.clone();
        after.triggers[0].era = Some(2);
        after.assets.clear();
        after.incomes.push(Income::new("Salary", "1 Jan 2019", "Retire", "3000"));

        let changes = diff_models(&before, &after);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].kind, EntityKind::Trigger);
        assert_eq!(changes[0].change, Change::Changed("ERA: null -> 2".into()));
        assert_eq!(
            changes[1],
            ModelChange {
                kind: EntityKind::Debt,
                name: "Loan".into(),
                change: Change::Removed,
            }
        );
        assert_eq!(changes[2].change, Change::Added);
        assert_eq!(changes[2].name, "Salary");
    }

    #[test]
    fn test_identical_models_have_no_changes() {
        let model = crate::validation::test_models::valid_model();
        assert!(diff_models(&model, &model.snapshot()).is_empty());
    }
}
