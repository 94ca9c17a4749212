//! Schema migration
//!
//! Persisted documents carry the schema `version` they were saved under.
//! [`migrate`] folds the per-version steps over the raw JSON document, from
//! the declared version up to [`CURRENT_VERSION`], then reads the result as
//! a [`Model`]. Each step takes a valid version-N document to a valid
//! version-(N+1) document and knows nothing about the others.
//!
//! A document from a newer version of the app is refused before any step
//! runs. Documents already at the current version pass through unchanged.

mod steps;

#[cfg(test)]
mod fixtures;

use serde_json::{Map, Value};

use crate::error::{MigrationError, PlanResult};
use crate::models::Model;
use crate::resolver::Resolver;

/// The schema version this build reads and writes
pub const CURRENT_VERSION: u32 = 14;

/// Top-level collections every document must carry
const COLLECTIONS: [&str; 6] = [
    "triggers",
    "settings",
    "assets",
    "incomes",
    "expenses",
    "transactions",
];

/// What a step may consult besides the document itself
pub struct StepContext<'r> {
    resolver: &'r Resolver,
}

impl<'r> StepContext<'r> {
    pub fn new(resolver: &'r Resolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        self.resolver
    }
}

/// Takes a version-N document to version N+1
type Step = fn(Value, &StepContext<'_>) -> Value;

/// `STEPS[n]` upgrades a version-n document
const STEPS: [Step; CURRENT_VERSION as usize] = [
    steps::type_transactions,
    steps::flag_debts,
    steps::fold_duplicate_settings,
    steps::add_asset_quantities,
    steps::add_flow_defaults,
    steps::add_view_range,
    steps::add_birth_date,
    steps::type_settings,
    steps::renumber_revaluations,
    steps::add_value_focus_date,
    steps::drop_chart_focus_settings,
    steps::add_monitors,
    steps::add_generators_and_monitor_range,
    steps::fill_eras,
];

/// The version a document declares; absent or null means 0
pub fn declared_version(doc: &Value) -> Result<u32, MigrationError> {
    let object = doc
        .as_object()
        .ok_or_else(|| MigrationError::Malformed("document is not a JSON object".into()))?;
    let found = match object.get("version") {
        None | Some(Value::Null) => return Ok(0),
        Some(version) => version.as_u64().ok_or_else(|| {
            MigrationError::Malformed(format!(
                "version {} is not a non-negative integer",
                version
            ))
        })?,
    };
    if found > u64::from(CURRENT_VERSION) {
        return Err(MigrationError::FromTheFuture {
            found,
            current: CURRENT_VERSION,
        });
    }
    // Bounded by CURRENT_VERSION above
    Ok(found as u32)
}

/// Bring a raw document up to the current schema, still as JSON
pub fn migrate_document(doc: Value, resolver: &Resolver) -> Result<Value, MigrationError> {
    let version = declared_version(&doc).map_err(|e| {
        tracing::warn!(error = %e, "refusing to migrate document");
        e
    })?;

    let ctx = StepContext::new(resolver);
    let doc = ensure_collections(doc);
    let migrated = STEPS
        .iter()
        .enumerate()
        .skip(version as usize)
        .fold(doc, |doc, (from, step)| {
            tracing::debug!(from, to = from + 1, "applying migration step");
            let mut next = step(doc, &ctx);
            set_version(&mut next, from as u32 + 1);
            next
        });

    if version < CURRENT_VERSION {
        tracing::info!(from = version, to = CURRENT_VERSION, "migrated document");
    }
    Ok(migrated)
}

/// Bring a raw document up to the current schema and read it as a model
pub fn migrate(doc: Value, resolver: &Resolver) -> Result<Model, MigrationError> {
    let migrated = migrate_document(doc, resolver)?;
    serde_json::from_value(migrated).map_err(|e| {
        tracing::warn!(error = %e, "migrated document does not describe a model");
        MigrationError::Malformed(e.to_string())
    })
}

/// Parse and migrate a JSON document
pub fn migrate_str(json: &str, resolver: &Resolver) -> PlanResult<Model> {
    let doc: Value = serde_json::from_str(json)?;
    Ok(migrate(doc, resolver)?)
}

fn ensure_collections(mut doc: Value) -> Value {
    if let Some(object) = doc.as_object_mut() {
        fill_missing(object, "name", Value::String(String::new()));
        for key in COLLECTIONS {
            fill_missing(object, key, Value::Array(Vec::new()));
        }
    }
    doc
}

fn fill_missing(object: &mut Map<String, Value>, key: &str, value: Value) {
    if object.get(key).map_or(true, Value::is_null) {
        object.insert(key.to_string(), value);
    }
}

fn set_version(doc: &mut Value, version: u32) {
    if let Some(object) = doc.as_object_mut() {
        object.insert("version".to_string(), Value::from(version));
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::fixture;
    use super::*;
    use crate::error::PlanError;
    use crate::validation::{check_model, validate};
    use serde_json::json;

    #[test]
    fn test_every_historical_version_migrates_to_a_valid_model() {
        let resolver = Resolver::default();
        for version in 0..CURRENT_VERSION {
            let model = migrate(fixture(version), &resolver)
                .unwrap_or_else(|e| panic!("v{} failed to migrate: {}", version, e));
            assert_eq!(model.version, CURRENT_VERSION);
            assert_eq!(
                check_model(&model, &resolver),
                "",
                "v{} migrated to an invalid model",
                version
            );
        }
    }

    #[test]
    fn test_historical_versions_agree() {
        let resolver = Resolver::default();
        let current = migrate(fixture(CURRENT_VERSION), &resolver).unwrap();
        for version in [2, 5, 9, 13] {
            let migrated = migrate(fixture(version), &resolver).unwrap();
            assert_eq!(migrated.transactions, current.transactions, "v{}", version);
            assert_eq!(migrated.incomes, current.incomes, "v{}", version);
        }
    }

    #[test]
    fn test_current_document_is_unchanged() {
        let resolver = Resolver::default();
        let doc = fixture(CURRENT_VERSION);
        assert_eq!(migrate_document(doc.clone(), &resolver).unwrap(), doc);
    }

    #[test]
    fn test_migration_is_idempotent() {
        let resolver = Resolver::default();
        let once = migrate(fixture(0), &resolver).unwrap();
        let saved = serde_json::to_value(&once).unwrap();
        let twice = migrate(saved, &resolver).unwrap();
        assert_eq!(once, twice);
        assert_eq!(validate(&twice, &resolver), Ok(()));
    }

    #[test]
    fn test_future_version_is_refused() {
        let resolver = Resolver::default();
        let mut doc = fixture(CURRENT_VERSION);
        doc["version"] = json!(CURRENT_VERSION + 1);

        let err = migrate(doc, &resolver).unwrap_err();
        assert_eq!(
            err.to_string(),
            "this data (v 15) was saved with a newer version of the app (v 14) — please upgrade the app"
        );
    }

    #[test]
    fn test_malformed_documents() {
        let resolver = Resolver::default();
        assert!(matches!(
            migrate(json!([1, 2, 3]), &resolver),
            Err(MigrationError::Malformed(_))
        ));
        assert!(matches!(
            migrate(json!({"name": "x", "version": "three"}), &resolver),
            Err(MigrationError::Malformed(_))
        ));
        assert!(matches!(
            migrate(json!({"name": "x", "version": 14, "assets": [{"NAME": 3}]}), &resolver),
            Err(MigrationError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_version_is_zero() {
        let resolver = Resolver::default();
        let mut doc = fixture(0);
        doc.as_object_mut().unwrap().remove("version");
        assert_eq!(declared_version(&doc), Ok(0));
        assert!(migrate(doc, &resolver).is_ok());
    }

    #[test]
    fn test_migrate_str() {
        let resolver = Resolver::default();
        let err = migrate_str("{not json", &resolver).unwrap_err();
        assert!(matches!(err, PlanError::Json(_)));

        let model = migrate_str(r#"{"name": "Empty", "version": 14}"#, &resolver).unwrap();
        assert_eq!(model.name, "Empty");
        assert!(model.assets.is_empty());
    }
}
