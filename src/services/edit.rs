//! Edit service
//!
//! The only way records enter or leave a model. Each edit is applied to a
//! candidate copy, the whole candidate is validated, and only a valid
//! candidate replaces the model. The replaced state is kept for undo.

use crate::audit::{generate_diff, AuditEntry};
use crate::error::{PlanError, PlanResult};
use crate::models::{
    Asset, EntityKind, Expense, Generator, Income, Model, Monitor, Record, Setting, Transaction,
    Trigger,
};
use crate::resolver::Resolver;
use crate::validation::validate;

/// Service for submitting and deleting records
pub struct EditService<'a> {
    model: &'a mut Model,
    resolver: &'a Resolver,
}

impl<'a> EditService<'a> {
    /// Create a new edit service over a model
    pub fn new(model: &'a mut Model, resolver: &'a Resolver) -> Self {
        Self { model, resolver }
    }

    pub fn model(&self) -> &Model {
        self.model
    }

    /// Insert a record, or replace the record with the same name
    pub fn submit<R: Record>(&mut self, record: R) -> PlanResult<AuditEntry> {
        let kind = record.kind();
        let name = record.name().to_string();

        let mut candidate = self.model.snapshot();
        let collection = R::collection_mut(&mut candidate);
        let previous = match collection.iter().position(|r| r.name() == name) {
            Some(index) => Some(std::mem::replace(&mut collection[index], record.clone())),
            None => {
                collection.push(record.clone());
                None
            }
        };

        self.commit(candidate)?;

        let entry = match previous {
            Some(before) => {
                let diff = generate_diff(
                    &serde_json::to_value(&before)?,
                    &serde_json::to_value(&record)?,
                );
                AuditEntry::update(kind, &name, &before, &record, diff)
            }
            None => AuditEntry::create(kind, &name, &record),
        };
        tracing::info!(model = %self.model.name, "committed {}", entry);
        Ok(entry)
    }

    pub fn submit_trigger(&mut self, trigger: Trigger) -> PlanResult<AuditEntry> {
        self.submit(trigger)
    }

    pub fn submit_setting(&mut self, setting: Setting) -> PlanResult<AuditEntry> {
        self.submit(setting)
    }

    /// Submit an asset or debt
    pub fn submit_asset(&mut self, asset: Asset) -> PlanResult<AuditEntry> {
        self.submit(asset)
    }

    pub fn submit_income(&mut self, income: Income) -> PlanResult<AuditEntry> {
        self.submit(income)
    }

    pub fn submit_expense(&mut self, expense: Expense) -> PlanResult<AuditEntry> {
        self.submit(expense)
    }

    pub fn submit_transaction(&mut self, transaction: Transaction) -> PlanResult<AuditEntry> {
        self.submit(transaction)
    }

    /// Remove the record of this kind and name
    pub fn delete(&mut self, kind: EntityKind, name: &str) -> PlanResult<AuditEntry> {
        match kind {
            EntityKind::Trigger => self.remove::<Trigger>(kind, name),
            EntityKind::Setting => self.remove::<Setting>(kind, name),
            EntityKind::Asset | EntityKind::Debt => self.remove::<Asset>(kind, name),
            EntityKind::Income => self.remove::<Income>(kind, name),
            EntityKind::Expense => self.remove::<Expense>(kind, name),
            EntityKind::Transaction => self.remove::<Transaction>(kind, name),
            EntityKind::Monitor => self.remove::<Monitor>(kind, name),
            EntityKind::Generator => self.remove::<Generator>(kind, name),
            EntityKind::Model => Err(PlanError::not_found(kind, name)),
        }
    }

    fn remove<R: Record>(&mut self, kind: EntityKind, name: &str) -> PlanResult<AuditEntry> {
        let mut candidate = self.model.snapshot();
        let collection = R::collection_mut(&mut candidate);
        let index = collection
            .iter()
            .position(|r| r.name() == name && r.kind() == kind)
            .ok_or_else(|| PlanError::not_found(kind, name))?;
        let removed = collection.remove(index);

        self.commit(candidate)?;

        let entry = AuditEntry::delete(kind, name, &removed);
        tracing::info!(model = %self.model.name, "committed {}", entry);
        Ok(entry)
    }

    fn commit(&mut self, candidate: Model) -> PlanResult<()> {
        validate(&candidate, self.resolver).map_err(|violation| {
            tracing::debug!(model = %self.model.name, "edit rejected: {}", violation);
            PlanError::Validation(violation)
        })?;
        self.model.commit(candidate);
        Ok(())
    }

    /// Restore the state before the last committed edit
    pub fn undo(&mut self) -> bool {
        let undone = self.model.undo();
        if undone {
            tracing::info!(model = %self.model.name, "undid last edit");
        }
        undone
    }

    /// Reapply the last undone edit
    pub fn redo(&mut self) -> bool {
        let redone = self.model.redo();
        if redone {
            tracing::info!(model = %self.model.name, "redid last edit");
        }
        redone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::validation::test_models::valid_model;

    #[test]
    fn test_submit_new_record() {
        let mut model = valid_model();
        let resolver = Resolver::default();
        let mut service = EditService::new(&mut model, &resolver);

        let entry = service
            .submit_asset(Asset::new("Car", "1 Jan 2020", "8000"))
            .unwrap();
        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.kind, EntityKind::Asset);
        assert!(service.model().find_asset("Car").is_some());
        assert!(service.model().can_undo());
    }

    #[test]
    fn test_submit_replaces_by_name() {
        let mut model = valid_model();
        let resolver = Resolver::default();
        let mut service = EditService::new(&mut model, &resolver);

        let entry = service
            .submit_trigger(Trigger::new("Retire", "1 Jan 2045"))
            .unwrap();
        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("DATE: \"1 Jan 2040\" -> \"1 Jan 2045\"")
        );
        assert_eq!(service.model().triggers.len(), 2);
    }

    #[test]
    fn test_rejected_edit_leaves_model_unchanged() {
        let mut model = valid_model();
        let before = model.clone();
        let resolver = Resolver::default();
        let mut service = EditService::new(&mut model, &resolver);

        let err = service
            .submit_asset(Asset::new("ISA", "1 Jan 2019", "1").with_liability("nonsense"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Asset 'ISA' liability 'nonsense' should end with (CGT) or (incomeTax)"
        );
        assert_eq!(model, before);
    }

    #[test]
    fn test_delete() {
        let mut model = valid_model();
        let resolver = Resolver::default();
        let mut service = EditService::new(&mut model, &resolver);

        let entry = service.delete(EntityKind::Transaction, "Save").unwrap();
        assert_eq!(entry.operation, Operation::Delete);
        assert!(service.model().find_transaction("Save").is_none());

        let err = service.delete(EntityKind::Debt, "ISA").unwrap_err();
        assert!(err.is_not_found());

        // Salary ends on Retire, so the trigger cannot go
        let err = service.delete(EntityKind::Trigger, "Retire").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_undo_redo() {
        let mut model = valid_model();
        let resolver = Resolver::default();
        let mut service = EditService::new(&mut model, &resolver);

        service
            .submit_setting(Setting::new("Inflation", "3"))
            .unwrap();
        assert!(service.undo());
        assert!(service.model().find_setting("Inflation").is_none());
        assert!(!service.undo());
        assert!(service.redo());
        assert!(service.model().find_setting("Inflation").is_some());
        assert!(!service.redo());
    }
}
