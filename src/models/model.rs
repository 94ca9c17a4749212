//! The model aggregate
//!
//! A model is a named, versioned set of seven ordered collections plus
//! one-level undo/redo snapshots. Snapshots are never persisted.

use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::income::{Expense, Income};
use super::keywords::CASH_ASSET_NAME;
use super::kind::EntityKind;
use super::monitor::{Generator, Monitor};
use super::setting::Setting;
use super::transaction::Transaction;
use super::trigger::Trigger;

/// A saved financial plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,

    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub triggers: Vec<Trigger>,

    #[serde(default)]
    pub settings: Vec<Setting>,

    #[serde(default)]
    pub assets: Vec<Asset>,

    #[serde(default)]
    pub incomes: Vec<Income>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub monitors: Vec<Monitor>,

    #[serde(default)]
    pub generators: Vec<Generator>,

    /// State before the last committed edit
    #[serde(skip)]
    undo: Option<Box<Model>>,

    /// State undone by the last undo
    #[serde(skip)]
    redo: Option<Box<Model>>,
}

impl Model {
    /// Create an empty model at the given schema version
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
            triggers: Vec::new(),
            settings: Vec::new(),
            assets: Vec::new(),
            incomes: Vec::new(),
            expenses: Vec::new(),
            transactions: Vec::new(),
            monitors: Vec::new(),
            generators: Vec::new(),
            undo: None,
            redo: None,
        }
    }

    pub fn find_trigger(&self, name: &str) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.name == name)
    }

    pub fn find_setting(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.name == name)
    }

    /// Find an asset or debt by name
    pub fn find_asset(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }

    pub fn find_income(&self, name: &str) -> Option<&Income> {
        self.incomes.iter().find(|i| i.name == name)
    }

    pub fn find_expense(&self, name: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.name == name)
    }

    pub fn find_transaction(&self, name: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.name == name)
    }

    /// Check if some asset (not debt) carries this category
    pub fn is_asset_category(&self, category: &str) -> bool {
        !category.is_empty()
            && self
                .assets
                .iter()
                .any(|a| !a.is_a_debt && a.category == category)
    }

    /// The start expression of the cash asset, if the model has one
    pub fn cash_start(&self) -> Option<&str> {
        self.find_asset(CASH_ASSET_NAME).map(|a| a.start.as_str())
    }

    /// Kinds of every entity (excluding monitors and generators) using `name`
    pub fn kinds_named(&self, name: &str) -> Vec<EntityKind> {
        let mut kinds = Vec::new();
        kinds.extend(
            self.triggers
                .iter()
                .filter(|t| t.name == name)
                .map(|_| EntityKind::Trigger),
        );
        kinds.extend(
            self.settings
                .iter()
                .filter(|s| s.name == name)
                .map(|_| EntityKind::Setting),
        );
        kinds.extend(
            self.assets
                .iter()
                .filter(|a| a.name == name)
                .map(Asset::entity_kind),
        );
        kinds.extend(
            self.incomes
                .iter()
                .filter(|i| i.name == name)
                .map(|_| EntityKind::Income),
        );
        kinds.extend(
            self.expenses
                .iter()
                .filter(|e| e.name == name)
                .map(|_| EntityKind::Expense),
        );
        kinds.extend(
            self.transactions
                .iter()
                .filter(|t| t.name == name)
                .map(|_| EntityKind::Transaction),
        );
        kinds
    }

    /// A copy of this model without its undo/redo snapshots
    pub fn snapshot(&self) -> Model {
        Model {
            undo: None,
            redo: None,
            ..self.clone()
        }
    }

    /// Replace this model with `next`, keeping the current state for undo
    pub fn commit(&mut self, next: Model) {
        let previous = self.snapshot();
        *self = next.snapshot();
        self.undo = Some(Box::new(previous));
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.redo.is_some()
    }

    /// Swap in the undo snapshot. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo.take() {
            Some(previous) => {
                let current = self.snapshot();
                *self = *previous;
                self.redo = Some(Box::new(current));
                true
            }
            None => false,
        }
    }

    /// Swap in the redo snapshot. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo.take() {
            Some(next) => {
                let current = self.snapshot();
                *self = *next;
                self.undo = Some(Box::new(current));
                true
            }
            None => false,
        }
    }
}

/// A record stored in one of the model's named collections
pub trait Record: Clone + Serialize {
    /// Kind used for the collection as a whole
    const KIND: EntityKind;

    fn name(&self) -> &str;

    /// Kind of this particular record (assets report Debt when flagged)
    fn kind(&self) -> EntityKind {
        Self::KIND
    }

    fn collection(model: &Model) -> &Vec<Self>;

    fn collection_mut(model: &mut Model) -> &mut Vec<Self>;
}

macro_rules! impl_record {
    ($ty:ty, $kind:expr, $field:ident) => {
        impl Record for $ty {
            const KIND: EntityKind = $kind;

            fn name(&self) -> &str {
                &self.name
            }

            fn collection(model: &Model) -> &Vec<Self> {
                &model.$field
            }

            fn collection_mut(model: &mut Model) -> &mut Vec<Self> {
                &mut model.$field
            }
        }
    };
}

impl_record!(Trigger, EntityKind::Trigger, triggers);
impl_record!(Setting, EntityKind::Setting, settings);
impl_record!(Income, EntityKind::Income, incomes);
impl_record!(Expense, EntityKind::Expense, expenses);
impl_record!(Transaction, EntityKind::Transaction, transactions);
impl_record!(Monitor, EntityKind::Monitor, monitors);
impl_record!(Generator, EntityKind::Generator, generators);

impl Record for Asset {
    const KIND: EntityKind = EntityKind::Asset;

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        self.entity_kind()
    }

    fn collection(model: &Model) -> &Vec<Self> {
        &model.assets
    }

    fn collection_mut(model: &mut Model) -> &mut Vec<Self> {
        &mut model.assets
    }
}
