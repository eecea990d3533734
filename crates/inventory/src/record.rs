//! Behaviour shared by every stock-keeping record kind.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use stockbook_core::{DomainError, DomainResult, Entity, RecordId};

/// The two trackable record kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Drink,
    Ingredient,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Drink => "drink",
            RecordKind::Ingredient => "ingredient",
        }
    }

    /// Suffix of the persisted blob key holding the whole collection.
    pub fn collection_name(&self) -> &'static str {
        match self {
            RecordKind::Drink => "drinks",
            RecordKind::Ingredient => "ingredients",
        }
    }
}

impl core::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record the ledger can hold.
///
/// Derived fields are never written by callers: `recompute` rebuilds them from
/// the record's source fields and is the only way they change.
pub trait StockRecord:
    Entity<Id = RecordId> + Clone + core::fmt::Debug + Serialize + DeserializeOwned + Send + Sync
{
    /// Mutation intents accepted for this kind.
    type Command: Clone + core::fmt::Debug;

    const KIND: RecordKind;

    fn name(&self) -> &str;

    /// Reject records that must never be persisted.
    fn validate(&self) -> DomainResult<()>;

    /// Rebuild every derived field from the source fields.
    fn recompute(&mut self);

    /// Set a single source field. Callers recompute afterwards.
    fn apply(&mut self, command: &Self::Command);

    fn last_updated(&self) -> DateTime<Utc>;

    fn stamp(&mut self, at: DateTime<Utc>);
}

pub(crate) fn ensure_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}

pub(crate) fn ensure_quantity(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}
