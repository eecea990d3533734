//! Stock ledger: CRUD + per-intent commands over the two record collections.

use std::sync::Arc;

use stockbook_core::{Entity, RecordId};
use stockbook_inventory::{
    Drink, DrinkCommand, Ingredient, IngredientCommand, RecordKind, StockRecord,
};
use stockbook_storage::{KeyValueStore, StorageError};

use crate::clock::{Clock, SystemClock};
use crate::demo;
use crate::error::{LedgerError, LedgerResult};

/// Key prefix used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "london-food";

/// Read-only copy of both collections, in persisted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub drinks: Vec<Drink>,
    pub ingredients: Vec<Ingredient>,
}

/// A record kind the ledger holds a collection of.
pub trait LedgerRecord: StockRecord {
    fn collection(snapshot: &Snapshot) -> &Vec<Self>;
    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;
}

impl LedgerRecord for Drink {
    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.drinks
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.drinks
    }
}

impl LedgerRecord for Ingredient {
    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.ingredients
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.ingredients
    }
}

/// The stock ledger.
///
/// Every mutation validates, recomputes derived fields, stamps `lastUpdated`,
/// and writes the whole collection before touching in-memory state. A failed
/// call leaves the ledger exactly as it was.
pub struct Ledger<S> {
    store: S,
    namespace: String,
    clock: Arc<dyn Clock>,
    state: Snapshot,
}

impl<S> core::fmt::Debug for Ledger<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ledger")
            .field("namespace", &self.namespace)
            .field("drinks", &self.state.drinks.len())
            .field("ingredients", &self.state.ingredients.len())
            .finish()
    }
}

impl<S: KeyValueStore> Ledger<S> {
    /// Open a ledger over `store` using the default namespace.
    pub fn open(store: S) -> LedgerResult<Self> {
        Self::open_with(store, DEFAULT_NAMESPACE, Arc::new(SystemClock))
    }

    pub fn open_with(
        store: S,
        namespace: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> LedgerResult<Self> {
        let mut ledger = Self {
            store,
            namespace: namespace.into(),
            clock,
            state: Snapshot::default(),
        };
        ledger.reload()?;
        Ok(ledger)
    }

    /// Discard in-memory state and read both collections back from the store.
    ///
    /// Derived fields are recomputed from the loaded source fields; stored
    /// derived values are ignored.
    pub fn reload(&mut self) -> LedgerResult<()> {
        let drinks = self.load::<Drink>()?;
        let ingredients = self.load::<Ingredient>()?;
        tracing::debug!(
            namespace = %self.namespace,
            drinks = drinks.len(),
            ingredients = ingredients.len(),
            "ledger loaded"
        );
        self.state = Snapshot { drinks, ingredients };
        Ok(())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Storage key of the blob holding `kind`'s collection.
    pub fn storage_key(&self, kind: RecordKind) -> String {
        format!("{}-{}", self.namespace, kind.collection_name())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.clone()
    }

    /// All records of one kind, in persisted order.
    pub fn list<R: LedgerRecord>(&self) -> &[R] {
        R::collection(&self.state)
    }

    pub fn get<R: LedgerRecord>(&self, id: &RecordId) -> LedgerResult<&R> {
        R::collection(&self.state)
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| LedgerError::not_found(R::KIND, id))
    }

    /// Insert or replace by id.
    ///
    /// Every non-derived field of `record` is taken as a source value;
    /// caller-supplied derived values are overwritten.
    pub fn upsert<R: LedgerRecord>(&mut self, mut record: R) -> LedgerResult<R> {
        self.prepare(&mut record)?;

        let mut next = R::collection(&self.state).clone();
        match next.iter().position(|r| r.id() == record.id()) {
            Some(index) => next[index] = record.clone(),
            None => next.push(record.clone()),
        }

        self.commit(next)?;
        tracing::info!(kind = %R::KIND, id = %record.id(), "record saved");
        Ok(record)
    }

    /// Remove by id. Deleting an absent id is a no-op.
    pub fn delete<R: LedgerRecord>(&mut self, id: &RecordId) -> LedgerResult<()> {
        let current = R::collection(&self.state);
        if !current.iter().any(|r| r.id() == id) {
            tracing::debug!(kind = %R::KIND, %id, "delete of absent record ignored");
            return Ok(());
        }

        let next: Vec<R> = current.iter().filter(|r| r.id() != id).cloned().collect();
        self.commit(next)?;
        tracing::info!(kind = %R::KIND, %id, "record deleted");
        Ok(())
    }

    /// Apply one mutation intent to the stored record `id`.
    pub fn execute<R: LedgerRecord>(
        &mut self,
        id: &RecordId,
        command: &R::Command,
    ) -> LedgerResult<R> {
        let mut record = self.get::<R>(id)?.clone();
        record.apply(command);
        tracing::debug!(kind = %R::KIND, %id, ?command, "applying command");
        self.upsert(record)
    }

    pub fn revise_drink_initial_stock(&mut self, id: &RecordId, value: f64) -> LedgerResult<Drink> {
        self.execute::<Drink>(id, &DrinkCommand::ReviseInitialStock(value))
    }

    /// Leaves `actualRemaining` at the last recorded count.
    pub fn revise_sold(&mut self, id: &RecordId, value: f64) -> LedgerResult<Drink> {
        self.execute::<Drink>(id, &DrinkCommand::ReviseSold(value))
    }

    pub fn record_actual_count(&mut self, id: &RecordId, value: f64) -> LedgerResult<Drink> {
        let drink = self.execute::<Drink>(id, &DrinkCommand::RecordActualCount(value))?;
        if drink.has_shortage() {
            tracing::warn!(%id, discrepancy = drink.discrepancy(), "stock count shows shortage");
        }
        Ok(drink)
    }

    pub fn revise_ingredient_initial_stock(
        &mut self,
        id: &RecordId,
        value: f64,
    ) -> LedgerResult<Ingredient> {
        self.execute::<Ingredient>(id, &IngredientCommand::ReviseInitialStock(value))
    }

    pub fn revise_used(&mut self, id: &RecordId, value: f64) -> LedgerResult<Ingredient> {
        self.execute::<Ingredient>(id, &IngredientCommand::ReviseUsed(value))
    }

    /// Replace both collections with the bundled sample data.
    ///
    /// Drinks are written first; if the ingredient write fails the drinks
    /// blob is restored.
    pub fn load_demo_data(&mut self) -> LedgerResult<()> {
        let now = self.clock.now();
        let mut drinks = demo::drinks();
        let mut ingredients = demo::ingredients();
        for d in &mut drinks {
            d.recompute();
            d.stamp(now);
        }
        for i in &mut ingredients {
            i.recompute();
            i.stamp(now);
        }

        let previous = self.state.drinks.clone();
        self.commit(drinks)?;
        if let Err(err) = self.commit(ingredients) {
            if let Err(restore) = self.commit(previous) {
                tracing::error!(%restore, "failed to restore drinks after demo load failure");
            }
            return Err(err);
        }
        tracing::info!("demo data loaded");
        Ok(())
    }

    fn prepare<R: LedgerRecord>(&self, record: &mut R) -> LedgerResult<()> {
        if let Err(err) = record.validate() {
            tracing::warn!(kind = %R::KIND, id = %record.id(), %err, "record rejected");
            return Err(err.into());
        }
        record.recompute();
        record.stamp(self.clock.now());
        Ok(())
    }

    fn load<R: LedgerRecord>(&self) -> LedgerResult<Vec<R>> {
        let key = self.storage_key(R::KIND);
        let Some(blob) = self.store.get(&key)? else {
            return Ok(Vec::new());
        };

        let mut records: Vec<R> = serde_json::from_str(&blob)
            .map_err(|e| StorageError::corrupt(&key, e.to_string()))?;
        for record in &mut records {
            record.recompute();
        }
        Ok(records)
    }

    fn commit<R: LedgerRecord>(&mut self, next: Vec<R>) -> LedgerResult<()> {
        let key = self.storage_key(R::KIND);
        let blob = serde_json::to_string(&next)
            .map_err(|e| StorageError::corrupt(&key, e.to_string()))?;

        if let Err(err) = self.store.set(&key, &blob) {
            tracing::error!(%key, %err, "failed to persist collection");
            return Err(err.into());
        }

        *R::collection_mut(&mut self.state) = next;
        Ok(())
    }
}
