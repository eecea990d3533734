//! Service wiring: the shared ledger plus report composition settings.

use std::sync::{Arc, Mutex};

use stockbook_ledger::{Ledger, LedgerResult, SystemClock};
use stockbook_reports::MessageComposer;
use stockbook_storage::{InMemoryStore, KeyValueStore, SqliteStore, StorageError};

use crate::config::AppConfig;

pub type DynLedger = Ledger<Box<dyn KeyValueStore>>;

/// Application services shared by every handler.
///
/// The ledger is synchronous (and the SQLite backend blocks), so all access
/// goes through [`AppServices::with_ledger`], which runs on the blocking pool.
#[derive(Debug)]
pub struct AppServices {
    ledger: Arc<Mutex<DynLedger>>,
    pub composer: MessageComposer,
    pub whatsapp_phone: String,
}

impl AppServices {
    /// Open the configured backend and load both collections.
    pub async fn open(config: &AppConfig) -> LedgerResult<Self> {
        let database_url = config.database_url.clone();
        let namespace = config.namespace.clone();

        let ledger = tokio::task::spawn_blocking(move || -> LedgerResult<DynLedger> {
            let store: Box<dyn KeyValueStore> = match database_url {
                Some(url) => {
                    tracing::info!(%url, "using sqlite storage");
                    Box::new(SqliteStore::open(&url)?)
                }
                None => {
                    tracing::info!("using in-memory storage");
                    Box::new(InMemoryStore::new())
                }
            };
            Ledger::open_with(store, namespace, Arc::new(SystemClock))
        })
        .await
        .map_err(|e| StorageError::unavailable(format!("ledger open task failed: {e}")))??;

        Ok(Self {
            ledger: Arc::new(Mutex::new(ledger)),
            composer: MessageComposer::new(config.restaurant_name.clone()),
            whatsapp_phone: config.whatsapp_phone.clone(),
        })
    }

    /// Run `f` against the ledger on the blocking pool.
    pub async fn with_ledger<T, F>(&self, f: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut DynLedger) -> LedgerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let ledger = Arc::clone(&self.ledger);
        tokio::task::spawn_blocking(move || {
            let mut guard = ledger
                .lock()
                .map_err(|_| StorageError::unavailable("ledger lock poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| StorageError::unavailable(format!("ledger task failed: {e}")))?
    }
}
