//! `stockbook-ledger`: the stock ledger.
//!
//! Owns the drink and ingredient collections, keeps their derived fields
//! consistent on every mutation, and persists each collection as one blob in a
//! [`KeyValueStore`](stockbook_storage::KeyValueStore).

pub mod clock;
pub mod demo;
pub mod error;
pub mod ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{DEFAULT_NAMESPACE, Ledger, LedgerRecord, Snapshot};
