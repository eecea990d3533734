//! Read-only consumers of ledger snapshots: summaries, messaging deep links and
//! tabular exports.
//!
//! Nothing here mutates records; every function takes slices of already
//! reconciled drinks and ingredients.

pub mod document;
pub mod labels;
pub mod message;
pub mod summary;

pub use document::{Column, ReportError, TabularDocument};
pub use message::{MessageComposer, ReportPeriod, whatsapp_link};
pub use summary::{ChartPoint, InventorySummary, LowStockItem, dashboard_alerts};

/// Render a quantity the way the messages and exports always have: integers
/// without a fractional part, no negative zero.
pub fn format_quantity(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
