use axum::Router;

use stockbook_core::RecordId;

use crate::app::errors;

pub mod drinks;
pub mod ingredients;
pub mod reports;
pub mod system;

/// Every ledger and report route; `/health` is mounted separately.
pub fn router() -> Router {
    Router::new()
        .merge(drinks::router())
        .merge(ingredients::router())
        .merge(reports::router())
        .merge(system::router())
}

pub(crate) fn parse_id(raw: &str) -> Result<RecordId, axum::response::Response> {
    raw.parse::<RecordId>()
        .map_err(errors::domain_error_to_response)
}
