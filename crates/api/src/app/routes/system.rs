use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::json;

use stockbook_inventory::{Drink, Ingredient};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/demo-data", post(load_demo_data))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Replace both collections with the sample data set.
pub async fn load_demo_data(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let counts = services
        .with_ledger(|ledger| {
            ledger.load_demo_data()?;
            Ok((ledger.list::<Drink>().len(), ledger.list::<Ingredient>().len()))
        })
        .await;

    match counts {
        Ok((drinks, ingredients)) => Json(json!({
            "drinks": drinks,
            "ingredients": ingredients,
        }))
        .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
