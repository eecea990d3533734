use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockbook_core::RecordId;
use stockbook_inventory::Drink;

use crate::app::routes::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/drinks", get(list_drinks).post(create_drink))
        .route(
            "/drinks/:id",
            get(get_drink).put(save_drink).delete(delete_drink),
        )
        .route("/drinks/:id/initial-stock", post(revise_initial_stock))
        .route("/drinks/:id/sold", post(revise_sold))
        .route("/drinks/:id/actual-count", post(record_actual_count))
}

pub async fn list_drinks(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services
        .with_ledger(|ledger| Ok(ledger.list::<Drink>().to_vec()))
        .await
    {
        Ok(drinks) => Json(drinks).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_drink(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .with_ledger(move |ledger| ledger.get::<Drink>(&id).cloned())
        .await
    {
        Ok(drink) => Json(drink).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn create_drink(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::DrinkRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let drink = body.into_drink(RecordId::new(), None);

    match services.with_ledger(move |ledger| ledger.upsert(drink)).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

/// Full replace; creates the record when `id` is new. A body without
/// `actualRemaining` keeps the stored count.
pub async fn save_drink(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::DrinkRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let saved = services
        .with_ledger(move |ledger| {
            let last_count = ledger.get::<Drink>(&id).ok().map(|d| d.actual_remaining);
            ledger.upsert(body.into_drink(id, last_count))
        })
        .await;

    match saved {
        Ok(saved) => Json(saved).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn delete_drink(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .with_ledger(move |ledger| ledger.delete::<Drink>(&id))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn revise_initial_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .with_ledger(move |ledger| ledger.revise_drink_initial_stock(&id, body.value))
        .await
    {
        Ok(drink) => Json(drink).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn revise_sold(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .with_ledger(move |ledger| ledger.revise_sold(&id, body.value))
        .await
    {
        Ok(drink) => Json(drink).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn record_actual_count(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::QuantityRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .with_ledger(move |ledger| ledger.record_actual_count(&id, body.value))
        .await
    {
        Ok(drink) => Json(drink).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
