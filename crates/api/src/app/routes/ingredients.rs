use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockbook_core::RecordId;
use stockbook_inventory::Ingredient;

use crate::app::routes::parse_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/ingredients", get(list_ingredients).post(create_ingredient))
        .route(
            "/ingredients/:id",
            get(get_ingredient)
                .put(save_ingredient)
                .delete(delete_ingredient),
        )
        .route("/ingredients/:id/initial-stock", post(revise_initial_stock))
        .route("/ingredients/:id/used", post(revise_used))
}

pub async fn list_ingredients(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services
        .with_ledger(|ledger| Ok(ledger.list::<Ingredient>().to_vec()))
        .await
    {
        Ok(ingredients) => Json(ingredients).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .with_ledger(move |ledger| ledger.get::<Ingredient>(&id).cloned())
        .await
    {
        Ok(ingredient) => Json(ingredient).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn create_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::IngredientRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let ingredient = match body.into_ingredient(RecordId::new()) {
        Ok(i) => i,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .with_ledger(move |ledger| ledger.upsert(ingredient))
        .await
    {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

/// Full replace; creates the record when `id` is new.
pub async fn save_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::IngredientRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let ingredient = match body.into_ingredient(id) {
        Ok(i) => i,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .with_ledger(move |ledger| ledger.upsert(ingredient))
        .await
    {
        Ok(saved) => Json(saved).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn delete_ingredient(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services
        .with_ledger(move |ledger| ledger.delete::<Ingredient>(&id))
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
        .with_ledger(move |ledger| ledger.revise_ingredient_initial_stock(&id, body.value))
        .await
    {
        Ok(ingredient) => Json(ingredient).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn revise_used(
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
        .with_ledger(move |ledger| ledger.revise_used(&id, body.value))
        .await
    {
        Ok(ingredient) => Json(ingredient).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
