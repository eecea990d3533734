use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde_json::json;

use stockbook_reports::{
    dashboard_alerts, whatsapp_link, InventorySummary, ReportError, TabularDocument,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/reports/summary", get(summary))
        .route("/reports/alerts", get(alerts))
        .route("/reports/whatsapp", get(whatsapp_report))
        .route("/reports/whatsapp/alerts", get(whatsapp_alerts))
        .route("/reports/drinks.csv", get(drinks_csv))
        .route("/reports/ingredients.csv", get(ingredients_csv))
}

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.with_ledger(|ledger| Ok(ledger.snapshot())).await {
        Ok(s) => Json(InventorySummary::from_snapshot(&s.drinks, &s.ingredients)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn alerts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.with_ledger(|ledger| Ok(ledger.snapshot())).await {
        Ok(s) => Json(json!({ "alerts": dashboard_alerts(&s.drinks, &s.ingredients) })).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn whatsapp_report(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ReportQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let snapshot = match services.with_ledger(|ledger| Ok(ledger.snapshot())).await {
        Ok(s) => s,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    let message = services
        .composer
        .report(query.period, &snapshot.drinks, &snapshot.ingredients);
    let phone = query.phone.as_deref().unwrap_or(services.whatsapp_phone.as_str());

    Json(json!({
        "period": query.period,
        "message": message,
        "link": whatsapp_link(phone, &message),
    }))
    .into_response()
}

/// `204 No Content` when there is nothing to alert on.
pub async fn whatsapp_alerts(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::AlertQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let snapshot = match services.with_ledger(|ledger| Ok(ledger.snapshot())).await {
        Ok(s) => s,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    let Some(message) = services
        .composer
        .alerts(&snapshot.drinks, &snapshot.ingredients)
    else {
        return StatusCode::NO_CONTENT.into_response();
    };
    let phone = query.phone.as_deref().unwrap_or(services.whatsapp_phone.as_str());

    Json(json!({
        "message": message,
        "link": whatsapp_link(phone, &message),
    }))
    .into_response()
}

pub async fn drinks_csv(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.with_ledger(|ledger| Ok(ledger.snapshot())).await {
        Ok(s) => csv_response(TabularDocument::drinks(&s.drinks, Local::now().date_naive())),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn ingredients_csv(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.with_ledger(|ledger| Ok(ledger.snapshot())).await {
        Ok(s) => csv_response(TabularDocument::ingredients(
            &s.ingredients,
            Local::now().date_naive(),
        )),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

fn csv_response(doc: TabularDocument) -> axum::response::Response {
    let body = match doc.to_csv() {
        Ok(body) => body,
        Err(e) => return report_error_to_response(e),
    };

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", doc.file_name),
            ),
        ],
        body,
    )
        .into_response()
}

fn report_error_to_response(err: ReportError) -> axum::response::Response {
    tracing::error!(error = %err, "report rendering failed");
    errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "report_error", err.to_string())
}
