use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use stockbook_api::app::{self, services::AppServices};
use stockbook_api::config::AppConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(AppConfig::default()).await
    }

    async fn spawn_with(config: AppConfig) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let services = AppServices::open(&config)
            .await
            .expect("failed to open services");
        let router = app::build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn post_value(
    client: &reqwest::Client,
    url: String,
    value: f64,
) -> reqwest::Response {
    client
        .post(url)
        .json(&json!({ "value": value }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn drink_lifecycle_create_sell_count() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/drinks"))
        .json(&json!({ "name": "Coca Cola", "initialStock": 24, "actualRemaining": 24 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["expectedRemaining"], 24.0);
    assert_eq!(created["discrepancy"], 0.0);
    assert!(created["lastUpdated"].is_string());

    let res = post_value(&client, srv.url(&format!("/drinks/{id}/sold")), 10.0).await;
    assert_eq!(res.status(), StatusCode::OK);
    let sold: serde_json::Value = res.json().await.unwrap();
    assert_eq!(sold["expectedRemaining"], 14.0);
    // Last physical count is kept until a new one is recorded.
    assert_eq!(sold["actualRemaining"], 24.0);
    assert_eq!(sold["discrepancy"], -10.0);

    let res = post_value(&client, srv.url(&format!("/drinks/{id}/actual-count")), 12.0).await;
    let counted: serde_json::Value = res.json().await.unwrap();
    assert_eq!(counted["actualRemaining"], 12.0);
    assert_eq!(counted["discrepancy"], 2.0);

    let res = client.get(srv.url("/reports/alerts")).send().await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["alerts"][0], "هناك نقص في مخزون Coca Cola بمقدار 2 وحدة");

    let list: serde_json::Value = client
        .get(srv.url("/drinks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ingredient_usage_flags_low_stock() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/ingredients"))
        .json(&json!({ "name": "Salt", "initialStock": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["unit"], "kg");
    let id = created["id"].as_str().unwrap().to_string();

    let res = post_value(&client, srv.url(&format!("/ingredients/{id}/used")), 9.0).await;
    let used: serde_json::Value = res.json().await.unwrap();
    assert_eq!(used["remaining"], 1.0);

    let summary: serde_json::Value = client
        .get(srv.url("/reports/summary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["ingredientCount"], 1);
    assert_eq!(summary["lowStock"][0]["name"], "Salt");
    assert_eq!(summary["lowStock"][0]["remainingPercent"], 10);

    let res = client
        .get(srv.url("/reports/whatsapp/alerts?phone=212600000000"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["link"]
        .as_str()
        .unwrap()
        .starts_with("https://api.whatsapp.com/send?phone=212600000000&text="));
}

#[tokio::test]
async fn invalid_input_is_rejected_without_changes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/drinks"))
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .post(srv.url("/ingredients"))
        .json(&json!({ "name": "Oil", "unit": "gallon" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(srv.url("/drinks"))
        .json(&json!({ "name": "Tea", "initialStock": 5 }))
        .send()
        .await
        .unwrap();
    let id = res.json::<serde_json::Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = post_value(&client, srv.url(&format!("/drinks/{id}/sold")), -1.0).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let drink: serde_json::Value = client
        .get(srv.url(&format!("/drinks/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(drink["sold"], 0.0);
}

#[tokio::test]
async fn missing_records_are_404_and_delete_is_idempotent() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/drinks/nope")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");

    let res = post_value(&client, srv.url("/ingredients/nope/used"), 1.0).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(srv.url("/ingredients/nope")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn put_replaces_record_by_id() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/drinks/d42"))
        .json(&json!({ "name": "Lemonade", "initialStock": 10, "sold": 3, "actualRemaining": 7 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .put(srv.url("/drinks/d42"))
        .json(&json!({ "name": "Lemonade", "initialStock": 12, "sold": 3, "actualRemaining": 7 }))
        .send()
        .await
        .unwrap();
    let saved: serde_json::Value = res.json().await.unwrap();
    assert_eq!(saved["expectedRemaining"], 9.0);
    assert_eq!(saved["discrepancy"], 2.0);

    let list: serde_json::Value = client
        .get(srv.url("/drinks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let res = client.delete(srv.url("/drinks/d42")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = client.get(srv.url("/drinks/d42")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_without_count_keeps_the_recorded_count() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .put(srv.url("/drinks/d1"))
        .json(&json!({ "name": "Coca Cola", "initialStock": 24 }))
        .send()
        .await
        .unwrap();
    let res = post_value(&client, srv.url("/drinks/d1/actual-count"), 12.0).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .put(srv.url("/drinks/d1"))
        .json(&json!({ "name": "Coca Cola", "initialStock": 24, "sold": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let saved: serde_json::Value = res.json().await.unwrap();
    assert_eq!(saved["actualRemaining"], 12.0);
    assert_eq!(saved["expectedRemaining"], 14.0);
    assert_eq!(saved["discrepancy"], 2.0);
}

#[tokio::test]
async fn mistyped_bodies_and_queries_are_validation_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/drinks"))
        .json(&json!({ "name": "Tea", "initialStock": "abc" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .post(srv.url("/ingredients/i1/used"))
        .json(&json!({ "value": "lots" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(srv.url("/reports/whatsapp?period=yearly"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn demo_data_feeds_reports_and_exports() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.post(srv.url("/demo-data")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let counts: serde_json::Value = res.json().await.unwrap();
    assert_eq!(counts, json!({ "drinks": 3, "ingredients": 3 }));

    let res = client
        .get(srv.url("/reports/whatsapp?period=weekly"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["period"], "weekly");
    assert!(body["message"].as_str().unwrap().starts_with("تقرير أسبوعي من مطعم لندن فود"));
    assert!(body["link"]
        .as_str()
        .unwrap()
        .starts_with("https://api.whatsapp.com/send?phone=212760834914&text="));

    let res = client.get(srv.url("/reports/drinks.csv")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(res.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("london-food-drinks-report.csv"));
    let csv = res.text().await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    // Title, date, header, three drinks, footer.
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "تقرير المشروبات");
    assert!(lines[1].starts_with("تاريخ: "));

    let csv = client
        .get(srv.url("/reports/ingredients.csv"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(csv.lines().nth(2), Some("الاسم,المخزون الأصلي,المستخدم,المتبقي,الوحدة"));
}

#[tokio::test]
async fn healthy_stock_has_no_alert_message() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/reports/whatsapp/alerts")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn sqlite_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        database_url: Some(format!("sqlite://{}", dir.path().join("stock.db").display())),
        ..AppConfig::default()
    };
    let client = reqwest::Client::new();

    {
        let srv = TestServer::spawn_with(config.clone()).await;
        let res = client
            .put(srv.url("/ingredients/i7"))
            .json(&json!({ "name": "Flour", "initialStock": 20, "used": 5, "unit": "kg" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let srv = TestServer::spawn_with(config).await;
    let flour: serde_json::Value = client
        .get(srv.url("/ingredients/i7"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(flour["remaining"], 15.0);
}
