//! Black-box tests against the assembled router.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use tower::ServiceExt;

use clearbook_api::app::{build_app_with, services::AppServices};

const REFERENCE: &str = "2026-06-15";

fn reference_date() -> NaiveDate {
    REFERENCE.parse().unwrap()
}

fn seeded_services() -> Arc<AppServices> {
    let services = Arc::new(AppServices::new());
    let today = reference_date();

    let acme = services
        .supplier_create(serde_json::from_value(json!({ "name": "Acme Freight" })).unwrap())
        .unwrap();
    let northern = services
        .supplier_create(serde_json::from_value(json!({ "name": "Northern Carriers" })).unwrap())
        .unwrap();

    for (supplier_id, amount, is_paid, days_ago) in [
        (acme.id, "100", false, 10i64),
        (acme.id, "200", true, 5),
        (northern.id, "50", false, 45),
    ] {
        services
            .invoice_create(
                serde_json::from_value(json!({
                    "supplierId": supplier_id,
                    "amount": amount,
                    "dueDate": today - Duration::days(days_ago),
                    "isPaid": is_paid,
                }))
                .unwrap(),
            )
            .unwrap();
    }

    services
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_responds_ok() {
    let app = build_app_with(seeded_services());
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn overview_and_aging_agree() {
    let app = build_app_with(seeded_services());

    let (status, overview) = get_json(&app, "/ar/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["totalAr"], json!(350.0));
    assert_eq!(overview["paidAr"], json!(200.0));
    assert_eq!(overview["unpaidAr"], json!(150.0));

    let (status, aging) = get_json(&app, &format!("/ar/aging?at={REFERENCE}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(aging["0-30 days"], json!(100.0));
    assert_eq!(aging["31-60 days"], json!(50.0));
    assert_eq!(aging["61-90 days"], json!(0.0));
    assert_eq!(aging["90+ days"], json!(0.0));
}

#[tokio::test]
async fn revenue_leaderboard_ranks_and_windows() {
    let app = build_app_with(seeded_services());

    let (status, all) = get_json(&app, "/suppliers/revenue?window=all").await;
    assert_eq!(status, StatusCode::OK);
    let rankings = all["rankings"].as_array().unwrap();
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0]["supplier"]["name"], "Acme Freight");
    assert_eq!(rankings[0]["revenue"], json!(300.0));
    assert_eq!(all["total"], json!(350.0));

    let (status, _) = get_json(&app, "/suppliers/revenue?window=soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn statement_lists_unpaid_lines() {
    let services = seeded_services();
    let supplier_id = services.suppliers_list()[0].id;
    let app = build_app_with(services);

    let uri = format!("/suppliers/{supplier_id}/statement?at={REFERENCE}");
    let (status, statement) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    let lines = statement["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["daysOverdue"], json!(10));
    assert_eq!(statement["outstanding"], json!(100.0));

    let (status, outstanding) =
        get_json(&app, &format!("/suppliers/{supplier_id}/outstanding")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outstanding["outstanding"], json!(100.0));
}

#[tokio::test]
async fn invoice_document_renders_summary_row() {
    let services = seeded_services();
    let invoice_id = services.invoices_list(None)[0].id;
    let app = build_app_with(services);

    let (status, doc) = get_json(&app, &format!("/invoices/{invoice_id}/document")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["supplierName"], "Acme Freight");
    assert_eq!(doc["total"], json!(100.0));
    assert_eq!(doc["lines"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_invoice_is_rejected_with_data_quality_error() {
    let app = build_app_with(seeded_services());
    let supplier_id = {
        let (_, body) = get_json(&app, "/suppliers").await;
        body["items"][0]["id"].as_str().unwrap().to_string()
    };

    let request = Request::builder()
        .method("POST")
        .uri("/invoices")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "supplierId": supplier_id,
                "amount": "12,50",
                "dueDate": "2026-08-01"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "malformed_amount");
}

#[tokio::test]
async fn deleting_supplier_with_open_invoices_conflicts() {
    let services = seeded_services();
    let supplier_id = services.suppliers_list()[0].id;
    let app = build_app_with(services);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/suppliers/{supplier_id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
