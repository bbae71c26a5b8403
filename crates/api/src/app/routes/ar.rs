//! Accounts-receivable dashboard widgets.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use clearbook_receivables::{aging_buckets, overview};

use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/overview", get(get_overview))
        .route("/aging", get(get_aging))
}

#[derive(Debug, Deserialize)]
pub struct AgingQuery {
    /// Optional reference date (`YYYY-MM-DD`); defaults to today. Lets the
    /// dashboard and fixtures pin the clock.
    pub at: Option<NaiveDate>,
}

pub async fn get_overview(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let (_, invoices) = services.snapshot();
    match overview(&invoices) {
        Ok(ov) => (StatusCode::OK, Json(ov)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_aging(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<AgingQuery>,
) -> axum::response::Response {
    let reference = query.at.unwrap_or_else(|| Utc::now().date_naive());
    let (_, invoices) = services.snapshot();
    match aging_buckets(&invoices, reference) {
        Ok(buckets) => (StatusCode::OK, Json(buckets)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
