//! Supplier CRUD plus supplier-level reports.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    routing::post,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use clearbook_core::SupplierId;
use clearbook_documents::AccountStatement;
use clearbook_receivables::{outstanding_balance, supplier_revenue, RevenueWindow};
use clearbook_suppliers::SupplierRecord;

use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_supplier).get(list_suppliers))
        .route("/revenue", get(get_revenue))
        .route(
            "/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
        .route("/:id/outstanding", get(get_outstanding))
        .route("/:id/statement", get(get_statement))
}

fn parse_id(id: &str) -> Result<SupplierId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid supplier id"))
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<SupplierRecord>,
) -> axum::response::Response {
    match services.supplier_create(body) {
        Ok(supplier) => (StatusCode::CREATED, Json(supplier)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.suppliers_list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.supplier_get(id) {
        Some(supplier) => (StatusCode::OK, Json(supplier)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "supplier not found"),
    }
}

pub async fn update_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<SupplierRecord>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.supplier_update(id, body) {
        Ok(supplier) => (StatusCode::OK, Json(supplier)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.supplier_delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    /// `"all"` or a day count like `"30"`. Defaults to all time.
    pub window: Option<String>,
}

pub async fn get_revenue(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<RevenueQuery>,
) -> axum::response::Response {
    let window = match query.window.as_deref() {
        None => RevenueWindow::All,
        Some(raw) => match raw.parse::<RevenueWindow>() {
            Ok(w) => w,
            Err(e) => return errors::domain_error_to_response(e),
        },
    };

    let (suppliers, invoices) = services.snapshot();
    match supplier_revenue(&suppliers, &invoices, window, Utc::now().date_naive()) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_outstanding(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if services.supplier_get(id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "supplier not found");
    }

    let (_, invoices) = services.snapshot();
    match outstanding_balance(id, &invoices) {
        Ok(outstanding) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "supplierId": id,
                "outstanding": outstanding,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    /// Optional reference date (`YYYY-MM-DD`); defaults to today.
    pub at: Option<NaiveDate>,
}

pub async fn get_statement(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(query): Query<StatementQuery>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let supplier = match services.supplier_get(id) {
        Some(s) => s,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "supplier not found"),
    };

    let reference = query.at.unwrap_or_else(|| Utc::now().date_naive());
    let (_, invoices) = services.snapshot();
    match AccountStatement::build(&supplier, &invoices, reference) {
        Ok(statement) => (StatusCode::OK, Json(statement)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
