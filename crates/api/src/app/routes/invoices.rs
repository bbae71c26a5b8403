//! Invoice CRUD plus the printable invoice document.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use clearbook_core::{InvoiceId, SupplierId};
use clearbook_documents::InvoiceDocument;
use clearbook_invoicing::InvoiceRecord;

use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route(
            "/:id",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
        .route("/:id/document", get(get_invoice_document))
}

fn parse_id(id: &str) -> Result<InvoiceId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<InvoiceRecord>,
) -> axum::response::Response {
    match services.invoice_create(body) {
        Ok(invoice) => (StatusCode::CREATED, Json(invoice)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct InvoiceListQuery {
    pub supplier_id: Option<String>,
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<InvoiceListQuery>,
) -> axum::response::Response {
    let supplier_id = match query.supplier_id.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<SupplierId>() {
            Ok(id) => Some(id),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid supplier id",
                )
            }
        },
    };

    let items = services.invoices_list(supplier_id);
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.invoice_get(id) {
        Some(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
    }
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<InvoiceRecord>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.invoice_update(id, body) {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.invoice_delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_invoice_document(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let invoice = match services.invoice_get(id) {
        Some(i) => i,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
    };
    let supplier = match services.supplier_get(invoice.supplier_id) {
        Some(s) => s,
        None => {
            // Dangling supplier reference: treat as a data-quality gap.
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "supplier not found");
        }
    };

    (
        StatusCode::OK,
        Json(InvoiceDocument::build(&invoice, &supplier)),
    )
        .into_response()
}
