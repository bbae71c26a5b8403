//! Consistent JSON error responses.

use axum::{http::StatusCode, response::IntoResponse, Json};

use clearbook_core::DomainError;

/// `{ "error": code, "message": .. }` with the given status.
pub fn json_error(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(serde_json::json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Map a domain error onto the HTTP surface.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match &err {
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation", err.to_string()),
        DomainError::MalformedAmount(_) => {
            json_error(StatusCode::BAD_REQUEST, "malformed_amount", err.to_string())
        }
        DomainError::MissingDueDate => {
            json_error(StatusCode::BAD_REQUEST, "missing_due_date", err.to_string())
        }
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", err.to_string()),
        DomainError::InvariantViolation(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "invariant", err.to_string())
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
    }
}
