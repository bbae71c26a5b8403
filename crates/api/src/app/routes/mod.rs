use axum::Router;

pub mod ar;
pub mod invoices;
pub mod suppliers;
pub mod system;

/// Compose the per-area routers.
pub fn router() -> Router {
    Router::new()
        .nest("/suppliers", suppliers::router())
        .nest("/invoices", invoices::router())
        .nest("/ar", ar::router())
}
