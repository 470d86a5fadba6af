//! HTTP API routes

pub mod auth;
pub mod health;
pub mod invoices;
pub mod notifications;
pub mod orders;
pub mod products;

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Everything under /api/shops requires a verified staff token
    let shops = Router::new()
        .route(
            "/api/shops/{shop_id}/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/shops/{shop_id}/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/shops/{shop_id}/invoices", get(invoices::list_invoices))
        .route(
            "/api/shops/{shop_id}/invoices/{invoice_id}",
            get(invoices::get_invoice),
        )
        .route(
            "/api/shops/{shop_id}/notifications",
            get(notifications::list_notifications),
        )
        .route(
            "/api/shops/{shop_id}/notifications/mark-read",
            put(notifications::mark_read),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login));

    Router::new()
        .merge(public)
        .merge(shops)
        .layer(cors_layer(state.frontend_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Lock CORS to the configured frontend origin; permissive when none is set
/// (local development).
fn cors_layer(frontend_origin: Option<&str>) -> CorsLayer {
    match frontend_origin.and_then(|o| o.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::DELETE,
                http::Method::OPTIONS,
            ])
            .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    }
}
