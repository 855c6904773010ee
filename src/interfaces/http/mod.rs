//! HTTP transport for the lifecycle operations.

pub mod cors;
pub mod error;
pub mod handlers;

use crate::application::lifecycle::BlockLifecycle;
use crate::config::CorsConfig;
use axum::Router;
use axum::routing::post;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const PAYMENT_BLOCK_PATH: &str = "/internal/v1/clients/{client_id}/payment-block";

/// Builds the API router around a shared lifecycle.
pub fn router(lifecycle: Arc<BlockLifecycle>, cors: &CorsConfig) -> Router {
    Router::new()
        .route(
            PAYMENT_BLOCK_PATH,
            post(handlers::block_client)
                .delete(handlers::unblock_client)
                .get(handlers::block_status),
        )
        .layer(cors::cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(lifecycle)
}
