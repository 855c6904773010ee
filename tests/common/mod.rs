#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use payment_blocks::application::lifecycle::BlockLifecycle;
use payment_blocks::config::CorsConfig;
use payment_blocks::domain::block::ClientId;
use payment_blocks::domain::command::{CreateBlock, Unblock};
use payment_blocks::infrastructure::in_memory::InMemoryBlockStore;
use payment_blocks::interfaces::http;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub fn new_client() -> ClientId {
    ClientId::new(Uuid::new_v4())
}

pub fn in_memory_lifecycle() -> Arc<BlockLifecycle> {
    Arc::new(BlockLifecycle::new(Box::new(InMemoryBlockStore::new())))
}

pub fn create_cmd(client_id: ClientId, reason: &str, actor: &str) -> CreateBlock {
    CreateBlock {
        client_id,
        block_type: "FRAUD".to_string(),
        reason_description: reason.to_string(),
        created_by_user_id: actor.to_string(),
    }
}

pub fn unblock_cmd(client_id: ClientId, actor: &str) -> Unblock {
    Unblock {
        client_id,
        unblocked_by_user_id: actor.to_string(),
    }
}

pub fn app() -> Router {
    http::router(in_memory_lifecycle(), &CorsConfig::default())
}

pub fn block_uri(client_id: impl std::fmt::Display) -> String {
    format!("/internal/v1/clients/{client_id}/payment-block")
}

/// Sends one request through the router and returns the status and JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
