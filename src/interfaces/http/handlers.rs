//! Axum handlers for `/internal/v1/clients/{client_id}/payment-block`.

use super::error::ApiError;
use crate::application::lifecycle::BlockLifecycle;
use crate::domain::block::{ClientId, PaymentBlock};
use crate::domain::command::{CreateBlock, Unblock};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;

type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlockRequest {
    pub block_type: String,
    pub reason_description: String,
    pub created_by_user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnblockRequest {
    #[serde(alias = "unblocked_by_user_id")]
    pub unblocked_by_user_id: String,
}

/// POST: block payments for the client.
pub async fn block_client(
    State(lifecycle): State<Arc<BlockLifecycle>>,
    Path(client_id): Path<String>,
    payload: std::result::Result<Json<NewBlockRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PaymentBlock>)> {
    let client_id: ClientId = client_id.parse()?;
    let Json(req) = payload?;

    let block = lifecycle
        .create_block(CreateBlock {
            client_id,
            block_type: req.block_type,
            reason_description: req.reason_description,
            created_by_user_id: req.created_by_user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(block)))
}

/// DELETE: lift the client's active block.
pub async fn unblock_client(
    State(lifecycle): State<Arc<BlockLifecycle>>,
    Path(client_id): Path<String>,
    payload: std::result::Result<Json<UnblockRequest>, JsonRejection>,
) -> Result<Json<PaymentBlock>> {
    let client_id: ClientId = client_id.parse()?;
    let Json(req) = payload?;

    let block = lifecycle
        .unblock(Unblock {
            client_id,
            unblocked_by_user_id: req.unblocked_by_user_id,
        })
        .await?;

    Ok(Json(block))
}

/// GET: current active block of the client.
pub async fn block_status(
    State(lifecycle): State<Arc<BlockLifecycle>>,
    Path(client_id): Path<String>,
) -> Result<Json<PaymentBlock>> {
    let client_id: ClientId = client_id.parse()?;
    Ok(Json(lifecycle.status(client_id).await?))
}
