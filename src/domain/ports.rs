use super::block::{ClientId, PaymentBlock};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Failures reported by a [`BlockStore`] backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("client {client_id} already has an active payment block")]
    DuplicateActive { client_id: ClientId },
    #[error("payment block {id} already exists")]
    DuplicateId { id: Uuid },
    #[error("payment block {id} not found")]
    NotFound { id: Uuid },
    #[error("payment block {id} is already lifted")]
    AlreadyLifted { id: Uuid },
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable storage for payment blocks.
///
/// Implementations own the "one active block per client" invariant: `insert`
/// must check and write atomically with respect to concurrent inserts for the
/// same client. Records are never replaced by `insert`; a reused id is rejected.
#[async_trait]
pub trait BlockStore: Send + Sync {
    async fn find_active_by_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<PaymentBlock>, StoreError>;
    async fn insert(&self, block: PaymentBlock) -> Result<(), StoreError>;
    /// Persists the lift of a block. Rejects records that are missing or already lifted.
    async fn update(&self, block: PaymentBlock) -> Result<(), StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<PaymentBlock>, StoreError>;
}

pub type BlockStoreBox = Box<dyn BlockStore>;
