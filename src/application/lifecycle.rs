use crate::domain::block::{ClientId, PaymentBlock};
use crate::domain::command::{CreateBlock, Unblock};
use crate::domain::ports::{BlockStoreBox, StoreError};
use crate::error::{BlockError, Result};
use chrono::Utc;
use tracing::{error, info, warn};

/// Entry point for the payment block lifecycle.
///
/// `BlockLifecycle` owns the injected storage backend and turns block, unblock and
/// status requests into store operations. It keeps no state of its own; every call
/// consults the store directly, and the "one active block per client" rule is
/// enforced by the store's atomic `insert`.
pub struct BlockLifecycle {
    store: BlockStoreBox,
}

impl BlockLifecycle {
    /// Creates a new `BlockLifecycle` over the given store.
    pub fn new(store: BlockStoreBox) -> Self {
        Self { store }
    }

    /// Blocks payments for a client.
    ///
    /// Fails with `AlreadyBlocked` when the client already has an active block,
    /// including when a concurrent request created it first.
    pub async fn create_block(&self, cmd: CreateBlock) -> Result<PaymentBlock> {
        cmd.validate()?;

        let block = PaymentBlock::new(
            cmd.client_id,
            cmd.block_type,
            cmd.reason_description,
            cmd.created_by_user_id,
            Utc::now(),
        );

        match self.store.insert(block.clone()).await {
            Ok(()) => {
                info!(
                    client_id = %block.client_id,
                    block_id = %block.id,
                    block_type = %block.block_type,
                    actor = %block.created_by_user_id,
                    "payment block created"
                );
                Ok(block)
            }
            Err(StoreError::DuplicateActive { client_id }) => {
                warn!(%client_id, "client already has an active payment block");
                Err(BlockError::AlreadyBlocked(client_id))
            }
            Err(e) => {
                error!(client_id = %block.client_id, error = %e, "failed to persist payment block");
                Err(BlockError::StorageFailure(e))
            }
        }
    }

    /// Lifts the active block of a client.
    ///
    /// A second unblock for the same client fails with `NoActiveBlock`; if two
    /// unblocks race, the store rejects the loser and the winner's audit fields stay.
    pub async fn unblock(&self, cmd: Unblock) -> Result<PaymentBlock> {
        cmd.validate()?;
        let client_id = cmd.client_id;

        let mut block = self
            .find_active(client_id)
            .await?
            .ok_or_else(|| no_active_block(client_id))?;
        block.lift(cmd.unblocked_by_user_id, Utc::now())?;

        match self.store.update(block.clone()).await {
            Ok(()) => {
                info!(
                    %client_id,
                    block_id = %block.id,
                    actor = block.unblocked_by_user_id.as_deref().unwrap_or_default(),
                    "payment block lifted"
                );
                Ok(block)
            }
            Err(StoreError::AlreadyLifted { .. } | StoreError::NotFound { .. }) => {
                Err(no_active_block(client_id))
            }
            Err(e) => {
                error!(%client_id, block_id = %block.id, error = %e, "failed to lift payment block");
                Err(BlockError::StorageFailure(e))
            }
        }
    }

    /// Returns the active block of a client, or `NoActiveBlock`.
    pub async fn status(&self, client_id: ClientId) -> Result<PaymentBlock> {
        self.find_active(client_id)
            .await?
            .ok_or(BlockError::NoActiveBlock(client_id))
    }

    async fn find_active(&self, client_id: ClientId) -> Result<Option<PaymentBlock>> {
        self.store
            .find_active_by_client(client_id)
            .await
            .map_err(|e| {
                error!(%client_id, error = %e, "failed to look up active payment block");
                BlockError::StorageFailure(e)
            })
    }
}

fn no_active_block(client_id: ClientId) -> BlockError {
    warn!(%client_id, "no active payment block to lift");
    BlockError::NoActiveBlock(client_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::BlockStore;
    use crate::infrastructure::in_memory::InMemoryBlockStore;
    use async_trait::async_trait;
    use uuid::Uuid;

    fn create_cmd(client_id: ClientId, reason: &str, actor: &str) -> CreateBlock {
        CreateBlock {
            client_id,
            block_type: "FRAUD".to_string(),
            reason_description: reason.to_string(),
            created_by_user_id: actor.to_string(),
        }
    }

    fn unblock_cmd(client_id: ClientId, actor: &str) -> Unblock {
        Unblock {
            client_id,
            unblocked_by_user_id: actor.to_string(),
        }
    }

    /// Store whose every operation fails, for exercising the storage error path.
    struct FailingStore;

    #[async_trait]
    impl BlockStore for FailingStore {
        async fn find_active_by_client(
            &self,
            _client_id: ClientId,
        ) -> std::result::Result<Option<PaymentBlock>, StoreError> {
            Err(StoreError::Backend("disk unavailable".to_string()))
        }

        async fn insert(&self, _block: PaymentBlock) -> std::result::Result<(), StoreError> {
            Err(StoreError::Backend("disk unavailable".to_string()))
        }

        async fn update(&self, _block: PaymentBlock) -> std::result::Result<(), StoreError> {
            Err(StoreError::Backend("disk unavailable".to_string()))
        }

        async fn get(&self, _id: Uuid) -> std::result::Result<Option<PaymentBlock>, StoreError> {
            Err(StoreError::Backend("disk unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_create_then_status_round_trip() {
        let lifecycle = BlockLifecycle::new(Box::new(InMemoryBlockStore::new()));
        let client = ClientId::new(Uuid::new_v4());

        let created = lifecycle
            .create_block(create_cmd(client, "suspicious activity", "agent-1"))
            .await
            .unwrap();
        assert!(created.is_active);
        assert_eq!(created.client_id, client);
        assert_eq!(created.created_by_user_id, "agent-1");

        let status = lifecycle.status(client).await.unwrap();
        assert_eq!(status, created);
    }

    #[tokio::test]
    async fn test_second_create_is_already_blocked() {
        let lifecycle = BlockLifecycle::new(Box::new(InMemoryBlockStore::new()));
        let client = ClientId::new(Uuid::new_v4());

        lifecycle
            .create_block(create_cmd(client, "suspicious activity", "agent-1"))
            .await
            .unwrap();
        let result = lifecycle
            .create_block(create_cmd(client, "dup", "agent-2"))
            .await;
        assert!(matches!(result, Err(BlockError::AlreadyBlocked(c)) if c == client));
    }

    #[tokio::test]
    async fn test_unblock_lifts_and_second_unblock_fails() {
        let lifecycle = BlockLifecycle::new(Box::new(InMemoryBlockStore::new()));
        let client = ClientId::new(Uuid::new_v4());

        lifecycle
            .create_block(create_cmd(client, "suspicious activity", "agent-1"))
            .await
            .unwrap();

        let lifted = lifecycle
            .unblock(unblock_cmd(client, "agent-3"))
            .await
            .unwrap();
        assert!(!lifted.is_active);
        assert!(lifted.unblocked_at.is_some());
        assert_eq!(lifted.unblocked_by_user_id.as_deref(), Some("agent-3"));

        let again = lifecycle.unblock(unblock_cmd(client, "agent-4")).await;
        assert!(matches!(again, Err(BlockError::NoActiveBlock(_))));

        let status = lifecycle.status(client).await;
        assert!(matches!(status, Err(BlockError::NoActiveBlock(_))));
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_storage() {
        let lifecycle = BlockLifecycle::new(Box::new(FailingStore));
        let client = ClientId::new(Uuid::new_v4());

        let result = lifecycle.create_block(create_cmd(client, "", "agent-1")).await;
        assert!(matches!(result, Err(BlockError::InvalidInput(_))));

        let result = lifecycle.unblock(unblock_cmd(client, " ")).await;
        assert!(matches!(result, Err(BlockError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_storage_errors_surface_as_storage_failure() {
        let lifecycle = BlockLifecycle::new(Box::new(FailingStore));
        let client = ClientId::new(Uuid::new_v4());

        let created = lifecycle
            .create_block(create_cmd(client, "reason", "agent-1"))
            .await;
        assert!(matches!(created, Err(BlockError::StorageFailure(_))));

        let lifted = lifecycle.unblock(unblock_cmd(client, "agent-3")).await;
        assert!(matches!(lifted, Err(BlockError::StorageFailure(_))));

        let status = lifecycle.status(client).await;
        assert!(matches!(status, Err(BlockError::StorageFailure(_))));
    }
}
