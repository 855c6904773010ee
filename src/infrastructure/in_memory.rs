use crate::domain::block::{ClientId, PaymentBlock};
use crate::domain::ports::{BlockStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    blocks: HashMap<Uuid, PaymentBlock>,
    /// Client id -> id of that client's active block.
    active: HashMap<ClientId, Uuid>,
}

/// A thread-safe in-memory store for payment blocks.
///
/// Both the record table and the active-per-client index sit behind one
/// `RwLock`, so the duplicate check in `insert` and the write itself happen
/// under the same write guard. Ideal for testing or running without a database.
///
/// The single lock is shared by all clients, so writes for unrelated clients
/// also queue behind each other. Use the RocksDB store when write throughput
/// across many clients matters; its locks are per client key.
#[derive(Default, Clone)]
pub struct InMemoryBlockStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryBlockStore {
    /// Creates a new, empty in-memory block store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlockStore for InMemoryBlockStore {
    async fn find_active_by_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<PaymentBlock>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .active
            .get(&client_id)
            .and_then(|id| tables.blocks.get(id))
            .cloned())
    }

    async fn insert(&self, block: PaymentBlock) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        if tables.blocks.contains_key(&block.id) {
            return Err(StoreError::DuplicateId { id: block.id });
        }
        if block.is_active {
            if tables.active.contains_key(&block.client_id) {
                return Err(StoreError::DuplicateActive {
                    client_id: block.client_id,
                });
            }
            tables.active.insert(block.client_id, block.id);
        }
        tables.blocks.insert(block.id, block);
        Ok(())
    }

    async fn update(&self, block: PaymentBlock) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        let stored = tables
            .blocks
            .get(&block.id)
            .ok_or(StoreError::NotFound { id: block.id })?;
        if !stored.is_active {
            return Err(StoreError::AlreadyLifted { id: block.id });
        }
        let client_id = stored.client_id;

        if !block.is_active && tables.active.get(&client_id) == Some(&block.id) {
            tables.active.remove(&client_id);
        }
        tables.blocks.insert(block.id, block);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<PaymentBlock>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.blocks.get(&id).cloned())
    }
}
