use crate::domain::block::{ClientId, PaymentBlock};
use crate::domain::ports::{BlockStore, StoreError};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Options, TransactionDB, TransactionDBOptions};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Column Family holding every payment block, keyed by block id.
pub const CF_BLOCKS: &str = "blocks";
/// Column Family mapping a client id to the id of its active block.
///
/// A key exists exactly while that client has an active block; it plays the role of
/// a unique index over `client_id` restricted to active rows.
pub const CF_ACTIVE_BLOCKS: &str = "active_blocks";

/// A persistent store implementation using RocksDB.
///
/// Opened as a pessimistic `TransactionDB`: `insert` and `update` lock the client's
/// key in `active_blocks` with `get_for_update`, so two concurrent inserts for the
/// same client serialize on that key and the second one observes the first.
/// Inserts for different clients touch different keys and do not contend.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<TransactionDB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<TransactionDB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("blocks" and "active_blocks") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_blocks = ColumnFamilyDescriptor::new(CF_BLOCKS, Options::default());
        let cf_active = ColumnFamilyDescriptor::new(CF_ACTIVE_BLOCKS, Options::default());

        let db = TransactionDB::open_cf_descriptors(
            &opts,
            &TransactionDBOptions::default(),
            path,
            vec![cf_blocks, cf_active],
        )
        .map_err(backend)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Backend(format!("column family {name} not found")))
    }

    fn read_block(&self, id: Uuid) -> Result<Option<PaymentBlock>, StoreError> {
        let blocks = self.cf(CF_BLOCKS)?;
        match self.db.get_cf(blocks, id.as_bytes()).map_err(backend)? {
            Some(bytes) => decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    fn insert_block(&self, block: &PaymentBlock) -> Result<(), StoreError> {
        let blocks = self.cf(CF_BLOCKS)?;
        let active = self.cf(CF_ACTIVE_BLOCKS)?;
        let client_key = block.client_id.value();
        let value = encode(block)?;

        let txn = self.db.transaction();
        let stored = txn
            .get_for_update_cf(blocks, block.id.as_bytes(), true)
            .map_err(backend)?;
        if stored.is_some() {
            return Err(StoreError::DuplicateId { id: block.id });
        }
        if block.is_active {
            let existing = txn
                .get_for_update_cf(active, client_key.as_bytes(), true)
                .map_err(backend)?;
            if existing.is_some() {
                return Err(StoreError::DuplicateActive {
                    client_id: block.client_id,
                });
            }
            txn.put_cf(active, client_key.as_bytes(), block.id.as_bytes())
                .map_err(backend)?;
        }
        txn.put_cf(blocks, block.id.as_bytes(), value)
            .map_err(backend)?;
        txn.commit().map_err(backend)
    }

    fn update_block(&self, block: &PaymentBlock) -> Result<(), StoreError> {
        let blocks = self.cf(CF_BLOCKS)?;
        let active = self.cf(CF_ACTIVE_BLOCKS)?;

        let txn = self.db.transaction();
        let stored = txn
            .get_for_update_cf(blocks, block.id.as_bytes(), true)
            .map_err(backend)?
            .ok_or(StoreError::NotFound { id: block.id })?;
        let stored = decode(&stored)?;
        if !stored.is_active {
            return Err(StoreError::AlreadyLifted { id: block.id });
        }

        if !block.is_active {
            let client_key = stored.client_id.value();
            let indexed = txn
                .get_for_update_cf(active, client_key.as_bytes(), true)
                .map_err(backend)?;
            if indexed.as_deref() == Some(block.id.as_bytes().as_slice()) {
                txn.delete_cf(active, client_key.as_bytes())
                    .map_err(backend)?;
            }
        }
        txn.put_cf(blocks, block.id.as_bytes(), encode(block)?)
            .map_err(backend)?;
        txn.commit().map_err(backend)
    }
}

#[async_trait]
impl BlockStore for RocksDBStore {
    async fn find_active_by_client(
        &self,
        client_id: ClientId,
    ) -> Result<Option<PaymentBlock>, StoreError> {
        let active = self.cf(CF_ACTIVE_BLOCKS)?;
        let Some(id_bytes) = self
            .db
            .get_cf(active, client_id.value().as_bytes())
            .map_err(backend)?
        else {
            return Ok(None);
        };

        let id = Uuid::from_slice(&id_bytes)
            .map_err(|e| StoreError::Backend(format!("corrupt active index entry: {e}")))?;
        // The index and the record are read separately; a concurrent lift may land in between.
        Ok(self.read_block(id)?.filter(|block| block.is_active))
    }

    async fn insert(&self, block: PaymentBlock) -> Result<(), StoreError> {
        self.insert_block(&block)?;
        debug!(block_id = %block.id, client_id = %block.client_id, "block persisted");
        Ok(())
    }

    async fn update(&self, block: PaymentBlock) -> Result<(), StoreError> {
        self.update_block(&block)?;
        debug!(block_id = %block.id, client_id = %block.client_id, "block updated");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<PaymentBlock>, StoreError> {
        self.read_block(id)
    }
}

fn backend(e: rocksdb::Error) -> StoreError {
    StoreError::Backend(format!("RocksDB error: {e}"))
}

fn encode(block: &PaymentBlock) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(block).map_err(|e| StoreError::Backend(format!("Serialization error: {e}")))
}

fn decode(bytes: &[u8]) -> Result<PaymentBlock, StoreError> {
    serde_json::from_slice(bytes)
        .map_err(|e| StoreError::Backend(format!("Deserialization error: {e}")))
}
