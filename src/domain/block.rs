use crate::error::BlockError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifies the party whose payments are blocked.
///
/// Wraps a `Uuid` so that a client id can never be confused with a block id,
/// and so that parsing from untrusted input goes through a single validation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl FromStr for ClientId {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| BlockError::InvalidInput(format!("invalid client id: {s:?}")))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One blocking episode for a client.
///
/// A block is created active and can be lifted exactly once. Lifted blocks are
/// kept as audit history and never deleted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBlock {
    pub id: Uuid,
    pub client_id: ClientId,
    pub is_active: bool,
    pub block_type: String,
    pub reason_description: String,
    pub created_at: DateTime<Utc>,
    pub created_by_user_id: String,
    pub unblocked_at: Option<DateTime<Utc>>,
    pub unblocked_by_user_id: Option<String>,
}

impl PaymentBlock {
    /// Builds a fresh active block with a new id.
    pub fn new(
        client_id: ClientId,
        block_type: String,
        reason_description: String,
        created_by_user_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            is_active: true,
            block_type,
            reason_description,
            created_at,
            created_by_user_id,
            unblocked_at: None,
            unblocked_by_user_id: None,
        }
    }

    /// Lifts the block (active -> lifted).
    ///
    /// Sets the lift timestamp and actor together. Fails if the block was already lifted,
    /// so the audit fields are never overwritten.
    pub fn lift(&mut self, actor: String, at: DateTime<Utc>) -> Result<(), BlockError> {
        if !self.is_active {
            return Err(BlockError::NoActiveBlock(self.client_id));
        }
        self.is_active = false;
        self.unblocked_at = Some(at);
        self.unblocked_by_user_id = Some(actor);
        Ok(())
    }
}
