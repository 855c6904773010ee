use super::block::ClientId;
use crate::error::BlockError;

/// Request to block payments for a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBlock {
    pub client_id: ClientId,
    pub block_type: String,
    pub reason_description: String,
    pub created_by_user_id: String,
}

impl CreateBlock {
    /// Checks that every caller-supplied field is present.
    pub fn validate(&self) -> Result<(), BlockError> {
        require_non_empty("blockType", &self.block_type)?;
        require_non_empty("reasonDescription", &self.reason_description)?;
        require_non_empty("createdByUserId", &self.created_by_user_id)
    }
}

/// Request to lift the active block of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unblock {
    pub client_id: ClientId,
    pub unblocked_by_user_id: String,
}

impl Unblock {
    pub fn validate(&self) -> Result<(), BlockError> {
        require_non_empty("unblockedByUserId", &self.unblocked_by_user_id)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), BlockError> {
    if value.trim().is_empty() {
        Err(BlockError::InvalidInput(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}
