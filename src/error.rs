use crate::domain::block::ClientId;
use crate::domain::ports::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("client {0} is already blocked")]
    AlreadyBlocked(ClientId),
    #[error("no active payment block for client {0}")]
    NoActiveBlock(ClientId),
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, BlockError>;
