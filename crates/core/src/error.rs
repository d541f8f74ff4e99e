use std::time::Duration;

use thiserror::Error;

/// Errors raised while validating a connection descriptor.
///
/// These surface synchronously when a client is constructed; no registry
/// state is touched when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("at least one address is required")]
    MissingAddresses,

    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid connection url: {0}")]
    InvalidUrl(String),

    #[error("masterName and cluster are mutually exclusive")]
    ConflictingModes,

    #[error("malformed connection options: {0}")]
    Malformed(String),
}

/// Errors raised by a single remote operation.
///
/// Neither variant invalidates the client or the shared handle; a later
/// operation may succeed once the store is reachable again.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}
