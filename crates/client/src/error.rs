use thiserror::Error;

use kvlink_core::DescriptorError;

/// Errors raised while constructing a client.
///
/// Construction either yields a fully configured client or this error; no
/// connection handle is created in the failing case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("must specify one argument, got {0}")]
    ArgumentCount(usize),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}
