//! Core types for kvlink.
//!
//! This crate defines what a connection *is* for the rest of the workspace:
//! the validated [`ConnectionDescriptor`], its [`Fingerprint`] (the key under
//! which handles are shared), and the [`ConnectionHandle`] trait that
//! concrete backends implement.

pub mod descriptor;
pub mod error;
pub mod fingerprint;
pub mod handle;
pub mod options;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use descriptor::{ClusterOptions, ConnectionDescriptor, ConnectionOptions, Mode};
pub use error::{DescriptorError, OperationError};
pub use fingerprint::{Fingerprint, fingerprint};
pub use handle::{ConnectionHandle, Lookup};
pub use options::{ClusterSpec, ConnectionSpec};
