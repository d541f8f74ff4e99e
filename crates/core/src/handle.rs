use std::sync::Arc;

use async_trait::async_trait;

use crate::descriptor::ConnectionDescriptor;
use crate::error::OperationError;

/// A shared connection to one remote store.
///
/// Handles are created without performing I/O and connect on first use.
/// One handle is shared by every client whose descriptor has the same
/// fingerprint, so implementations must be safe for concurrent access.
#[async_trait]
pub trait ConnectionHandle: Send + Sync + 'static {
    /// Send a command and return the raw reply.
    async fn query(&self, cmd: &redis::Cmd) -> Result<redis::Value, OperationError>;

    /// The descriptor this handle was built from.
    fn descriptor(&self) -> &ConnectionDescriptor;
}

/// Capability resolving a descriptor to its shared handle.
///
/// Injected into every client at construction time so that clients never
/// reach for a global registry.
pub type Lookup<H> = Arc<dyn Fn(&ConnectionDescriptor) -> Arc<H> + Send + Sync>;
