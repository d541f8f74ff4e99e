use std::fmt;
use std::sync::Arc;

use kvlink_core::ConnectionDescriptor;
use kvlink_registry::{ConnectionRegistry, HandleFactory};

use crate::client::Client;
use crate::error::ConstructionError;

/// Entry point handed to each caller for building clients.
///
/// Every client built here resolves its handle through the same shared
/// registry. Cloning the factory is cheap and shares the registry.
pub struct ClientFactory<F: HandleFactory> {
    registry: Arc<ConnectionRegistry<F>>,
}

impl<F: HandleFactory> ClientFactory<F> {
    pub fn new(registry: Arc<ConnectionRegistry<F>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry<F>> {
        &self.registry
    }

    /// Build a client from raw constructor arguments.
    ///
    /// Exactly one argument is accepted: either a connection URL string or
    /// a structured options object. The client is returned in the
    /// configured state; nothing is connected and the registry is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::ArgumentCount`] unless exactly one
    /// argument is given, and [`ConstructionError::Descriptor`] if it does
    /// not describe a valid connection.
    pub fn new_client(
        &self,
        args: &[serde_json::Value],
    ) -> Result<Client<F::Handle>, ConstructionError> {
        let [options] = args else {
            return Err(ConstructionError::ArgumentCount(args.len()));
        };
        let descriptor = ConnectionDescriptor::from_value(options)?;
        Ok(self.new_client_from_descriptor(descriptor))
    }

    /// Build a client from an already validated descriptor.
    pub fn new_client_from_descriptor(&self, descriptor: ConnectionDescriptor) -> Client<F::Handle> {
        Client::new(descriptor, self.registry.lookup())
    }
}

impl<F: HandleFactory> Clone for ClientFactory<F> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<F: HandleFactory> fmt::Debug for ClientFactory<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientFactory")
            .field("registry", &self.registry)
            .finish()
    }
}
