use kvlink_core::ConnectionDescriptor;
use kvlink_registry::HandleFactory;

use crate::handle::RedisHandle;

/// Creates [`RedisHandle`]s for the connection registry.
///
/// Creation never touches the network; each handle connects on its first
/// command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisHandleFactory;

impl HandleFactory for RedisHandleFactory {
    type Handle = RedisHandle;

    fn create(&self, descriptor: &ConnectionDescriptor) -> RedisHandle {
        RedisHandle::new(descriptor.clone())
    }
}
