use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use redis::{Cmd, FromRedisValue};
use tracing::debug;

use kvlink_core::{ConnectionDescriptor, ConnectionHandle, Fingerprint, Lookup, OperationError};

/// Lifecycle state of a [`Client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Descriptor stored, no handle resolved yet.
    Configured,
    /// Handle resolved and cached; the registry is not consulted again.
    Bound,
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configured => write!(f, "configured"),
            Self::Bound => write!(f, "bound"),
        }
    }
}

/// Per-caller facade over a shared connection handle.
///
/// Constructing a client performs no I/O and does not touch the registry, so
/// it is safe wherever network access is forbidden. The first command
/// resolves the handle through the injected [`Lookup`] and caches it; the
/// transition from [`ClientState::Configured`] to [`ClientState::Bound`]
/// happens exactly once, even when several tasks issue their first command
/// on the same client at the same time.
pub struct Client<H: ConnectionHandle> {
    descriptor: ConnectionDescriptor,
    lookup: Lookup<H>,
    handle: OnceLock<Arc<H>>,
}

impl<H: ConnectionHandle> Client<H> {
    pub fn new(descriptor: ConnectionDescriptor, lookup: Lookup<H>) -> Self {
        Self {
            descriptor,
            lookup,
            handle: OnceLock::new(),
        }
    }

    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.descriptor.fingerprint()
    }

    pub fn state(&self) -> ClientState {
        if self.handle.get().is_some() {
            ClientState::Bound
        } else {
            ClientState::Configured
        }
    }

    /// The resolved handle, if a command has already been issued.
    pub fn bound_handle(&self) -> Option<&Arc<H>> {
        self.handle.get()
    }

    /// Resolve the handle, binding the client on first call.
    fn handle(&self) -> &Arc<H> {
        self.handle.get_or_init(|| {
            let handle = (self.lookup)(&self.descriptor);
            debug!(
                fingerprint = %self.descriptor.fingerprint(),
                mode = %self.descriptor.mode(),
                "client bound to connection handle"
            );
            handle
        })
    }

    /// Send `cmd` through the bound handle and convert the reply.
    pub(crate) async fn query<T: FromRedisValue>(&self, cmd: &Cmd) -> Result<T, OperationError> {
        let value = self.handle().query(cmd).await?;
        Ok(redis::from_owned_redis_value(value)?)
    }
}

/// Convert an expiration to whole milliseconds for `PX`/`PEXPIRE`.
///
/// Sub-millisecond durations round up to 1; the server never sees a zero
/// expiry.
pub(crate) fn expiry_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

impl<H: ConnectionHandle> fmt::Debug for Client<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("descriptor", &self.descriptor)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kvlink_core::testing::RecordingHandle;
    use kvlink_registry::ConnectionRegistry;
    use kvlink_registry::testing::RecordingFactory;

    use super::*;

    /// Wrap a registry lookup so the test can count calls into it.
    fn counting_lookup(
        registry: &Arc<ConnectionRegistry<RecordingFactory>>,
    ) -> (Lookup<RecordingHandle>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = registry.lookup();
        let counter = Arc::clone(&calls);
        let lookup: Lookup<RecordingHandle> = Arc::new(move |descriptor: &ConnectionDescriptor| {
            counter.fetch_add(1, Ordering::SeqCst);
            inner(descriptor)
        });
        (lookup, calls)
    }

    fn registry() -> Arc<ConnectionRegistry<RecordingFactory>> {
        Arc::new(ConnectionRegistry::new(RecordingFactory::default()))
    }

    #[test]
    fn construction_is_inert() {
        let registry = registry();
        let (lookup, calls) = counting_lookup(&registry);

        let client = Client::new(ConnectionDescriptor::single("a:1").unwrap(), lookup);

        assert_eq!(client.state(), ClientState::Configured);
        assert!(client.bound_handle().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn first_command_binds_once() {
        let registry = registry();
        let (lookup, calls) = counting_lookup(&registry);
        let client = Client::new(ConnectionDescriptor::single("a:1").unwrap(), lookup);

        let _: () = client.query(&redis::cmd("PING")).await.unwrap();
        assert_eq!(client.state(), ClientState::Bound);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let _: () = client.query(&redis::cmd("PING")).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let handle = client.bound_handle().unwrap();
        assert_eq!(handle.query_count(), 2);
        assert_eq!(registry.factory().created(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_commands_on_one_client_bind_once() {
        let registry = registry();
        let (lookup, calls) = counting_lookup(&registry);
        let client = Arc::new(Client::new(
            ConnectionDescriptor::single("a:1").unwrap(),
            lookup,
        ));

        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let client = Arc::clone(&client);
                tokio::spawn(async move { client.query::<()>(&redis::cmd("PING")).await })
            })
            .collect();
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.bound_handle().unwrap().query_count(), 32);
    }

    #[tokio::test]
    async fn clients_with_equal_descriptors_share_a_handle() {
        let registry = registry();
        let a = Client::new(
            ConnectionDescriptor::new(
                vec!["b:2".into(), "a:1".into()],
                kvlink_core::Mode::Single,
                kvlink_core::ConnectionOptions::default(),
            )
            .unwrap(),
            registry.lookup(),
        );
        let b = Client::new(
            ConnectionDescriptor::new(
                vec!["a:1".into(), "b:2".into()],
                kvlink_core::Mode::Single,
                kvlink_core::ConnectionOptions::default(),
            )
            .unwrap(),
            registry.lookup(),
        );
        assert_eq!(a.fingerprint(), b.fingerprint());

        let _: () = a.query(&redis::cmd("PING")).await.unwrap();
        let _: () = b.query(&redis::cmd("PING")).await.unwrap();

        assert!(Arc::ptr_eq(
            a.bound_handle().unwrap(),
            b.bound_handle().unwrap()
        ));
        assert_eq!(registry.factory().created(), 1);
    }

    #[tokio::test]
    async fn operation_errors_leave_client_usable() {
        let registry = registry();
        let client = Client::new(
            ConnectionDescriptor::single("a:1").unwrap(),
            registry.lookup(),
        );

        // Bind first so errors can be scripted on the shared handle.
        let _: () = client.query(&redis::cmd("PING")).await.unwrap();
        let handle = Arc::clone(client.bound_handle().unwrap());
        handle.push_io_error("connection reset");

        let err = client.query::<()>(&redis::cmd("PING")).await.unwrap_err();
        assert!(matches!(err, OperationError::Redis(ref e) if e.is_io_error()));
        assert_eq!(client.state(), ClientState::Bound);

        let _: () = client.query(&redis::cmd("PING")).await.unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn debug_reports_state() {
        let registry = registry();
        let client = Client::new(
            ConnectionDescriptor::single("a:1").unwrap(),
            registry.lookup(),
        );
        assert!(format!("{client:?}").contains("Configured"));
        assert_eq!(ClientState::Bound.to_string(), "bound");
    }
}
