use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use kvlink_core::{ConnectionDescriptor, ConnectionHandle, Fingerprint, Lookup};

/// Builds connection handles for the registry.
///
/// Construction must not perform I/O and cannot fail: connection problems
/// are reported by the handle when it is first used.
pub trait HandleFactory: Send + Sync + 'static {
    type Handle: ConnectionHandle;

    /// Build a new, unconnected handle for `descriptor`.
    fn create(&self, descriptor: &ConnectionDescriptor) -> Self::Handle;
}

/// Process-wide table of shared connection handles.
///
/// Maps each descriptor [`Fingerprint`] to exactly one handle. Entries are
/// created on first request and never evicted or replaced, so a handle lives
/// as long as the registry.
///
/// Create one registry at host startup, wrap it in an [`Arc`], and hand each
/// client the narrow capability returned by [`lookup`](Self::lookup).
pub struct ConnectionRegistry<F: HandleFactory> {
    factory: F,
    handles: RwLock<HashMap<Fingerprint, Arc<F::Handle>>>,
}

impl<F: HandleFactory> ConnectionRegistry<F> {
    pub fn new(factory: F) -> Self {
        Self::with_capacity(factory, 4)
    }

    pub fn with_capacity(factory: F, capacity: usize) -> Self {
        Self {
            factory,
            handles: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Return the handle for `descriptor`, creating it if this is the first
    /// request for its fingerprint.
    ///
    /// Known fingerprints are served under the shared lock. A miss takes the
    /// exclusive lock and checks again before building, since another caller
    /// may have inserted the entry between the two acquisitions.
    pub fn get_or_create(&self, descriptor: &ConnectionDescriptor) -> Arc<F::Handle> {
        let fingerprint = descriptor.fingerprint();

        let existing = self.handles.read().get(&fingerprint).cloned();
        if let Some(handle) = existing {
            trace!(%fingerprint, "reusing connection handle");
            return handle;
        }

        let mut handles = self.handles.write();
        if let Some(handle) = handles.get(&fingerprint) {
            trace!(%fingerprint, "connection handle created concurrently");
            return Arc::clone(handle);
        }

        debug!(
            %fingerprint,
            mode = %descriptor.mode(),
            addresses = ?descriptor.addresses(),
            "creating connection handle"
        );
        let handle = Arc::new(self.factory.create(descriptor));
        handles.insert(fingerprint, Arc::clone(&handle));
        handle
    }

    /// A lookup capability bound to this registry, for injection into clients.
    pub fn lookup(self: &Arc<Self>) -> Lookup<F::Handle> {
        let registry = Arc::clone(self);
        Arc::new(move |descriptor: &ConnectionDescriptor| registry.get_or_create(descriptor))
    }

    /// Return the handle registered under `fingerprint` without creating one.
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<Arc<F::Handle>> {
        self.handles.read().get(fingerprint).cloned()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.handles.read().contains_key(fingerprint)
    }

    /// Fingerprints of every registered handle, sorted.
    pub fn fingerprints(&self) -> Vec<Fingerprint> {
        let mut fingerprints: Vec<_> = self.handles.read().keys().cloned().collect();
        fingerprints.sort();
        fingerprints
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<F: HandleFactory> fmt::Debug for ConnectionRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("handles", &self.len())
            .finish_non_exhaustive()
    }
}
