//! A factory producing [`RecordingHandle`]s, for registry and client tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use kvlink_core::ConnectionDescriptor;
use kvlink_core::testing::RecordingHandle;

use crate::registry::HandleFactory;

/// Counts how many handles it has built.
///
/// An optional delay is slept inside [`create`](HandleFactory::create) to
/// widen the window in which concurrent callers can race.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    created: AtomicUsize,
    delay: Option<Duration>,
}

impl RecordingFactory {
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of handles built so far.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl HandleFactory for RecordingFactory {
    type Handle = RecordingHandle;

    fn create(&self, descriptor: &ConnectionDescriptor) -> RecordingHandle {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        RecordingHandle::new(descriptor.clone())
    }
}
