//! Shared connection registry for kvlink.
//!
//! A [`ConnectionRegistry`] hands out one connection handle per distinct
//! descriptor fingerprint. Handles are built by a [`HandleFactory`], which
//! keeps the registry independent of any particular backend.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use kvlink_registry::ConnectionRegistry;
//! use kvlink_redis::RedisHandleFactory;
//!
//! let registry = Arc::new(ConnectionRegistry::new(RedisHandleFactory));
//! let lookup = registry.lookup();
//! ```

mod registry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use registry::{ConnectionRegistry, HandleFactory};
