//! Lazily connected clients for kvlink.
//!
//! A [`Client`] is what each caller holds. It is created in a configured
//! but disconnected state and binds to a shared connection handle on its
//! first command. Clients are normally built through a [`ClientFactory`],
//! which owns the shared registry and validates constructor arguments.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use kvlink_client::ClientFactory;
//! use kvlink_redis::RedisHandleFactory;
//! use kvlink_registry::ConnectionRegistry;
//!
//! let factory = ClientFactory::new(Arc::new(ConnectionRegistry::new(RedisHandleFactory)));
//! let client = factory.new_client(&[serde_json::json!("redis://localhost:6379")])?;
//!
//! // Connects here, on first use.
//! client.set("greeting", "hello", None).await?;
//! ```

mod client;
mod error;
mod factory;
mod hashes;
mod keys;
mod lists;
mod sets;
mod strings;

pub use client::{Client, ClientState};
pub use error::ConstructionError;
pub use factory::ClientFactory;
