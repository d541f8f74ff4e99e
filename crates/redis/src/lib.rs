//! Redis connection handles for kvlink.
//!
//! [`RedisHandleFactory`] plugs into a `kvlink_registry::ConnectionRegistry`
//! and produces one [`RedisHandle`] per distinct descriptor. A handle opens
//! its connection lazily and speaks single-node, sentinel or cluster
//! depending on the descriptor's mode.

mod factory;
mod handle;

pub use factory::RedisHandleFactory;
pub use handle::RedisHandle;
