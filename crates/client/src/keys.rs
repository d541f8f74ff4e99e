use std::time::Duration;

use redis::{FromRedisValue, ToRedisArgs};

use kvlink_core::{ConnectionHandle, OperationError};

use crate::Client;
use crate::client::expiry_millis;

impl<H: ConnectionHandle> Client<H> {
    /// Check that the store is reachable.
    pub async fn ping(&self) -> Result<String, OperationError> {
        self.query(&redis::cmd("PING")).await
    }

    /// Delete keys, returning how many existed.
    pub async fn del(&self, keys: &[&str]) -> Result<i64, OperationError> {
        self.query(redis::cmd("DEL").arg(keys)).await
    }

    /// Count how many of `keys` exist.
    pub async fn exists(&self, keys: &[&str]) -> Result<i64, OperationError> {
        self.query(redis::cmd("EXISTS").arg(keys)).await
    }

    /// A random key from the current database, or `None` if it is empty.
    pub async fn random_key(&self) -> Result<Option<String>, OperationError> {
        self.query(&redis::cmd("RANDOMKEY")).await
    }

    /// Expire `key` after `ttl`, with millisecond precision (`PEXPIRE`).
    /// Returns `false` if the key does not exist.
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, OperationError> {
        self.query(redis::cmd("PEXPIRE").arg(key).arg(expiry_millis(ttl)))
            .await
    }

    /// Remaining time to live of `key` in seconds.
    ///
    /// `-1` means the key has no expiry, `-2` that it does not exist.
    pub async fn ttl(&self, key: &str) -> Result<i64, OperationError> {
        self.query(redis::cmd("TTL").arg(key)).await
    }

    /// Remove the expiry of `key`.
    pub async fn persist(&self, key: &str) -> Result<bool, OperationError> {
        self.query(redis::cmd("PERSIST").arg(key)).await
    }

    /// Send an arbitrary command.
    ///
    /// Use `redis::Value` as `T` to receive the raw reply.
    pub async fn send_command<T: FromRedisValue>(
        &self,
        name: &str,
        args: impl ToRedisArgs,
    ) -> Result<T, OperationError> {
        self.query(redis::cmd(name).arg(args)).await
    }
}
