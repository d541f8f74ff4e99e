use std::time::Duration;

use redis::ToRedisArgs;

use kvlink_core::{ConnectionHandle, OperationError};

use crate::Client;
use crate::client::expiry_millis;

impl<H: ConnectionHandle> Client<H> {
    /// Set `key` to `value`, optionally expiring after `expiration`.
    ///
    /// Expirations are sent with millisecond precision (`PX`); anything
    /// shorter than a millisecond is sent as 1ms.
    pub async fn set(
        &self,
        key: &str,
        value: impl ToRedisArgs,
        expiration: Option<Duration>,
    ) -> Result<(), OperationError> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = expiration {
            cmd.arg("PX").arg(expiry_millis(ttl));
        }
        self.query(&cmd).await
    }

    /// Get the value of `key`, or `None` if it does not exist.
    pub async fn get(&self, key: &str) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("GET").arg(key)).await
    }

    /// Set `key` to `value` and return its previous value.
    pub async fn get_set(
        &self,
        key: &str,
        value: impl ToRedisArgs,
    ) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("GETSET").arg(key).arg(value)).await
    }

    /// Get the value of `key` and delete it.
    pub async fn get_del(&self, key: &str) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("GETDEL").arg(key)).await
    }

    /// Get the values of several keys; missing keys yield `None`.
    pub async fn mget(&self, keys: &[&str]) -> Result<Vec<Option<String>>, OperationError> {
        self.query(redis::cmd("MGET").arg(keys)).await
    }

    pub async fn incr(&self, key: &str) -> Result<i64, OperationError> {
        self.query(redis::cmd("INCR").arg(key)).await
    }

    pub async fn incr_by(&self, key: &str, increment: i64) -> Result<i64, OperationError> {
        self.query(redis::cmd("INCRBY").arg(key).arg(increment)).await
    }

    pub async fn decr(&self, key: &str) -> Result<i64, OperationError> {
        self.query(redis::cmd("DECR").arg(key)).await
    }

    pub async fn decr_by(&self, key: &str, decrement: i64) -> Result<i64, OperationError> {
        self.query(redis::cmd("DECRBY").arg(key).arg(decrement)).await
    }
}
