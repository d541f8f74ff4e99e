use std::collections::HashMap;

use redis::ToRedisArgs;

use kvlink_core::{ConnectionHandle, OperationError};

use crate::Client;

impl<H: ConnectionHandle> Client<H> {
    /// Set `field` in the hash at `key`. Returns `1` if the field is new.
    pub async fn hset(
        &self,
        key: &str,
        field: &str,
        value: impl ToRedisArgs,
    ) -> Result<i64, OperationError> {
        self.query(redis::cmd("HSET").arg(key).arg(field).arg(value))
            .await
    }

    /// Set `field` only if it does not exist yet.
    pub async fn hsetnx(
        &self,
        key: &str,
        field: &str,
        value: impl ToRedisArgs,
    ) -> Result<bool, OperationError> {
        self.query(redis::cmd("HSETNX").arg(key).arg(field).arg(value))
            .await
    }

    pub async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("HGET").arg(key).arg(field)).await
    }

    /// Delete fields, returning how many existed.
    pub async fn hdel(&self, key: &str, fields: &[&str]) -> Result<i64, OperationError> {
        self.query(redis::cmd("HDEL").arg(key).arg(fields)).await
    }

    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, OperationError> {
        self.query(redis::cmd("HGETALL").arg(key)).await
    }

    pub async fn hkeys(&self, key: &str) -> Result<Vec<String>, OperationError> {
        self.query(redis::cmd("HKEYS").arg(key)).await
    }

    pub async fn hvals(&self, key: &str) -> Result<Vec<String>, OperationError> {
        self.query(redis::cmd("HVALS").arg(key)).await
    }

    pub async fn hlen(&self, key: &str) -> Result<i64, OperationError> {
        self.query(redis::cmd("HLEN").arg(key)).await
    }

    pub async fn hincr_by(
        &self,
        key: &str,
        field: &str,
        increment: i64,
    ) -> Result<i64, OperationError> {
        self.query(redis::cmd("HINCRBY").arg(key).arg(field).arg(increment))
            .await
    }
}
