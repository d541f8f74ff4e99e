use redis::ToRedisArgs;

use kvlink_core::{ConnectionHandle, OperationError};

use crate::Client;

impl<H: ConnectionHandle> Client<H> {
    /// Prepend values to a list, returning its new length.
    pub async fn lpush(&self, key: &str, values: impl ToRedisArgs) -> Result<i64, OperationError> {
        self.query(redis::cmd("LPUSH").arg(key).arg(values)).await
    }

    /// Append values to a list, returning its new length.
    pub async fn rpush(&self, key: &str, values: impl ToRedisArgs) -> Result<i64, OperationError> {
        self.query(redis::cmd("RPUSH").arg(key).arg(values)).await
    }

    pub async fn lpop(&self, key: &str) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("LPOP").arg(key)).await
    }

    pub async fn rpop(&self, key: &str) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("RPOP").arg(key)).await
    }

    /// Elements between `start` and `stop` inclusive; negative indices count
    /// from the tail.
    pub async fn lrange(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, OperationError> {
        self.query(redis::cmd("LRANGE").arg(key).arg(start).arg(stop))
            .await
    }

    pub async fn lindex(&self, key: &str, index: i64) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("LINDEX").arg(key).arg(index)).await
    }

    pub async fn lset(
        &self,
        key: &str,
        index: i64,
        value: impl ToRedisArgs,
    ) -> Result<(), OperationError> {
        self.query(redis::cmd("LSET").arg(key).arg(index).arg(value))
            .await
    }

    /// Remove up to `count` occurrences of `value`, returning how many were
    /// removed.
    pub async fn lrem(
        &self,
        key: &str,
        count: i64,
        value: impl ToRedisArgs,
    ) -> Result<i64, OperationError> {
        self.query(redis::cmd("LREM").arg(key).arg(count).arg(value))
            .await
    }

    pub async fn llen(&self, key: &str) -> Result<i64, OperationError> {
        self.query(redis::cmd("LLEN").arg(key)).await
    }
}
