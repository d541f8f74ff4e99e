use redis::ToRedisArgs;

use kvlink_core::{ConnectionHandle, OperationError};

use crate::Client;

impl<H: ConnectionHandle> Client<H> {
    /// Add members to a set, returning how many were new.
    pub async fn sadd(&self, key: &str, members: impl ToRedisArgs) -> Result<i64, OperationError> {
        self.query(redis::cmd("SADD").arg(key).arg(members)).await
    }

    /// Remove members from a set, returning how many were present.
    pub async fn srem(&self, key: &str, members: impl ToRedisArgs) -> Result<i64, OperationError> {
        self.query(redis::cmd("SREM").arg(key).arg(members)).await
    }

    pub async fn sismember(
        &self,
        key: &str,
        member: impl ToRedisArgs,
    ) -> Result<bool, OperationError> {
        self.query(redis::cmd("SISMEMBER").arg(key).arg(member))
            .await
    }

    pub async fn smembers(&self, key: &str) -> Result<Vec<String>, OperationError> {
        self.query(redis::cmd("SMEMBERS").arg(key)).await
    }

    pub async fn srandmember(&self, key: &str) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("SRANDMEMBER").arg(key)).await
    }

    pub async fn spop(&self, key: &str) -> Result<Option<String>, OperationError> {
        self.query(redis::cmd("SPOP").arg(key)).await
    }
}
