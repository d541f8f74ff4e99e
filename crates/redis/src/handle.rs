use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, MultiplexedConnection};
use redis::cluster::ClusterClientBuilder;
use redis::cluster_async::ClusterConnection;
use redis::sentinel::{SentinelClient, SentinelNodeConnectionInfo, SentinelServerType};
use redis::{
    Cmd, ConnectionAddr, ConnectionInfo, ErrorKind, RedisConnectionInfo, RedisError, RedisResult,
    TlsMode, Value,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use kvlink_core::{
    ClusterOptions, ConnectionDescriptor, ConnectionHandle, Mode, OperationError,
};

/// An established connection for one of the supported modes.
///
/// Every variant is a cheaply cloneable multiplexed connection.
#[derive(Clone)]
enum Connection {
    Single(ConnectionManager),
    Sentinel(MultiplexedConnection),
    Cluster(ClusterConnection),
}

impl Connection {
    async fn query(&mut self, cmd: &Cmd) -> RedisResult<Value> {
        match self {
            Self::Single(conn) => cmd.query_async(conn).await,
            Self::Sentinel(conn) => cmd.query_async(conn).await,
            Self::Cluster(conn) => cmd.query_async(conn).await,
        }
    }
}

/// The cached connection plus a counter bumped on every new connection.
///
/// A failed command only discards the connection it actually used, so a
/// late failure on an old connection cannot evict a newer one.
#[derive(Debug)]
struct Slot<C> {
    conn: Option<C>,
    generation: u64,
}

impl<C: Clone> Slot<C> {
    fn new() -> Self {
        Self {
            conn: None,
            generation: 0,
        }
    }

    fn current(&self) -> Option<(C, u64)> {
        self.conn.as_ref().map(|c| (c.clone(), self.generation))
    }

    fn install(&mut self, conn: C) -> u64 {
        self.generation += 1;
        self.conn = Some(conn);
        self.generation
    }

    /// Drop the connection if it is still the one from `generation`.
    fn discard(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.conn.is_some() {
            self.conn = None;
            true
        } else {
            false
        }
    }
}

/// Redis-backed implementation of [`ConnectionHandle`].
///
/// Creating a handle only stores the descriptor. The connection is opened on
/// the first command and reused afterwards. If the connection drops, the
/// failing command returns the error and the next command reconnects.
pub struct RedisHandle {
    descriptor: ConnectionDescriptor,
    connection: Mutex<Slot<Connection>>,
}

impl RedisHandle {
    pub fn new(descriptor: ConnectionDescriptor) -> Self {
        Self {
            descriptor,
            connection: Mutex::new(Slot::new()),
        }
    }

    /// Whether a connection is currently established.
    pub async fn is_connected(&self) -> bool {
        self.connection.lock().await.conn.is_some()
    }

    /// Return the current connection, opening it if necessary.
    ///
    /// The slot stays locked while connecting so concurrent first commands
    /// share one connection attempt.
    async fn connection(&self) -> Result<(Connection, u64), OperationError> {
        let mut slot = self.connection.lock().await;
        if let Some(current) = slot.current() {
            return Ok(current);
        }

        let conn = with_timeout(self.descriptor.options().dial_timeout, self.connect()).await?;
        debug!(
            fingerprint = %self.descriptor.fingerprint(),
            mode = %self.descriptor.mode(),
            "connected to redis"
        );
        let generation = slot.install(conn.clone());
        Ok((conn, generation))
    }

    async fn connect(&self) -> RedisResult<Connection> {
        match self.descriptor.mode() {
            Mode::Single => self.connect_single().await,
            Mode::Sentinel { master_name } => self.connect_sentinel(master_name).await,
            Mode::Cluster(options) => self.connect_cluster(options).await,
        }
    }

    async fn connect_single(&self) -> RedisResult<Connection> {
        // Only the first address is used in single-node mode.
        let (host, port) = self
            .descriptor
            .host_ports()
            .into_iter()
            .next()
            .ok_or_else(|| RedisError::from((ErrorKind::InvalidClientConfig, "no address")))?;
        let client = redis::Client::open(self.node_info(host, port, self.redis_info()))?;
        let mut conn = ConnectionManager::new(client).await?;
        self.set_client_name(&mut conn).await?;
        Ok(Connection::Single(conn))
    }

    async fn connect_sentinel(&self, master_name: &str) -> RedisResult<Connection> {
        let options = self.descriptor.options();
        let sentinel_auth = RedisConnectionInfo {
            username: options.sentinel_username.clone(),
            password: options.sentinel_password.clone(),
            ..RedisConnectionInfo::default()
        };
        let sentinels: Vec<ConnectionInfo> = self
            .descriptor
            .host_ports()
            .into_iter()
            .map(|(host, port)| self.node_info(host, port, sentinel_auth.clone()))
            .collect();

        let master_info = SentinelNodeConnectionInfo {
            tls_mode: options.tls.then_some(TlsMode::Secure),
            redis_connection_info: Some(self.redis_info()),
        };
        let mut sentinel = SentinelClient::build(
            sentinels,
            master_name.to_owned(),
            Some(master_info),
            SentinelServerType::Master,
        )?;
        let mut conn = sentinel.get_async_connection().await?;
        self.set_client_name(&mut conn).await?;
        Ok(Connection::Sentinel(conn))
    }

    /// Cluster connections do not carry `client_name`: the cluster client
    /// opens node connections on its own and has no hook to name them.
    async fn connect_cluster(&self, cluster: &ClusterOptions) -> RedisResult<Connection> {
        let options = self.descriptor.options();
        if let Some(name) = &options.client_name {
            debug!(client_name = %name, "client name is not applied in cluster mode");
        }
        let nodes: Vec<ConnectionInfo> = self
            .descriptor
            .host_ports()
            .into_iter()
            .map(|(host, port)| self.node_info(host, port, RedisConnectionInfo::default()))
            .collect();

        let mut builder = ClusterClientBuilder::new(nodes);
        if let Some(username) = &options.username {
            builder = builder.username(username.clone());
        }
        if let Some(password) = &options.password {
            builder = builder.password(password.clone());
        }
        if cluster.read_from_replicas {
            builder = builder.read_from_replicas();
        }

        let conn = builder.build()?.get_async_connection().await?;
        Ok(Connection::Cluster(conn))
    }

    /// Credentials and database for data nodes.
    fn redis_info(&self) -> RedisConnectionInfo {
        let options = self.descriptor.options();
        RedisConnectionInfo {
            db: options.database,
            username: options.username.clone(),
            password: options.password.clone(),
            ..RedisConnectionInfo::default()
        }
    }

    fn node_info(&self, host: String, port: u16, redis: RedisConnectionInfo) -> ConnectionInfo {
        let addr = if self.descriptor.options().tls {
            ConnectionAddr::TcpTls {
                host,
                port,
                insecure: false,
                tls_params: None,
            }
        } else {
            ConnectionAddr::Tcp(host, port)
        };
        ConnectionInfo { addr, redis }
    }

    async fn set_client_name<C>(&self, conn: &mut C) -> RedisResult<()>
    where
        C: redis::aio::ConnectionLike + Send,
    {
        if let Some(name) = &self.descriptor.options().client_name {
            redis::cmd("CLIENT")
                .arg("SETNAME")
                .arg(name)
                .query_async::<()>(conn)
                .await?;
        }
        Ok(())
    }

    /// Forget the connection from `generation` so the next command
    /// reconnects. A newer connection is left alone.
    async fn reset(&self, generation: u64) -> bool {
        self.connection.lock().await.discard(generation)
    }
}

#[async_trait]
impl ConnectionHandle for RedisHandle {
    async fn query(&self, cmd: &Cmd) -> Result<Value, OperationError> {
        let (mut conn, generation) = self.connection().await?;

        match with_timeout(self.descriptor.options().response_timeout, conn.query(cmd)).await {
            Err(OperationError::Redis(err)) if is_disconnect(&err) => {
                if self.reset(generation).await {
                    warn!(
                        fingerprint = %self.descriptor.fingerprint(),
                        error = %err,
                        generation,
                        "redis connection lost, will reconnect on next command"
                    );
                }
                Err(OperationError::Redis(err))
            }
            result => result,
        }
    }

    fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }
}

fn is_disconnect(err: &RedisError) -> bool {
    err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal()
}

/// Run `fut`, failing with [`OperationError::Timeout`] once `limit` elapses.
async fn with_timeout<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = RedisResult<T>>,
) -> Result<T, OperationError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| OperationError::Timeout(limit))?
            .map_err(OperationError::from),
        None => fut.await.map_err(OperationError::from),
    }
}
