//! Connection descriptors.
//!
//! A [`ConnectionDescriptor`] names the endpoints of a remote store and how
//! to interpret them. Descriptors are validated once, on construction, and
//! are immutable afterwards.

use std::fmt;
use std::time::Duration;

use crate::error::DescriptorError;
use crate::fingerprint::{Fingerprint, fingerprint};

/// Operating mode of the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// A single standalone node.
    Single,
    /// A sentinel-monitored master; the addresses are the sentinels.
    Sentinel { master_name: String },
    /// A cluster; the addresses are seed nodes.
    Cluster(ClusterOptions),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Sentinel { .. } => write!(f, "sentinel"),
            Self::Cluster(_) => write!(f, "cluster"),
        }
    }
}

/// Cluster-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterOptions {
    /// Route read-only commands to replica nodes.
    pub read_from_replicas: bool,
}

/// Auxiliary connection settings.
///
/// None of these take part in handle identity; they are handed to the
/// underlying connection unchanged.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Logical database index (single-node and sentinel modes).
    pub database: i64,
    /// Name announced with `CLIENT SETNAME`. Applied in single-node and
    /// sentinel modes; cluster connections ignore it.
    pub client_name: Option<String>,
    /// Connect over TLS.
    pub tls: bool,
    pub sentinel_username: Option<String>,
    pub sentinel_password: Option<String>,
    /// Upper bound on establishing a connection.
    pub dial_timeout: Option<Duration>,
    /// Upper bound on a single command round-trip.
    pub response_timeout: Option<Duration>,
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const REDACTED: &str = "<redacted>";
        f.debug_struct("ConnectionOptions")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("database", &self.database)
            .field("client_name", &self.client_name)
            .field("tls", &self.tls)
            .field("sentinel_username", &self.sentinel_username)
            .field(
                "sentinel_password",
                &self.sentinel_password.as_ref().map(|_| REDACTED),
            )
            .field("dial_timeout", &self.dial_timeout)
            .field("response_timeout", &self.response_timeout)
            .finish()
    }
}

/// A validated description of which remote endpoints to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    addresses: Vec<String>,
    mode: Mode,
    options: ConnectionOptions,
}

impl ConnectionDescriptor {
    /// Create a descriptor, validating every address.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::MissingAddresses`] for an empty list and
    /// [`DescriptorError::InvalidAddress`] for an entry that is not a
    /// `host:port` pair.
    pub fn new(
        addresses: Vec<String>,
        mode: Mode,
        options: ConnectionOptions,
    ) -> Result<Self, DescriptorError> {
        if addresses.is_empty() {
            return Err(DescriptorError::MissingAddresses);
        }
        for address in &addresses {
            split_address(address)?;
        }
        if let Mode::Sentinel { master_name } = &mode
            && master_name.is_empty()
        {
            return Err(DescriptorError::Malformed(
                "masterName must not be empty".into(),
            ));
        }

        Ok(Self {
            addresses,
            mode,
            options,
        })
    }

    /// Shorthand for a single-node descriptor with default options.
    pub fn single(address: impl Into<String>) -> Result<Self, DescriptorError> {
        Self::new(
            vec![address.into()],
            Mode::Single,
            ConnectionOptions::default(),
        )
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// The registry key for this descriptor.
    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint(self)
    }

    /// Split each address into `(host, port)`.
    ///
    /// Addresses are validated on construction, so this cannot fail.
    pub fn host_ports(&self) -> Vec<(String, u16)> {
        self.addresses
            .iter()
            .filter_map(|a| split_address(a).ok())
            .collect()
    }
}

/// Split a `host:port` string. IPv6 hosts must be bracketed (`[::1]:6379`).
///
/// # Errors
///
/// Returns [`DescriptorError::InvalidAddress`] if the host is empty or the
/// port is missing or out of range.
pub fn split_address(address: &str) -> Result<(String, u16), DescriptorError> {
    let invalid = |reason: &str| DescriptorError::InvalidAddress {
        address: address.to_owned(),
        reason: reason.to_owned(),
    };

    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| invalid("expected host:port"))?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    if host.is_empty() {
        return Err(invalid("empty host"));
    }
    if host.contains(':') && !address.starts_with('[') {
        return Err(invalid("ipv6 hosts must be bracketed"));
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| invalid("port must be a number between 0 and 65535"))?;

    Ok((host.to_owned(), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_address() {
        assert_eq!(
            split_address("localhost:6379").unwrap(),
            ("localhost".to_owned(), 6379)
        );
    }

    #[test]
    fn split_bracketed_ipv6() {
        assert_eq!(
            split_address("[::1]:7000").unwrap(),
            ("::1".to_owned(), 7000)
        );
    }

    #[test]
    fn split_rejects_bad_addresses() {
        for bad in ["localhost", ":6379", "host:port", "host:70000", "::1:6379"] {
            assert!(
                matches!(
                    split_address(bad),
                    Err(DescriptorError::InvalidAddress { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn empty_address_list_is_rejected() {
        let err =
            ConnectionDescriptor::new(vec![], Mode::Single, ConnectionOptions::default())
                .unwrap_err();
        assert_eq!(err, DescriptorError::MissingAddresses);
    }

    #[test]
    fn empty_master_name_is_rejected() {
        let err = ConnectionDescriptor::new(
            vec!["s:26379".into()],
            Mode::Sentinel {
                master_name: String::new(),
            },
            ConnectionOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DescriptorError::Malformed(_)));
    }

    #[test]
    fn host_ports_keep_declared_order() {
        let desc = ConnectionDescriptor::new(
            vec!["b:2".into(), "a:1".into()],
            Mode::Cluster(ClusterOptions::default()),
            ConnectionOptions::default(),
        )
        .unwrap();
        assert_eq!(
            desc.host_ports(),
            vec![("b".to_owned(), 2), ("a".to_owned(), 1)]
        );
    }

    #[test]
    fn debug_redacts_passwords() {
        let options = ConnectionOptions {
            password: Some("hunter2".into()),
            sentinel_password: Some("s3cret".into()),
            ..ConnectionOptions::default()
        };
        let rendered = format!("{options:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn mode_display() {
        assert_eq!(Mode::Single.to_string(), "single");
        assert_eq!(
            Mode::Sentinel {
                master_name: "m".into()
            }
            .to_string(),
            "sentinel"
        );
        assert_eq!(
            Mode::Cluster(ClusterOptions::default()).to_string(),
            "cluster"
        );
    }
}
