//! Fingerprint computation for connection sharing.
//!
//! Fingerprints are the registry key: descriptors that fingerprint equally
//! share one connection handle.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use sha2::{Digest, Sha256};

use crate::descriptor::ConnectionDescriptor;

/// Separator placed between sorted addresses before hashing.
const ADDRESS_SEPARATOR: &str = ",";

/// Stable identity of a descriptor's address set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the fingerprint of a descriptor.
///
/// The fingerprint is an unpadded base64 SHA-256 digest of the
/// lexicographically sorted, comma-joined address list. Only the addresses
/// are hashed: two descriptors naming the same addresses with a different
/// mode or different credentials map to the same fingerprint.
///
/// # Example
///
/// ```
/// use kvlink_core::{ConnectionDescriptor, ConnectionOptions, Mode, fingerprint};
///
/// let a = ConnectionDescriptor::new(
///     vec!["b:2".into(), "a:1".into()],
///     Mode::Single,
///     ConnectionOptions::default(),
/// )
/// .unwrap();
/// let b = ConnectionDescriptor::new(
///     vec!["a:1".into(), "b:2".into()],
///     Mode::Single,
///     ConnectionOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(fingerprint(&a), fingerprint(&b));
/// ```
#[must_use]
pub fn fingerprint(descriptor: &ConnectionDescriptor) -> Fingerprint {
    let mut addresses: Vec<&str> = descriptor.addresses().iter().map(String::as_str).collect();
    addresses.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(addresses.join(ADDRESS_SEPARATOR).as_bytes());

    Fingerprint(STANDARD_NO_PAD.encode(hasher.finalize()))
}
