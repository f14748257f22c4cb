//! Broker addressing: namespace-level host addresses, entity addresses, and
//! the pluggable formatter that combines them.

use std::fmt::{Display, Formatter};

/// Namespace-level base address of a broker host, e.g. `sb://ns.example`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HostAddress(String);

impl HostAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for HostAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully qualified address of one broker-side entity (queue, topic, or
/// subscription path) under a namespace.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EntityAddress(String);

impl EntityAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntityAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Combines a host address and an entity path into a concrete broker address.
///
/// The combination rule is broker-specific, so it stays behind this seam
/// rather than being hardcoded into the endpoint configuration.
pub trait AddressFormatter: Send + Sync {
    /// Must be a deterministic pure function of `(host_address, path)`.
    fn input_address(&self, host_address: &HostAddress, path: &str) -> EntityAddress;
}

/// Default `<host-address>/<path>` formatter.
#[derive(Default)]
pub struct ServiceBusAddressFormatter;

impl AddressFormatter for ServiceBusAddressFormatter {
    fn input_address(&self, host_address: &HostAddress, path: &str) -> EntityAddress {
        let base = host_address.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        EntityAddress::new(format!("{base}/{path}"))
    }
}
