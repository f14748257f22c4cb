//! Broker client contract. Entity management and messaging belong to the
//! broker SDK; this core consumes them through this interface only.

use crate::address::EntityAddress;
use crate::topology::BrokerTopology;
use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A single message published to an auxiliary destination.
#[derive(Clone, Debug, Default)]
pub struct OutboundMessage {
    pub body: Vec<u8>,
    pub properties: HashMap<String, String>,
}

impl OutboundMessage {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Failures surfaced by broker operations.
#[derive(Debug)]
pub enum BrokerError {
    PermissionDenied(String),
    TopologyMismatch(String),
    EntityNotFound(String),
    ConnectionLost(String),
}

impl Display for BrokerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BrokerError::PermissionDenied(detail) => write!(f, "permission denied: {detail}"),
            BrokerError::TopologyMismatch(detail) => write!(f, "topology mismatch: {detail}"),
            BrokerError::EntityNotFound(detail) => write!(f, "entity not found: {detail}"),
            BrokerError::ConnectionLost(detail) => write!(f, "connection lost: {detail}"),
        }
    }
}

impl Error for BrokerError {}

/// Asynchronous broker operations used by reconciliation and the auxiliary
/// transports. Implementations are expected to establish connections lazily;
/// holding a client performs no I/O by itself.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Idempotent create-or-verify of the planned subscription, rule, and
    /// filter.
    async fn ensure_subscription(&self, topology: &BrokerTopology) -> Result<(), BrokerError>;

    /// Deletes the broker-side subscription described by the plan.
    async fn remove_subscription(&self, topology: &BrokerTopology) -> Result<(), BrokerError>;

    /// Publishes one message to the given entity.
    async fn send(
        &self,
        destination: &EntityAddress,
        message: OutboundMessage,
    ) -> Result<(), BrokerError>;
}
