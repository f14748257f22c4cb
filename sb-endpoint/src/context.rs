//! Receive-endpoint context and the client pipe it owns.

use crate::address::EntityAddress;
use crate::broker::BrokerError;
use crate::topology::BrokerTopology;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Failures raised while activating the client pipe.
#[derive(Debug)]
pub enum PipeError {
    Reconcile(BrokerError),
}

impl Display for PipeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PipeError::Reconcile(err) => write!(f, "topology reconciliation failed: {err}"),
        }
    }
}

impl Error for PipeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipeError::Reconcile(err) => Some(err),
        }
    }
}

/// Filter run when the client pipe first becomes active, ahead of message
/// dispatch. Filters guard their own idempotence across repeat activations.
#[async_trait]
pub trait ClientPipeFilter: Send + Sync {
    async fn on_activate(&self) -> Result<(), PipeError>;
}

/// Ordered activation filters for the client-side management pipe.
///
/// The host activates the pipe once when the endpoint starts; activation must
/// complete before the pipeline delivers messages to consumer logic.
#[derive(Default)]
pub struct ClientPipe {
    filters: Vec<Arc<dyn ClientPipeFilter>>,
}

impl ClientPipe {
    /// Appends a filter. Installation order is activation order.
    pub fn use_filter(&mut self, filter: Arc<dyn ClientPipeFilter>) {
        self.filters.push(filter);
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Runs every installed filter in order, stopping at the first failure.
    pub async fn activate(&self) -> Result<(), PipeError> {
        for filter in &self.filters {
            filter.on_activate().await?;
        }
        Ok(())
    }
}

/// Finished, ready-to-run endpoint descriptor.
///
/// Owned exclusively by the configuration during build, then handed to the
/// host, which takes ownership and starts consumption.
pub struct ReceiveEndpointContext {
    input_address: EntityAddress,
    broker_topology: BrokerTopology,
    client_pipe: ClientPipe,
    prefetch_count: u32,
    concurrent_message_limit: u32,
}

impl ReceiveEndpointContext {
    pub(crate) fn new(
        input_address: EntityAddress,
        broker_topology: BrokerTopology,
        prefetch_count: u32,
        concurrent_message_limit: u32,
    ) -> Self {
        Self {
            input_address,
            broker_topology,
            client_pipe: ClientPipe::default(),
            prefetch_count,
            concurrent_message_limit,
        }
    }

    pub fn input_address(&self) -> &EntityAddress {
        &self.input_address
    }

    pub fn broker_topology(&self) -> &BrokerTopology {
        &self.broker_topology
    }

    pub fn client_pipe(&self) -> &ClientPipe {
        &self.client_pipe
    }

    pub(crate) fn client_pipe_mut(&mut self) -> &mut ClientPipe {
        &mut self.client_pipe
    }

    pub fn prefetch_count(&self) -> u32 {
        self.prefetch_count
    }

    pub fn concurrent_message_limit(&self) -> u32 {
        self.concurrent_message_limit
    }
}
