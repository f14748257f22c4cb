//! Host doubles: one that behaves like a real host, one that refuses
//! every endpoint.

use async_trait::async_trait;
use sb_endpoint::{Host, HostError, ReceiveEndpointContext};
use std::sync::{Mutex, MutexGuard};

/// Host double that activates the context's client pipe, as a real host
/// does before dispatching messages, and keeps every created context for
/// inspection.
#[derive(Default)]
pub struct RecordingHost {
    contexts: Mutex<Vec<ReceiveEndpointContext>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contexts(&self) -> MutexGuard<'_, Vec<ReceiveEndpointContext>> {
        self.contexts.lock().unwrap()
    }
}

#[async_trait]
impl Host for RecordingHost {
    async fn create_receive_endpoint(
        &self,
        context: ReceiveEndpointContext,
    ) -> Result<(), HostError> {
        context
            .client_pipe()
            .activate()
            .await
            .map_err(|err| HostError::new(err.to_string()))?;
        self.contexts.lock().unwrap().push(context);
        Ok(())
    }
}

/// Host double that refuses every endpoint.
pub struct FailingHost;

#[async_trait]
impl Host for FailingHost {
    async fn create_receive_endpoint(
        &self,
        _context: ReceiveEndpointContext,
    ) -> Result<(), HostError> {
        Err(HostError::new("host refused the endpoint"))
    }
}
