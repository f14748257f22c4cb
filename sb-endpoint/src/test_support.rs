//! Shared in-crate doubles for module tests.

use crate::address::EntityAddress;
use crate::broker::{BrokerClient, BrokerError, OutboundMessage};
use crate::context::ReceiveEndpointContext;
use crate::host::{Host, HostError};
use crate::topology::BrokerTopology;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Broker client double that records every call and supports per-operation
/// failure injection. Attempts are recorded before failure injection, except
/// `send`, which records delivered messages only.
#[derive(Default)]
pub(crate) struct TestBrokerClient {
    ensure_calls: Mutex<Vec<BrokerTopology>>,
    remove_calls: Mutex<Vec<BrokerTopology>>,
    sends: Mutex<Vec<(EntityAddress, OutboundMessage)>>,
    inject_ensure_failure: AtomicBool,
    inject_remove_failure: AtomicBool,
    inject_send_failure: AtomicBool,
}

impl TestBrokerClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_ensure(&self, fail: bool) {
        self.inject_ensure_failure.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_remove(&self, fail: bool) {
        self.inject_remove_failure.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_send(&self, fail: bool) {
        self.inject_send_failure.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn ensure_calls(&self) -> Vec<BrokerTopology> {
        self.ensure_calls.lock().unwrap().clone()
    }

    pub(crate) fn remove_calls(&self) -> Vec<BrokerTopology> {
        self.remove_calls.lock().unwrap().clone()
    }

    pub(crate) fn sends(&self) -> Vec<(EntityAddress, OutboundMessage)> {
        self.sends.lock().unwrap().clone()
    }

    /// Polls until at least `count` removal attempts were recorded, for
    /// asserting on the spawned teardown task.
    pub(crate) async fn wait_for_remove_calls(
        &self,
        count: usize,
        timeout: Duration,
    ) -> Result<(), String> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.remove_calls.lock().unwrap().len() >= count {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(format!("timed out waiting for {count} removal attempts"));
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl BrokerClient for TestBrokerClient {
    async fn ensure_subscription(&self, topology: &BrokerTopology) -> Result<(), BrokerError> {
        self.ensure_calls.lock().unwrap().push(topology.clone());
        if self.inject_ensure_failure.load(Ordering::SeqCst) {
            return Err(BrokerError::PermissionDenied(
                "injected ensure failure".to_string(),
            ));
        }
        Ok(())
    }

    async fn remove_subscription(&self, topology: &BrokerTopology) -> Result<(), BrokerError> {
        self.remove_calls.lock().unwrap().push(topology.clone());
        if self.inject_remove_failure.load(Ordering::SeqCst) {
            return Err(BrokerError::EntityNotFound(
                "injected removal failure".to_string(),
            ));
        }
        Ok(())
    }

    async fn send(
        &self,
        destination: &EntityAddress,
        message: OutboundMessage,
    ) -> Result<(), BrokerError> {
        if self.inject_send_failure.load(Ordering::SeqCst) {
            return Err(BrokerError::ConnectionLost(
                "injected send failure".to_string(),
            ));
        }
        self.sends
            .lock()
            .unwrap()
            .push((destination.clone(), message));
        Ok(())
    }
}

/// Host double that activates the context's client pipe, as a real host does
/// before dispatching messages, and keeps every created context.
#[derive(Default)]
pub(crate) struct TestHost {
    contexts: Mutex<Vec<ReceiveEndpointContext>>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contexts(&self) -> MutexGuard<'_, Vec<ReceiveEndpointContext>> {
        self.contexts.lock().unwrap()
    }
}

#[async_trait]
impl Host for TestHost {
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
