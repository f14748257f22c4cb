//! In-memory broker client that records every call and supports failure
//! injection per operation.

use async_trait::async_trait;
use sb_endpoint::{BrokerClient, BrokerError, BrokerTopology, EntityAddress, OutboundMessage};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Records topology and send operations. Attempts are recorded before
/// failure injection is applied, except `send`, which records delivered
/// messages only.
#[derive(Default)]
pub struct RecordingBrokerClient {
    ensure_calls: Mutex<Vec<BrokerTopology>>,
    remove_calls: Mutex<Vec<BrokerTopology>>,
    sends: Mutex<Vec<(EntityAddress, OutboundMessage)>>,
    inject_ensure_failure: AtomicBool,
    inject_remove_failure: AtomicBool,
    inject_send_failure: AtomicBool,
}

impl RecordingBrokerClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_ensure(&self, fail: bool) {
        self.inject_ensure_failure.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove(&self, fail: bool) {
        self.inject_remove_failure.store(fail, Ordering::SeqCst);
    }

    pub fn fail_send(&self, fail: bool) {
        self.inject_send_failure.store(fail, Ordering::SeqCst);
    }

    pub fn ensure_calls(&self) -> Vec<BrokerTopology> {
        self.ensure_calls.lock().unwrap().clone()
    }

    pub fn remove_calls(&self) -> Vec<BrokerTopology> {
        self.remove_calls.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<(EntityAddress, OutboundMessage)> {
        self.sends.lock().unwrap().clone()
    }

    /// Polls until at least `count` removal attempts were recorded, useful
    /// for asserting on the spawned teardown task.
    pub async fn wait_for_remove_calls(
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
impl BrokerClient for RecordingBrokerClient {
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
