//! Send-topology double that records the exact resolution arguments.

use sb_endpoint::{
    HostAddress, SendSettings, SendTopology, SubscriptionConfigurator, SubscriptionSendTopology,
};
use std::sync::Mutex;

/// Resolves like the default subscription send topology while recording the
/// `(configurator path, host address)` pair of every call.
#[derive(Default)]
pub struct RecordingSendTopology {
    inner: SubscriptionSendTopology,
    error_calls: Mutex<Vec<(String, HostAddress)>>,
    dead_letter_calls: Mutex<Vec<(String, HostAddress)>>,
}

impl RecordingSendTopology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_calls(&self) -> Vec<(String, HostAddress)> {
        self.error_calls.lock().unwrap().clone()
    }

    pub fn dead_letter_calls(&self) -> Vec<(String, HostAddress)> {
        self.dead_letter_calls.lock().unwrap().clone()
    }
}

impl SendTopology for RecordingSendTopology {
    fn error_settings(
        &self,
        configurator: &dyn SubscriptionConfigurator,
        host_address: &HostAddress,
    ) -> SendSettings {
        self.error_calls
            .lock()
            .unwrap()
            .push((configurator.path().to_string(), host_address.clone()));
        self.inner.error_settings(configurator, host_address)
    }

    fn dead_letter_settings(
        &self,
        configurator: &dyn SubscriptionConfigurator,
        host_address: &HostAddress,
    ) -> SendSettings {
        self.dead_letter_calls
            .lock()
            .unwrap()
            .push((configurator.path().to_string(), host_address.clone()));
        self.inner.dead_letter_settings(configurator, host_address)
    }
}
