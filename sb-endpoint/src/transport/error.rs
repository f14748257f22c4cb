//! Error-queue transport for faulted messages.

use super::DeliveryTransport;
use crate::address::EntityAddress;
use crate::broker::{BrokerError, OutboundMessage};
use crate::host::ConnectionContextSupervisor;
use crate::observability::events;
use crate::topology::SendSettings;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Moves faulted messages to the resolved error destination.
///
/// Holds the supervisor only; the broker connection is used lazily on first
/// delivery, so construction is safe before the connection exists.
pub struct BrokeredMessageErrorTransport {
    supervisor: Arc<ConnectionContextSupervisor>,
    settings: SendSettings,
}

impl BrokeredMessageErrorTransport {
    pub fn new(supervisor: Arc<ConnectionContextSupervisor>, settings: SendSettings) -> Self {
        Self {
            supervisor,
            settings,
        }
    }

    pub fn destination(&self) -> &EntityAddress {
        &self.settings.destination
    }
}

#[async_trait]
impl DeliveryTransport for BrokeredMessageErrorTransport {
    async fn deliver(&self, message: OutboundMessage) -> Result<(), BrokerError> {
        debug!(
            event = events::ERROR_TRANSPORT_DELIVER,
            destination = %self.settings.destination,
        );
        self.supervisor
            .client()
            .send(&self.settings.destination, message)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::BrokeredMessageErrorTransport;
    use crate::address::EntityAddress;
    use crate::broker::OutboundMessage;
    use crate::host::ConnectionContextSupervisor;
    use crate::topology::SendSettings;
    use crate::transport::DeliveryTransport;
    use crate::test_support::TestBrokerClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn deliver_sends_to_the_resolved_destination() {
        let client = Arc::new(TestBrokerClient::new());
        let supervisor = Arc::new(ConnectionContextSupervisor::new(client.clone()));
        let transport = BrokeredMessageErrorTransport::new(
            supervisor,
            SendSettings {
                destination: EntityAddress::new("sb://ns.example/orders/new_error"),
            },
        );

        transport
            .deliver(OutboundMessage::new(b"fault".to_vec()))
            .await
            .expect("delivery should succeed");

        let sends = client.sends();
        assert_eq!(sends.len(), 1);
        assert_eq!(sends[0].0.as_str(), "sb://ns.example/orders/new_error");
        assert_eq!(sends[0].1.body, b"fault");
    }
}
