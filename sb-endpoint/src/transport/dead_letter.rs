//! Dead-letter transport for messages the endpoint will not consume.

use super::DeliveryTransport;
use crate::address::EntityAddress;
use crate::broker::{BrokerError, OutboundMessage};
use crate::host::ConnectionContextSupervisor;
use crate::observability::events;
use crate::topology::SendSettings;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Moves dead-lettered messages to the resolved skipped destination.
///
/// Construction performs no broker I/O; the connection is used lazily on
/// first delivery.
pub struct BrokeredMessageDeadLetterTransport {
    supervisor: Arc<ConnectionContextSupervisor>,
    settings: SendSettings,
}

impl BrokeredMessageDeadLetterTransport {
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
impl DeliveryTransport for BrokeredMessageDeadLetterTransport {
    async fn deliver(&self, message: OutboundMessage) -> Result<(), BrokerError> {
        debug!(
            event = events::DEAD_LETTER_TRANSPORT_DELIVER,
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
    use super::BrokeredMessageDeadLetterTransport;
    use crate::address::EntityAddress;
    use crate::broker::OutboundMessage;
    use crate::host::ConnectionContextSupervisor;
    use crate::topology::SendSettings;
    use crate::transport::DeliveryTransport;
    use crate::test_support::TestBrokerClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn delivery_failure_propagates_to_the_caller() {
        let client = Arc::new(TestBrokerClient::new());
        client.fail_send(true);
        let supervisor = Arc::new(ConnectionContextSupervisor::new(client.clone()));
        let transport = BrokeredMessageDeadLetterTransport::new(
            supervisor,
            SendSettings {
                destination: EntityAddress::new("sb://ns.example/orders/new_skipped"),
            },
        );

        let result = transport
            .deliver(OutboundMessage::new(b"skipped".to_vec()))
            .await;

        assert!(result.is_err());
        assert_eq!(client.sends().len(), 0);
    }
}
