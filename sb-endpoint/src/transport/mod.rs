//! Auxiliary delivery paths that route failed and dead-lettered messages
//! away from the main consumer.

mod dead_letter;
pub use dead_letter::BrokeredMessageDeadLetterTransport;

mod error;
pub use error::BrokeredMessageErrorTransport;

use crate::broker::{BrokerError, OutboundMessage};
use async_trait::async_trait;

/// Publishes a single message to a resolved auxiliary destination.
#[async_trait]
pub trait DeliveryTransport: Send + Sync {
    async fn deliver(&self, message: OutboundMessage) -> Result<(), BrokerError>;
}
