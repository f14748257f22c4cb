//! Broker topology: planning, startup reconciliation, and send-side
//! settings resolution.

mod plan;
pub use plan::BrokerTopology;

mod reconcile;
pub use reconcile::TopologyReconcileFilter;

mod send;
pub use send::{SendSettings, SendTopology, SubscriptionSendTopology};
