//! Endpoint builder: target of deferred specifications and producer of the
//! receive-endpoint context.

use crate::address::EntityAddress;
use crate::context::ReceiveEndpointContext;
use crate::settings::ResolvedSubscriptionSettings;
use crate::topology::BrokerTopology;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_PREFETCH_COUNT: u32 = 32;
const DEFAULT_CONCURRENT_MESSAGE_LIMIT: u32 = 16;

/// Failure applying one deferred specification to the builder.
#[derive(Debug)]
pub struct SpecificationError {
    message: String,
}

impl SpecificationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for SpecificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for SpecificationError {}

/// Deferred configuration command applied to the builder during the build
/// finalize pass. Mutates builder state only, never broker state.
pub type EndpointSpecification =
    Box<dyn Fn(&mut SubscriptionEndpointBuilder) -> Result<(), SpecificationError> + Send + Sync>;

/// Assembles one receive-endpoint context for one configuration.
///
/// Scoped to a single build pass: constructed from the frozen settings and
/// the memoized input address, mutated by specifications, then consumed by
/// [`create_receive_endpoint_context`](Self::create_receive_endpoint_context).
pub struct SubscriptionEndpointBuilder {
    settings: ResolvedSubscriptionSettings,
    input_address: EntityAddress,
    prefetch_count: u32,
    concurrent_message_limit: u32,
}

impl SubscriptionEndpointBuilder {
    pub(crate) fn new(
        settings: ResolvedSubscriptionSettings,
        input_address: EntityAddress,
    ) -> Self {
        Self {
            settings,
            input_address,
            prefetch_count: DEFAULT_PREFETCH_COUNT,
            concurrent_message_limit: DEFAULT_CONCURRENT_MESSAGE_LIMIT,
        }
    }

    pub fn settings(&self) -> &ResolvedSubscriptionSettings {
        &self.settings
    }

    pub fn prefetch_count(&self) -> u32 {
        self.prefetch_count
    }

    pub fn set_prefetch_count(&mut self, prefetch_count: u32) {
        self.prefetch_count = prefetch_count;
    }

    pub fn concurrent_message_limit(&self) -> u32 {
        self.concurrent_message_limit
    }

    pub fn set_concurrent_message_limit(&mut self, concurrent_message_limit: u32) {
        self.concurrent_message_limit = concurrent_message_limit;
    }

    /// Plans the broker topology and produces the finished context.
    /// Planning only; no broker I/O happens here.
    pub(crate) fn create_receive_endpoint_context(self) -> ReceiveEndpointContext {
        let broker_topology = BrokerTopology::plan(&self.settings);
        ReceiveEndpointContext::new(
            self.input_address,
            broker_topology,
            self.prefetch_count,
            self.concurrent_message_limit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::SubscriptionEndpointBuilder;
    use crate::address::EntityAddress;
    use crate::settings::{ResolvedSubscriptionSettings, RuleFilter};

    fn builder() -> SubscriptionEndpointBuilder {
        let settings = ResolvedSubscriptionSettings {
            path: "orders/new".to_string(),
            filter: Some(RuleFilter::Sql {
                expression: "1 = 1".to_string(),
            }),
            rule: None,
            remove_subscriptions: false,
        };
        SubscriptionEndpointBuilder::new(
            settings,
            EntityAddress::new("sb://ns.example/orders/new"),
        )
    }

    #[test]
    fn context_carries_builder_knobs_and_planned_topology() {
        let mut builder = builder();
        builder.set_prefetch_count(64);
        builder.set_concurrent_message_limit(8);

        let context = builder.create_receive_endpoint_context();

        assert_eq!(context.prefetch_count(), 64);
        assert_eq!(context.concurrent_message_limit(), 8);
        assert_eq!(context.broker_topology().path, "orders/new");
        assert!(context.broker_topology().filter.is_some());
        assert_eq!(context.input_address().as_str(), "sb://ns.example/orders/new");
        assert_eq!(context.client_pipe().filter_count(), 0);
    }
}
