//! Send-side settings resolution for auxiliary destinations.

use crate::address::{EntityAddress, HostAddress};
use crate::settings::SubscriptionConfigurator;

const ERROR_QUEUE_SUFFIX: &str = "_error";
const DEAD_LETTER_QUEUE_SUFFIX: &str = "_skipped";

/// Resolved destination settings for one auxiliary publish path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SendSettings {
    pub destination: EntityAddress,
}

/// Pure resolution from configuration and host address to destination
/// settings for the error and dead-letter paths.
pub trait SendTopology: Send + Sync {
    fn error_settings(
        &self,
        configurator: &dyn SubscriptionConfigurator,
        host_address: &HostAddress,
    ) -> SendSettings;

    fn dead_letter_settings(
        &self,
        configurator: &dyn SubscriptionConfigurator,
        host_address: &HostAddress,
    ) -> SendSettings;
}

/// Default naming: `<path>_error` and `<path>_skipped` under the namespace.
#[derive(Default)]
pub struct SubscriptionSendTopology;

impl SubscriptionSendTopology {
    fn suffixed(
        &self,
        configurator: &dyn SubscriptionConfigurator,
        host_address: &HostAddress,
        suffix: &str,
    ) -> SendSettings {
        let base = host_address.as_str().trim_end_matches('/');
        let path = configurator.path().trim_start_matches('/');
        SendSettings {
            destination: EntityAddress::new(format!("{base}/{path}{suffix}")),
        }
    }
}

impl SendTopology for SubscriptionSendTopology {
    fn error_settings(
        &self,
        configurator: &dyn SubscriptionConfigurator,
        host_address: &HostAddress,
    ) -> SendSettings {
        self.suffixed(configurator, host_address, ERROR_QUEUE_SUFFIX)
    }

    fn dead_letter_settings(
        &self,
        configurator: &dyn SubscriptionConfigurator,
        host_address: &HostAddress,
    ) -> SendSettings {
        self.suffixed(configurator, host_address, DEAD_LETTER_QUEUE_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::{SendTopology, SubscriptionSendTopology};
    use crate::address::HostAddress;
    use crate::settings::TopicSubscriptionConfigurator;

    #[test]
    fn error_and_dead_letter_destinations_use_suffixed_paths() {
        let topology = SubscriptionSendTopology;
        let configurator = TopicSubscriptionConfigurator::new("orders/new");
        let host_address = HostAddress::new("sb://ns.example");

        let error = topology.error_settings(&configurator, &host_address);
        let dead_letter = topology.dead_letter_settings(&configurator, &host_address);

        assert_eq!(error.destination.as_str(), "sb://ns.example/orders/new_error");
        assert_eq!(
            dead_letter.destination.as_str(),
            "sb://ns.example/orders/new_skipped"
        );
    }

    #[test]
    fn resolution_is_pure_for_a_fixed_input() {
        let topology = SubscriptionSendTopology;
        let configurator = TopicSubscriptionConfigurator::new("orders/new");
        let host_address = HostAddress::new("sb://ns.example/");

        assert_eq!(
            topology.error_settings(&configurator, &host_address),
            topology.error_settings(&configurator, &host_address)
        );
    }
}
