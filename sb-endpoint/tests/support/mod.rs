use broker_test_utils::RecordingBrokerClient;
use sb_endpoint::{
    ConnectionContextSupervisor, DefaultEndpointConfiguration, HostAddress, HostConfiguration,
    SubscriptionEndpointConfiguration, SubscriptionSettings,
};
use std::sync::Arc;

pub(crate) fn make_host_configuration(client: Arc<RecordingBrokerClient>) -> HostConfiguration {
    HostConfiguration::new(
        HostAddress::new("sb://ns.example"),
        Arc::new(ConnectionContextSupervisor::new(client)),
    )
}

pub(crate) fn make_configuration(
    client: Arc<RecordingBrokerClient>,
    settings: SubscriptionSettings,
) -> SubscriptionEndpointConfiguration {
    SubscriptionEndpointConfiguration::new(
        make_host_configuration(client),
        settings,
        Arc::new(DefaultEndpointConfiguration::default()),
    )
}
