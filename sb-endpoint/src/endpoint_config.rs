/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Subscription endpoint configuration: validates settings, builds the
//! endpoint, and binds topology reconciliation and the auxiliary transports.

use crate::address::{EntityAddress, HostAddress};
use crate::builder::{EndpointSpecification, SpecificationError, SubscriptionEndpointBuilder};
use crate::host::{Host, HostConfiguration, HostError};
use crate::observability::events;
use crate::settings::{RuleDescription, RuleFilter, SubscriptionSettings};
use crate::topology::{SendTopology, SubscriptionSendTopology, TopologyReconcileFilter};
use crate::transport::{
    BrokeredMessageDeadLetterTransport, BrokeredMessageErrorTransport, DeliveryTransport,
};
use crate::validation::ValidationResult;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Base endpoint configuration capability shared by endpoint kinds: resolves
/// send-side settings and contributes inherited validation results.
pub trait EndpointConfiguration: Send + Sync {
    fn send_topology(&self) -> &Arc<dyn SendTopology>;
    fn validate(&self) -> Vec<ValidationResult>;
}

/// Default base configuration backed by the subscription send topology and
/// carrying no inherited validation findings of its own.
pub struct DefaultEndpointConfiguration {
    send_topology: Arc<dyn SendTopology>,
}

impl DefaultEndpointConfiguration {
    pub fn new(send_topology: Arc<dyn SendTopology>) -> Self {
        Self { send_topology }
    }
}

impl Default for DefaultEndpointConfiguration {
    fn default() -> Self {
        Self::new(Arc::new(SubscriptionSendTopology))
    }
}

impl EndpointConfiguration for DefaultEndpointConfiguration {
    fn send_topology(&self) -> &Arc<dyn SendTopology> {
        &self.send_topology
    }

    fn validate(&self) -> Vec<ValidationResult> {
        Vec::new()
    }
}

/// Capability surface the generic receive-endpoint machinery drives on any
/// endpoint kind. Dispatched explicitly instead of through a class
/// hierarchy; callers cache the transports they create.
pub trait EndpointCapability: Send + Sync {
    fn validate(&self) -> Vec<ValidationResult>;
    fn create_error_transport(&self) -> Arc<dyn DeliveryTransport>;
    fn create_dead_letter_transport(&self) -> Arc<dyn DeliveryTransport>;
}

/// Build failures. Construction touches no broker state, so a failed build
/// is retryable with corrected configuration; a completed build is final.
#[derive(Debug)]
pub enum BuildError {
    AlreadyBuilt,
    Specification(SpecificationError),
    Host(HostError),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::AlreadyBuilt => write!(f, "endpoint was already built"),
            BuildError::Specification(err) => {
                write!(f, "failed to apply endpoint specification: {err}")
            }
            BuildError::Host(err) => write!(f, "host failed to create receive endpoint: {err}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BuildError::AlreadyBuilt => None,
            BuildError::Specification(err) => Some(err),
            BuildError::Host(err) => Some(err),
        }
    }
}

/// Single entry point for assembling one subscription receive endpoint.
///
/// Owns the settings draft for its whole lifetime, computes the input
/// address lazily, validates on demand, and drives
/// [`build`](Self::build) exactly once.
pub struct SubscriptionEndpointConfiguration {
    host_configuration: HostConfiguration,
    settings: SubscriptionSettings,
    endpoint_configuration: Arc<dyn EndpointConfiguration>,
    specifications: Vec<EndpointSpecification>,
    input_address: OnceLock<EntityAddress>,
    built: bool,
}

impl SubscriptionEndpointConfiguration {
    pub fn new(
        host_configuration: HostConfiguration,
        settings: SubscriptionSettings,
        endpoint_configuration: Arc<dyn EndpointConfiguration>,
    ) -> Self {
        Self {
            host_configuration,
            settings,
            endpoint_configuration,
            specifications: Vec::new(),
            input_address: OnceLock::new(),
            built: false,
        }
    }

    /// Read-only view of the underlying settings draft.
    pub fn settings(&self) -> &SubscriptionSettings {
        &self.settings
    }

    pub fn host_address(&self) -> &HostAddress {
        self.host_configuration.host_address()
    }

    /// The endpoint's input address, computed from the host address and the
    /// subscription path on first read and memoized. Later draft mutations
    /// never change the cached value.
    pub fn input_address(&self) -> &EntityAddress {
        self.input_address.get_or_init(|| {
            self.settings
                .input_address(self.host_configuration.host_address())
        })
    }

    /// Stores a rule filter onto the settings draft. Last write before
    /// `build` wins; nothing is validated at set time.
    pub fn set_filter(&mut self, filter: RuleFilter) {
        self.settings.set_filter(filter);
    }

    /// Stores a rule description onto the settings draft. Last write before
    /// `build` wins.
    pub fn set_rule(&mut self, rule: RuleDescription) {
        self.settings.set_rule(rule);
    }

    /// Registers a deferred specification applied to the builder during
    /// `build`, in registration order.
    pub fn add_specification(&mut self, specification: EndpointSpecification) {
        self.specifications.push(specification);
    }

    /// Ordered validation: subscription-specific results first, then the
    /// inherited base results. Side-effect free and callable in any state.
    pub fn validate(&self) -> Vec<ValidationResult> {
        let mut results = self.settings.configurator().validate();
        results.extend(self.endpoint_configuration.validate());
        results
    }

    /// Assembles the endpoint and hands it to `host`.
    ///
    /// Freezes the settings draft, applies every registered specification to
    /// a fresh builder, installs the topology reconciliation filter into the
    /// context's client pipe, and calls the host's create-receive-endpoint
    /// operation. Exactly one reconciliation is scheduled per successful
    /// build, and no broker I/O happens here; the filter defers it to pipe
    /// activation. A completed build makes every later call return
    /// [`BuildError::AlreadyBuilt`].
    pub async fn build(&mut self, host: &dyn Host) -> Result<(), BuildError> {
        if self.built {
            return Err(BuildError::AlreadyBuilt);
        }

        debug!(
            event = events::ENDPOINT_BUILD_START,
            path = self.settings.path(),
        );

        let resolved = self.settings.freeze();
        let input_address = self.input_address().clone();
        let mut builder = SubscriptionEndpointBuilder::new(resolved.clone(), input_address);

        for specification in &self.specifications {
            if let Err(err) = specification(&mut builder) {
                warn!(
                    event = events::ENDPOINT_BUILD_FAILED,
                    path = self.settings.path(),
                    %err,
                );
                return Err(BuildError::Specification(err));
            }
        }

        let mut context = builder.create_receive_endpoint_context();

        let supervisor = self.host_configuration.supervisor();
        let remove_on_stop = resolved.remove_subscriptions;
        let filter = TopologyReconcileFilter::new(
            resolved,
            context.broker_topology().clone(),
            remove_on_stop,
            supervisor.stopping(),
            supervisor.client(),
        );
        context.client_pipe_mut().use_filter(Arc::new(filter));

        if let Err(err) = host.create_receive_endpoint(context).await {
            warn!(
                event = events::ENDPOINT_BUILD_FAILED,
                path = self.settings.path(),
                %err,
            );
            return Err(BuildError::Host(err));
        }

        self.built = true;
        debug!(
            event = events::ENDPOINT_BUILD_OK,
            path = self.settings.path(),
        );
        Ok(())
    }
}

impl EndpointCapability for SubscriptionEndpointConfiguration {
    fn validate(&self) -> Vec<ValidationResult> {
        SubscriptionEndpointConfiguration::validate(self)
    }

    fn create_error_transport(&self) -> Arc<dyn DeliveryTransport> {
        let settings = self.endpoint_configuration.send_topology().error_settings(
            self.settings.configurator().as_ref(),
            self.host_configuration.host_address(),
        );
        Arc::new(BrokeredMessageErrorTransport::new(
            self.host_configuration.supervisor().clone(),
            settings,
        ))
    }

    fn create_dead_letter_transport(&self) -> Arc<dyn DeliveryTransport> {
        let settings = self
            .endpoint_configuration
            .send_topology()
            .dead_letter_settings(
                self.settings.configurator().as_ref(),
                self.host_configuration.host_address(),
            );
        Arc::new(BrokeredMessageDeadLetterTransport::new(
            self.host_configuration.supervisor().clone(),
            settings,
        ))
    }
}
