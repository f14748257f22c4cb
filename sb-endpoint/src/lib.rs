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

//! # sb-endpoint
//!
//! `sb-endpoint` assembles topic-subscription receive endpoints for a message
//! broker: it turns declarative subscription settings into a fully wired
//! endpoint bound to broker-side topology (subscription, rule, filter) and to
//! the auxiliary error and dead-letter delivery paths.
//!
//! Typical usage is API-first and centered on [`SubscriptionSettings`] and
//! [`SubscriptionEndpointConfiguration`]. The broker SDK, the host process,
//! and the message-dispatch pipeline stay behind the [`BrokerClient`],
//! [`Host`], and [`ClientPipeFilter`] contracts; everything here is safe to
//! validate and build before any broker I/O occurs.
//!
//! ## Assembling an endpoint
//!
//! ```
//! use std::sync::Arc;
//! use sb_endpoint::{
//!     BrokerClient, BrokerError, BrokerTopology, ConnectionContextSupervisor,
//!     DefaultEndpointConfiguration, EntityAddress, Host, HostAddress, HostConfiguration,
//!     HostError, OutboundMessage, ReceiveEndpointContext, SubscriptionEndpointConfiguration,
//!     SubscriptionSettings,
//! };
//! # use async_trait::async_trait;
//! # struct NoopBroker;
//! # #[async_trait]
//! # impl BrokerClient for NoopBroker {
//! #     async fn ensure_subscription(&self, _topology: &BrokerTopology) -> Result<(), BrokerError> {
//! #         Ok(())
//! #     }
//! #     async fn remove_subscription(&self, _topology: &BrokerTopology) -> Result<(), BrokerError> {
//! #         Ok(())
//! #     }
//! #     async fn send(
//! #         &self,
//! #         _destination: &EntityAddress,
//! #         _message: OutboundMessage,
//! #     ) -> Result<(), BrokerError> {
//! #         Ok(())
//! #     }
//! # }
//! # struct StartingHost;
//! # #[async_trait]
//! # impl Host for StartingHost {
//! #     async fn create_receive_endpoint(
//! #         &self,
//! #         context: ReceiveEndpointContext,
//! #     ) -> Result<(), HostError> {
//! #         context
//! #             .client_pipe()
//! #             .activate()
//! #             .await
//! #             .map_err(|err| HostError::new(err.to_string()))
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let supervisor = Arc::new(ConnectionContextSupervisor::new(Arc::new(NoopBroker)));
//! let host_configuration =
//!     HostConfiguration::new(HostAddress::new("sb://ns.example"), supervisor);
//!
//! let mut configuration = SubscriptionEndpointConfiguration::new(
//!     host_configuration,
//!     SubscriptionSettings::for_path("orders/new"),
//!     Arc::new(DefaultEndpointConfiguration::default()),
//! );
//!
//! assert!(configuration.validate().is_empty());
//! assert_eq!(
//!     configuration.input_address().as_str(),
//!     "sb://ns.example/orders/new"
//! );
//!
//! configuration.build(&StartingHost).await.unwrap();
//! # });
//! ```
//!
//! ## Construction sequence
//!
//! `build` freezes the settings draft, applies the registered specifications
//! to a builder, obtains the receive-endpoint context, installs the
//! [`TopologyReconcileFilter`] into the context's client pipe, and hands the
//! context to the host. No broker I/O happens inside `build`; the filter
//! performs the idempotent create-or-verify when the host first activates
//! the pipe, ahead of message dispatch, and optionally removes the
//! subscription when the supervisor's stopping signal fires.
//!
//! ## Internal architecture map
//!
//! - Settings: draft/resolved subscription settings and configurator seam
//! - Addressing: host/entity addresses and the pluggable formatter
//! - Topology: planned broker topology, reconciliation, send-side resolution
//! - Build: endpoint builder, receive-endpoint context, client pipe
//! - Transports: error and dead-letter delivery paths
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits events
//! and does not unconditionally initialize a global subscriber; binaries and
//! tests are responsible for one-time `tracing_subscriber` initialization at
//! process boundaries.

mod address;
pub use address::{AddressFormatter, EntityAddress, HostAddress, ServiceBusAddressFormatter};

mod broker;
pub use broker::{BrokerClient, BrokerError, OutboundMessage};

mod builder;
pub use builder::{EndpointSpecification, SpecificationError, SubscriptionEndpointBuilder};

mod context;
pub use context::{ClientPipe, ClientPipeFilter, PipeError, ReceiveEndpointContext};

mod endpoint_config;
pub use endpoint_config::{
    BuildError, DefaultEndpointConfiguration, EndpointCapability, EndpointConfiguration,
    SubscriptionEndpointConfiguration,
};

mod host;
pub use host::{ConnectionContextSupervisor, Host, HostConfiguration, HostError};

#[doc(hidden)]
pub mod observability;

mod settings;
pub use settings::{
    ResolvedSubscriptionSettings, RuleDescription, RuleFilter, SubscriptionConfigurator,
    SubscriptionSettings, TopicSubscriptionConfigurator,
};

#[cfg(test)]
mod test_support;

mod topology;
pub use topology::{
    BrokerTopology, SendSettings, SendTopology, SubscriptionSendTopology, TopologyReconcileFilter,
};

mod transport;
pub use transport::{
    BrokeredMessageDeadLetterTransport, BrokeredMessageErrorTransport, DeliveryTransport,
};

mod validation;
pub use validation::{Disposition, ValidationResult};
