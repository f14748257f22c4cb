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

//! Host-side contracts shared read-only across every endpoint built on one
//! broker namespace.

use crate::address::HostAddress;
use crate::broker::BrokerClient;
use crate::context::ReceiveEndpointContext;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Owns the broker client handle for one namespace connection and the
/// shutdown signal observed by topology teardown.
///
/// Construction performs no broker I/O; the client is used lazily by the
/// reconciliation filter and the auxiliary transports.
pub struct ConnectionContextSupervisor {
    client: Arc<dyn BrokerClient>,
    stopping: CancellationToken,
}

impl ConnectionContextSupervisor {
    pub fn new(client: Arc<dyn BrokerClient>) -> Self {
        Self {
            client,
            stopping: CancellationToken::new(),
        }
    }

    pub fn client(&self) -> Arc<dyn BrokerClient> {
        self.client.clone()
    }

    /// The shutdown signal. Fired once when the host stops; cloned tokens
    /// observe the same signal.
    pub fn stopping(&self) -> CancellationToken {
        self.stopping.clone()
    }

    /// Fires the shutdown signal. Idempotent.
    pub fn stop(&self) {
        self.stopping.cancel();
    }
}

/// Namespace-level configuration shared by every endpoint built on a host.
/// Read-only from the endpoint core's perspective.
#[derive(Clone)]
pub struct HostConfiguration {
    host_address: HostAddress,
    supervisor: Arc<ConnectionContextSupervisor>,
}

impl HostConfiguration {
    pub fn new(host_address: HostAddress, supervisor: Arc<ConnectionContextSupervisor>) -> Self {
        Self {
            host_address,
            supervisor,
        }
    }

    pub fn host_address(&self) -> &HostAddress {
        &self.host_address
    }

    pub fn supervisor(&self) -> &Arc<ConnectionContextSupervisor> {
        &self.supervisor
    }
}

/// Failure reported by a host while taking ownership of a finished endpoint.
#[derive(Debug)]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for HostError {}

/// Generic "create receive endpoint" contract: takes ownership of a finished
/// context and starts message consumption.
///
/// Implementations must activate the context's client pipe before delivering
/// any message to consumer logic, so topology reconciliation completes ahead
/// of dispatch.
#[async_trait]
pub trait Host: Send + Sync {
    async fn create_receive_endpoint(
        &self,
        context: ReceiveEndpointContext,
    ) -> Result<(), HostError>;
}
