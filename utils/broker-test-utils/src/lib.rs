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

//! Test doubles for `sb-endpoint`: a recording in-memory broker client, a
//! recording host, a recording send topology, and one-time logging init.

mod logging;
pub use logging::init_logging;

mod recording_broker;
pub use recording_broker::RecordingBrokerClient;

mod recording_host;
pub use recording_host::{FailingHost, RecordingHost};

mod recording_send_topology;
pub use recording_send_topology::RecordingSendTopology;
