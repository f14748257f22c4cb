//! Canonical structured event names used across `sb-endpoint`.

// Endpoint build lifecycle events.
pub const ENDPOINT_BUILD_START: &str = "endpoint_build_start";
pub const ENDPOINT_BUILD_OK: &str = "endpoint_build_ok";
pub const ENDPOINT_BUILD_FAILED: &str = "endpoint_build_failed";

// Topology reconciliation and teardown events.
pub const TOPOLOGY_RECONCILE_START: &str = "topology_reconcile_start";
pub const TOPOLOGY_RECONCILE_OK: &str = "topology_reconcile_ok";
pub const TOPOLOGY_RECONCILE_FAILED: &str = "topology_reconcile_failed";
pub const TOPOLOGY_REMOVE_ATTEMPT: &str = "topology_remove_attempt";
pub const TOPOLOGY_REMOVE_OK: &str = "topology_remove_ok";
pub const TOPOLOGY_REMOVE_FAILED: &str = "topology_remove_failed";

// Auxiliary transport events.
pub const ERROR_TRANSPORT_DELIVER: &str = "error_transport_deliver";
pub const DEAD_LETTER_TRANSPORT_DELIVER: &str = "dead_letter_transport_deliver";
