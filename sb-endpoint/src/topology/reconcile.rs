//! Startup topology reconciliation and best-effort teardown.

use crate::broker::BrokerClient;
use crate::context::{ClientPipeFilter, PipeError};
use crate::observability::events;
use crate::settings::ResolvedSubscriptionSettings;
use crate::topology::BrokerTopology;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Client-pipe filter that makes broker-side topology match the plan before
/// any message is delivered, and optionally removes it on shutdown.
///
/// Reconciliation runs exactly once per endpoint even if the pipe is
/// activated again. A failed reconciliation propagates out of activation and
/// fails endpoint startup; messages are never delivered against an
/// unverified topology.
pub struct TopologyReconcileFilter {
    settings: ResolvedSubscriptionSettings,
    topology: BrokerTopology,
    remove_on_stop: bool,
    stopping: CancellationToken,
    client: Arc<dyn BrokerClient>,
    applied: AtomicBool,
}

impl TopologyReconcileFilter {
    pub fn new(
        settings: ResolvedSubscriptionSettings,
        topology: BrokerTopology,
        remove_on_stop: bool,
        stopping: CancellationToken,
        client: Arc<dyn BrokerClient>,
    ) -> Self {
        Self {
            settings,
            topology,
            remove_on_stop,
            stopping,
            client,
            applied: AtomicBool::new(false),
        }
    }

    /// Spawns the teardown task: one best-effort deletion attempt once the
    /// shutdown signal fires. Deletion failure is logged and swallowed.
    fn schedule_teardown(&self) {
        let stopping = self.stopping.clone();
        let client = self.client.clone();
        let topology = self.topology.clone();

        tokio::spawn(async move {
            stopping.cancelled().await;

            debug!(
                event = events::TOPOLOGY_REMOVE_ATTEMPT,
                path = %topology.path,
            );
            match client.remove_subscription(&topology).await {
                Ok(()) => debug!(
                    event = events::TOPOLOGY_REMOVE_OK,
                    path = %topology.path,
                ),
                Err(err) => warn!(
                    event = events::TOPOLOGY_REMOVE_FAILED,
                    path = %topology.path,
                    %err,
                    "best-effort subscription removal failed"
                ),
            }
        });
    }
}

#[async_trait]
impl ClientPipeFilter for TopologyReconcileFilter {
    async fn on_activate(&self) -> Result<(), PipeError> {
        if self.applied.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        debug!(
            event = events::TOPOLOGY_RECONCILE_START,
            path = %self.settings.path,
            has_rule = self.settings.rule.is_some(),
            has_filter = self.settings.filter.is_some(),
        );

        if let Err(err) = self.client.ensure_subscription(&self.topology).await {
            warn!(
                event = events::TOPOLOGY_RECONCILE_FAILED,
                path = %self.settings.path,
                %err,
            );
            return Err(PipeError::Reconcile(err));
        }

        debug!(
            event = events::TOPOLOGY_RECONCILE_OK,
            path = %self.settings.path,
        );

        if self.remove_on_stop {
            self.schedule_teardown();
        }

        Ok(())
    }
}
