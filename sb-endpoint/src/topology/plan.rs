//! Planned broker-side topology for one subscription endpoint.

use crate::settings::{ResolvedSubscriptionSettings, RuleDescription, RuleFilter};

/// The subscription, rule, and filter that should exist broker-side for one
/// endpoint. A description only; creating or verifying the entities is the
/// reconciliation filter's job.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BrokerTopology {
    pub path: String,
    pub rule: Option<RuleDescription>,
    pub filter: Option<RuleFilter>,
}

impl BrokerTopology {
    /// Plans topology from resolved settings. Pure; no broker I/O.
    pub fn plan(settings: &ResolvedSubscriptionSettings) -> Self {
        Self {
            path: settings.path.clone(),
            rule: settings.rule.clone(),
            filter: settings.filter.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BrokerTopology;
    use crate::settings::{ResolvedSubscriptionSettings, RuleFilter};

    #[test]
    fn plan_mirrors_resolved_settings() {
        let resolved = ResolvedSubscriptionSettings {
            path: "orders/new".to_string(),
            filter: Some(RuleFilter::Sql {
                expression: "sku LIKE 'a%'".to_string(),
            }),
            rule: None,
            remove_subscriptions: true,
        };

        let topology = BrokerTopology::plan(&resolved);

        assert_eq!(topology.path, "orders/new");
        assert_eq!(topology.filter, resolved.filter);
        assert!(topology.rule.is_none());
    }
}
