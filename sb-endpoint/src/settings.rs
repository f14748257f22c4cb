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

//! Subscription settings: a mutable draft that is frozen into an immutable
//! resolved value once endpoint construction begins.

use crate::address::{AddressFormatter, EntityAddress, HostAddress, ServiceBusAddressFormatter};
use crate::validation::ValidationResult;
use std::sync::Arc;

/// Longest entity path the broker accepts.
const MAX_ENTITY_PATH_LENGTH: usize = 260;

/// Filter applied to a broker-side subscription rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RuleFilter {
    Sql { expression: String },
    CorrelationId { correlation_id: String },
}

/// Full description of a broker-side rule: name, filter, and optional action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleDescription {
    pub name: String,
    pub filter: RuleFilter,
    pub action: Option<String>,
}

/// Capability a subscription configurator exposes to the endpoint machinery:
/// the entity path it configures and validation of its own settings.
///
/// The same configurator instance is handed to send-topology resolution, so
/// auxiliary destination naming follows `path()`.
pub trait SubscriptionConfigurator: Send + Sync {
    fn path(&self) -> &str;
    fn validate(&self) -> Vec<ValidationResult>;
}

/// Default configurator for a plain topic subscription.
pub struct TopicSubscriptionConfigurator {
    path: String,
}

impl TopicSubscriptionConfigurator {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SubscriptionConfigurator for TopicSubscriptionConfigurator {
    fn path(&self) -> &str {
        &self.path
    }

    fn validate(&self) -> Vec<ValidationResult> {
        let mut results = Vec::new();
        if self.path.is_empty() {
            results.push(ValidationResult::failure(
                "path",
                "subscription path must not be empty",
            ));
        } else if self.path.len() > MAX_ENTITY_PATH_LENGTH {
            results.push(ValidationResult::failure(
                "path",
                format!("subscription path exceeds {MAX_ENTITY_PATH_LENGTH} characters"),
            ));
        }
        results
    }
}

/// Mutable description of one subscription endpoint.
///
/// Filter and rule setters are last-write-wins until [`freeze`](Self::freeze)
/// produces the resolved value; nothing is validated at set time.
pub struct SubscriptionSettings {
    path: String,
    filter: Option<RuleFilter>,
    rule: Option<RuleDescription>,
    remove_subscriptions: bool,
    configurator: Arc<dyn SubscriptionConfigurator>,
    address_formatter: Arc<dyn AddressFormatter>,
}

impl SubscriptionSettings {
    pub fn new(path: impl Into<String>, configurator: Arc<dyn SubscriptionConfigurator>) -> Self {
        Self {
            path: path.into(),
            filter: None,
            rule: None,
            remove_subscriptions: false,
            configurator,
            address_formatter: Arc::new(ServiceBusAddressFormatter),
        }
    }

    /// Settings for `path` with the default topic-subscription configurator.
    pub fn for_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let configurator = Arc::new(TopicSubscriptionConfigurator::new(path.clone()));
        Self::new(path, configurator)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn filter(&self) -> Option<&RuleFilter> {
        self.filter.as_ref()
    }

    pub fn rule(&self) -> Option<&RuleDescription> {
        self.rule.as_ref()
    }

    pub fn remove_subscriptions(&self) -> bool {
        self.remove_subscriptions
    }

    pub fn configurator(&self) -> &Arc<dyn SubscriptionConfigurator> {
        &self.configurator
    }

    pub fn set_filter(&mut self, filter: RuleFilter) {
        self.filter = Some(filter);
    }

    pub fn set_rule(&mut self, rule: RuleDescription) {
        self.rule = Some(rule);
    }

    pub fn set_remove_subscriptions(&mut self, remove_subscriptions: bool) {
        self.remove_subscriptions = remove_subscriptions;
    }

    pub fn set_address_formatter(&mut self, address_formatter: Arc<dyn AddressFormatter>) {
        self.address_formatter = address_formatter;
    }

    /// Formats the input address for this subscription under `host_address`.
    pub fn input_address(&self, host_address: &HostAddress) -> EntityAddress {
        self.address_formatter.input_address(host_address, &self.path)
    }

    /// Finalizes the draft into the immutable value consumed by topology
    /// planning and reconciliation. Later draft mutations do not affect the
    /// returned value.
    pub(crate) fn freeze(&self) -> ResolvedSubscriptionSettings {
        ResolvedSubscriptionSettings {
            path: self.path.clone(),
            filter: self.filter.clone(),
            rule: self.rule.clone(),
            remove_subscriptions: self.remove_subscriptions,
        }
    }
}

/// Immutable subscription settings produced by the freeze step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedSubscriptionSettings {
    pub path: String,
    pub filter: Option<RuleFilter>,
    pub rule: Option<RuleDescription>,
    pub remove_subscriptions: bool,
}

#[cfg(test)]
mod tests {
    use super::{
        RuleDescription, RuleFilter, SubscriptionConfigurator, SubscriptionSettings,
        TopicSubscriptionConfigurator, MAX_ENTITY_PATH_LENGTH,
    };
    use crate::address::HostAddress;

    #[test]
    fn filter_and_rule_setters_are_last_write_wins() {
        let mut settings = SubscriptionSettings::for_path("orders/new");

        settings.set_filter(RuleFilter::Sql {
            expression: "sku = 'a'".to_string(),
        });
        settings.set_filter(RuleFilter::CorrelationId {
            correlation_id: "orders".to_string(),
        });
        settings.set_rule(RuleDescription {
            name: "first".to_string(),
            filter: RuleFilter::Sql {
                expression: "1 = 1".to_string(),
            },
            action: None,
        });
        settings.set_rule(RuleDescription {
            name: "second".to_string(),
            filter: RuleFilter::Sql {
                expression: "2 = 2".to_string(),
            },
            action: Some("SET routed = true".to_string()),
        });

        assert_eq!(
            settings.filter(),
            Some(&RuleFilter::CorrelationId {
                correlation_id: "orders".to_string()
            })
        );
        assert_eq!(settings.rule().map(|rule| rule.name.as_str()), Some("second"));
    }

    #[test]
    fn freeze_captures_draft_state_and_ignores_later_mutation() {
        let mut settings = SubscriptionSettings::for_path("orders/new");
        settings.set_remove_subscriptions(true);

        let resolved = settings.freeze();

        settings.set_filter(RuleFilter::Sql {
            expression: "late = true".to_string(),
        });
        settings.set_remove_subscriptions(false);

        assert_eq!(resolved.path, "orders/new");
        assert!(resolved.remove_subscriptions);
        assert!(resolved.filter.is_none());
    }

    #[test]
    fn input_address_uses_the_configured_formatter() {
        let settings = SubscriptionSettings::for_path("orders/new");
        let address = settings.input_address(&HostAddress::new("sb://ns.example"));

        assert_eq!(address.as_str(), "sb://ns.example/orders/new");
    }

    #[test]
    fn default_configurator_rejects_empty_and_oversized_paths() {
        let empty = TopicSubscriptionConfigurator::new("");
        let results = empty.validate();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_failure());

        let oversized = TopicSubscriptionConfigurator::new("x".repeat(MAX_ENTITY_PATH_LENGTH + 1));
        assert!(oversized.validate()[0].is_failure());

        let valid = TopicSubscriptionConfigurator::new("orders/new");
        assert!(valid.validate().is_empty());
    }
}
