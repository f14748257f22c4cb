//! Validation results surfaced by configurators and endpoint configurations.
//!
//! Configuration problems are reported as values, never thrown; callers
//! decide which dispositions are fatal before building an endpoint.

use std::fmt::{Display, Formatter};

/// Severity of a single validation finding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Disposition {
    Success,
    Warning,
    Failure,
}

/// One finding produced while validating endpoint configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationResult {
    pub disposition: Disposition,
    pub key: String,
    pub message: String,
}

impl ValidationResult {
    pub fn success(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            disposition: Disposition::Success,
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn warning(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            disposition: Disposition::Warning,
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn failure(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            disposition: Disposition::Failure,
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.disposition == Disposition::Failure
    }
}

impl Display for ValidationResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let disposition = match self.disposition {
            Disposition::Success => "success",
            Disposition::Warning => "warning",
            Disposition::Failure => "failure",
        };
        write!(f, "[{disposition}] {}: {}", self.key, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationResult;

    #[test]
    fn failure_is_flagged_and_display_is_stable() {
        let result = ValidationResult::failure("path", "subscription path must not be empty");

        assert!(result.is_failure());
        assert_eq!(
            result.to_string(),
            "[failure] path: subscription path must not be empty"
        );
    }

    #[test]
    fn success_and_warning_are_not_failures() {
        assert!(!ValidationResult::success("path", "ok").is_failure());
        assert!(!ValidationResult::warning("prefetch", "very large").is_failure());
    }
}
