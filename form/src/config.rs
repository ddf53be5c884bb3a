//! Configuration for the todo form.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unset or unparsable variables fall back to the default value.

use crate::types::EnvelopeShape;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while parsing configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting holds a value outside its accepted set
    #[error("Unknown {key} value: '{value}'")]
    UnknownValue {
        /// Setting being parsed
        key: &'static str,
        /// Rejected value
        value: String,
    },
}

/// What happens to the input after a submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitPolicy {
    /// Clear the input after handing the state to the sink
    #[default]
    #[serde(rename = "reset")]
    ResetText,
    /// Leave the submitted text in the input
    #[serde(rename = "retain")]
    RetainText,
}

impl FromStr for SubmitPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(Self::ResetText),
            "retain" => Ok(Self::RetainText),
            other => Err(ConfigError::UnknownValue {
                key: "submit policy",
                value: other.to_string(),
            }),
        }
    }
}

/// Form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Label shown next to the input (`TODO_FORM_LABEL`)
    pub label: String,
    /// Input handling after submit (`TODO_FORM_SUBMIT_POLICY`: reset | retain)
    pub submit_policy: SubmitPolicy,
    /// Drop submissions of an empty input (`TODO_FORM_REJECT_EMPTY`)
    pub reject_empty: bool,
    /// Serialized shape of outbound actions (`TODO_FORM_ENVELOPE`: payload | todo)
    pub envelope: EnvelopeShape,
    /// Seconds to wait for in-flight dispatches on unmount (`TODO_FORM_SHUTDOWN_TIMEOUT_SECS`)
    pub shutdown_timeout_secs: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            label: "add todo".to_string(),
            submit_policy: SubmitPolicy::ResetText,
            reject_empty: false,
            envelope: EnvelopeShape::Payload,
            shutdown_timeout_secs: 5,
        }
    }
}

impl FormConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Keys are the environment variable names documented on each field.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            label: lookup("TODO_FORM_LABEL").unwrap_or(defaults.label),
            submit_policy: lookup("TODO_FORM_SUBMIT_POLICY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.submit_policy),
            reject_empty: lookup("TODO_FORM_REJECT_EMPTY")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.reject_empty),
            envelope: lookup("TODO_FORM_ENVELOPE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.envelope),
            shutdown_timeout_secs: lookup("TODO_FORM_SHUTDOWN_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.shutdown_timeout_secs),
        }
    }

    /// Set the submit policy
    #[must_use]
    pub const fn with_submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.submit_policy = policy;
        self
    }

    /// Reject empty submissions
    #[must_use]
    pub const fn with_reject_empty(mut self, reject_empty: bool) -> Self {
        self.reject_empty = reject_empty;
        self
    }

    /// Set the envelope shape
    #[must_use]
    pub const fn with_envelope(mut self, envelope: EnvelopeShape) -> Self {
        self.envelope = envelope;
        self
    }

    /// Shutdown timeout as a `Duration`
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_canonical_behavior() {
        let config = FormConfig::default();
        assert_eq!(config.label, "add todo");
        assert_eq!(config.submit_policy, SubmitPolicy::ResetText);
        assert!(!config.reject_empty);
        assert_eq!(config.envelope, EnvelopeShape::Payload);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        assert_eq!(FormConfig::from_lookup(|_| None), FormConfig::default());
    }

    #[test]
    fn lookup_overrides_every_setting() {
        let config = FormConfig::from_lookup(lookup_from(&[
            ("TODO_FORM_LABEL", "new task"),
            ("TODO_FORM_SUBMIT_POLICY", "retain"),
            ("TODO_FORM_REJECT_EMPTY", "true"),
            ("TODO_FORM_ENVELOPE", "todo"),
            ("TODO_FORM_SHUTDOWN_TIMEOUT_SECS", "1"),
        ]));

        assert_eq!(config.label, "new task");
        assert_eq!(config.submit_policy, SubmitPolicy::RetainText);
        assert!(config.reject_empty);
        assert_eq!(config.envelope, EnvelopeShape::Todo);
        assert_eq!(config.shutdown_timeout_secs, 1);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = FormConfig::from_lookup(lookup_from(&[
            ("TODO_FORM_SUBMIT_POLICY", "sometimes"),
            ("TODO_FORM_REJECT_EMPTY", "yes please"),
            ("TODO_FORM_ENVELOPE", "body"),
            ("TODO_FORM_SHUTDOWN_TIMEOUT_SECS", "-3"),
        ]));

        assert_eq!(config, FormConfig::default());
    }

    #[test]
    fn submit_policy_parse_error_names_value() {
        let err = "sometimes".parse::<SubmitPolicy>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown submit policy value: 'sometimes'");
    }

    #[test]
    fn config_serializes_policy_names() {
        let json = serde_json::to_value(FormConfig::default()).unwrap();
        assert_eq!(json["submit_policy"], "reset");
        assert_eq!(json["envelope"], "payload");
    }
}
