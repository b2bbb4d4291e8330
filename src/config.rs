//! Serializable construction options for [`EventTimer`](crate::EventTimer).

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Label used when a timer is not given one.
pub const DEFAULT_LABEL: &str = "noname";

/// Options accepted by [`EventTimer::from_config`](crate::EventTimer::from_config).
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Display name used in diagnostics and summaries.
    pub label: String,
    /// A disabled timer turns every timing call into a no-op.
    pub enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            enabled: true,
        }
    }
}

impl TimerConfig {
    pub fn new<T: Into<String>>(label: T) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Parse a config from JSON text.
    ///
    /// ```rust
    /// use event_timer::TimerConfig;
    /// let config = TimerConfig::from_json(r#"{ "label": "io", "enabled": false }"#).unwrap();
    /// assert_eq!(config.label, "io");
    /// assert!(!config.enabled);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, TimerError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        empty_object = { "{}", "noname", true },
        label_only = { r#"{ "label": "parse" }"#, "parse", true },
        disabled_only = { r#"{ "enabled": false }"#, "noname", false },
        both = { r#"{ "label": "gc", "enabled": false }"#, "gc", false },
    )]
    fn test_config_from_json(text: &str, label: &str, enabled: bool) {
        let config = TimerConfig::from_json(text).unwrap();
        assert_eq!(config.label, label);
        assert_eq!(config.enabled, enabled);
    }

    #[parameterized(
        truncated = { "{" },
        wrong_type = { r#"{ "enabled": "yes" }"# },
        not_an_object = { "[1, 2]" },
    )]
    fn test_config_from_json_rejects(text: &str) {
        let result = TimerConfig::from_json(text);
        assert!(matches!(result, Err(TimerError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_builders() {
        let config = TimerConfig::new("frame").disabled();
        assert_eq!(config.label, "frame");
        assert!(!config.enabled);
        assert_eq!(TimerConfig::default().label, DEFAULT_LABEL);
    }
}
