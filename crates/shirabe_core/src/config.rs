//! Linter configuration.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use shirabe_diagnostic::Severity;

use crate::LinterError;

/// Configuration for the linter.
///
/// Immutable once handed to [`Linter::new`](crate::Linter::new), which
/// validates every named rule against the built-in registry. Rules not
/// mentioned here run with their defaults; registration order is the
/// registry order, not the map order, so results are deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Per-rule configuration (enable/disable/severity/options).
    #[serde(default)]
    pub rules: HashMap<String, RuleOption>,

    /// Run rules across the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

impl LinterConfig {
    /// Creates a configuration with every built-in rule at its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| LinterError::config(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Returns the option for a rule, if configured.
    pub fn rule_option(&self, rule_id: &str) -> Option<&RuleOption> {
        self.rules.get(rule_id)
    }

    /// Returns whether a rule is enabled. Unconfigured rules are enabled.
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id).is_none_or(RuleOption::is_enabled)
    }

    /// Sets the option for one rule.
    pub fn with_rule(mut self, rule_id: impl Into<String>, option: RuleOption) -> Self {
        self.rules.insert(rule_id.into(), option);
        self
    }
}

/// Configuration for a single rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleOption {
    /// Rule is enabled/disabled (boolean).
    Enabled(bool),
    /// Rule is enabled with a severity string ("error", "warning",
    /// "info", "off").
    Severity(String),
    /// Rule is enabled with specific options object.
    Options(serde_json::Value),
}

impl RuleOption {
    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleOption::Enabled(enabled) => *enabled,
            RuleOption::Severity(s) => s != "off",
            RuleOption::Options(_) => true,
        }
    }

    /// Gets the rule options as a JSON value.
    pub fn options(&self) -> serde_json::Value {
        match self {
            RuleOption::Enabled(_) | RuleOption::Severity(_) => serde_json::Value::Null,
            RuleOption::Options(v) => v.clone(),
        }
    }

    /// Parses a severity override, if this option carries one.
    ///
    /// `"off"` is handled by [`is_enabled`](Self::is_enabled); any other
    /// unrecognized string is a configuration error.
    pub fn severity_override(&self) -> Result<Option<Severity>, LinterError> {
        let RuleOption::Severity(s) = self else {
            return Ok(None);
        };
        match s.as_str() {
            "error" => Ok(Some(Severity::Error)),
            "warning" | "warn" => Ok(Some(Severity::Warning)),
            "info" => Ok(Some(Severity::Info)),
            "off" => Ok(None),
            other => Err(LinterError::config(format!(
                "unknown severity \"{other}\" (expected error, warning, info, or off)"
            ))),
        }
    }
}
