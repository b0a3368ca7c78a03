//! Scheduler configuration loading.
//!
//! The expected YAML structure is (every key optional):
//! ```yaml
//! rules:
//!   max_driving_hours: 11.0
//!   break_after_hours: 3.0
//!   break_duration_hours: 0.5
//!   rest_duration_hours: 10.0
//! limits:
//!   max_legs: 10000
//! ```
//!
//! Missing keys fall back to [`HosRules::default()`] and
//! [`DEFAULT_MAX_LEGS`].

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::hos::{HosRules, DEFAULT_MAX_LEGS};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    rules: Option<HosRules>,
    #[serde(default)]
    limits: Option<LimitsEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsEntry {
    #[serde(default = "default_max_legs")]
    max_legs: u64,
}

fn default_max_legs() -> u64 {
    DEFAULT_MAX_LEGS
}

// ── Public data structures ────────────────────────────────────────────────────

/// Resource limits applied to every scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest leg count a single schedule may have.
    pub max_legs: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_legs: DEFAULT_MAX_LEGS,
        }
    }
}

/// Full scheduler configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchedulerConfig {
    pub rules: HosRules,
    pub limits: Limits,
}

impl SchedulerConfig {
    /// Parses and validates the YAML file at `path`.
    ///
    /// An empty file yields the default configuration.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, or the values are inconsistent (see [`validate`](Self::validate)).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading scheduler configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))?;

        info!(
            max_driving_hours = config.rules.max_driving_hours,
            break_after_hours = config.rules.break_after_hours,
            break_duration_hours = config.rules.break_duration_hours,
            rest_duration_hours = config.rules.rest_duration_hours,
            max_legs = config.limits.max_legs,
            "Scheduler configuration loaded"
        );

        Ok(config)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct; treat it as "all defaults"
        let file: ConfigFile = if content.trim().is_empty() {
            warn!("Configuration document is empty, using default settings");
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse YAML")?
        };

        if file.rules.is_none() {
            debug!("No 'rules' section, using default HOS rules");
        }

        let config = Self {
            rules: file.rules.unwrap_or_default(),
            limits: file
                .limits
                .map(|l| Limits {
                    max_legs: l.max_legs,
                })
                .unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject rule sets the scheduler cannot work with.
    ///
    /// # Errors
    /// * A negative, NaN or infinite rule value.
    /// * `max_driving_hours == 0`.
    /// * `break_after_hours > max_driving_hours`.
    /// * `max_legs == 0`.
    pub fn validate(&self) -> Result<()> {
        if let Some(problem) = self.rules.inconsistency() {
            anyhow::bail!("inconsistent HOS rules: {problem}");
        }
        ensure!(self.limits.max_legs > 0, "limits.max_legs must be at least 1");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
rules:
  max_driving_hours: 10.0
  break_after_hours: 4.0
  break_duration_hours: 1.0
  rest_duration_hours: 8.0
limits:
  max_legs: 500
"#;
        let f = yaml_tempfile(yaml);
        let cfg = SchedulerConfig::load_from_file(f.path()).unwrap();

        assert_eq!(cfg.rules.max_driving_hours, 10.0);
        assert_eq!(cfg.rules.break_after_hours, 4.0);
        assert_eq!(cfg.rules.break_duration_hours, 1.0);
        assert_eq!(cfg.rules.rest_duration_hours, 8.0);
        assert_eq!(cfg.limits.max_legs, 500);
    }

    #[test]
    fn partial_rules_fall_back_to_defaults() {
        let yaml = "rules:\n  rest_duration_hours: 8\n";
        let cfg = SchedulerConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(cfg.rules.rest_duration_hours, 8.0);
        assert_eq!(cfg.rules.max_driving_hours, 11.0);
        assert_eq!(cfg.rules.break_after_hours, 3.0);
        assert_eq!(cfg.limits.max_legs, DEFAULT_MAX_LEGS);
    }

    #[test]
    fn empty_document_is_default_config() {
        let f = yaml_tempfile("");
        let cfg = SchedulerConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg, SchedulerConfig::default());
    }

    #[test]
    fn limits_without_max_legs_uses_default() {
        let cfg = SchedulerConfig::from_yaml_str("limits: {}\n").unwrap();
        assert_eq!(cfg.limits.max_legs, DEFAULT_MAX_LEGS);
    }

    #[test]
    fn missing_file_returns_error() {
        let result = SchedulerConfig::load_from_file(Path::new("/nonexistent/path/hos.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(SchedulerConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = SchedulerConfig::from_yaml_str("rulez:\n  max_driving_hours: 11\n").unwrap_err();
        assert!(format!("{err:#}").contains("rulez"), "{err:#}");
    }

    #[test]
    fn shipped_sample_matches_defaults() {
        let cfg = SchedulerConfig::from_yaml_str(include_str!("../../config/hos_rules.yaml")).unwrap();
        assert_eq!(cfg, SchedulerConfig::default());
    }

    #[test]
    fn misspelled_rule_is_rejected() {
        assert!(SchedulerConfig::from_yaml_str("rules:\n  max_drive_hours: 10\n").is_err());
    }

    #[test]
    fn zero_max_legs_is_rejected() {
        let err = SchedulerConfig::from_yaml_str("limits:\n  max_legs: 0\n").unwrap_err();
        assert!(err.to_string().contains("max_legs"), "{err}");
    }

    #[test]
    fn break_after_drive_limit_is_rejected() {
        let yaml = "rules:\n  max_driving_hours: 2\n  break_after_hours: 3\n";
        let err = SchedulerConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("break_after_hours"), "{err}");
    }
}
