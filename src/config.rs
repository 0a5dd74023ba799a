use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use field_classifier::ClassifierPolicy;
use serde::{Deserialize, Serialize};
use tool_autofill::{AutofillPolicyView, HighlightPolicy, IndicatorPolicy};

pub const LOCAL_CONFIG_PATH: &str = "config/formfill.yaml";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub classifier: ClassifierPolicy,
    pub autofill: AutofillSection,
    /// Profile book file (JSON or YAML); the bundled sample book when unset.
    pub profile_book: Option<PathBuf>,
    /// Profile key to use instead of the book's current profile.
    pub profile: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillSection {
    pub enabled: bool,
    pub indicator: IndicatorPolicy,
    pub highlight: HighlightPolicy,
    /// Wait for fill indicators to clear before writing the output page.
    pub settle_indicators: bool,
}

impl Default for AutofillSection {
    fn default() -> Self {
        Self {
            enabled: true,
            indicator: IndicatorPolicy::default(),
            highlight: HighlightPolicy::default(),
            settle_indicators: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            classifier: ClassifierPolicy::default(),
            autofill: AutofillSection::default(),
            profile_book: None,
            profile: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(raw).context("parsing configuration")?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml_str(&raw).with_context(|| format!("loading {}", path.display()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            );
        }
        if self.classifier.min_confidence > 100 {
            bail!(
                "classifier.min_confidence must be within 0..=100, got {}",
                self.classifier.min_confidence
            );
        }
        if self.autofill.indicator.enabled && self.autofill.indicator.clear_after_ms == 0 {
            bail!("autofill.indicator.clear_after_ms must be positive while the indicator is enabled");
        }
        if let Some(profile) = &self.profile {
            if profile.trim().is_empty() {
                bail!("profile must not be blank");
            }
        }
        Ok(())
    }

    pub fn autofill_policy(&self) -> AutofillPolicyView {
        AutofillPolicyView {
            enabled: self.autofill.enabled,
            classifier: self.classifier.clone(),
            indicator: self.autofill.indicator.clone(),
            highlight: self.autofill.highlight.clone(),
        }
    }
}

/// Config file to use: the explicit path, else `./config/formfill.yaml` when
/// present, else `<config dir>/formfill/config.yaml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG_PATH);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|mut path| {
        path.push("formfill");
        path.push("config.yaml");
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str(
            r#"
log_level: debug
classifier:
  min_confidence: 40
autofill:
  indicator:
    clear_after_ms: 500
"#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.classifier.min_confidence, 40);
        assert_eq!(config.autofill.indicator.clear_after_ms, 500);
        assert_eq!(config.autofill.indicator.border_color, "#10b981");
        assert!(config.autofill.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = Config::default();
        config.log_level = "loud".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classifier.min_confidence = 101;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.autofill.indicator.clear_after_ms = 0;
        assert!(config.validate().is_err());
        config.autofill.indicator.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn policy_view_carries_sections() {
        let mut config = Config::default();
        config.autofill.enabled = false;
        config.classifier.min_confidence = 60;
        let policy = config.autofill_policy();
        assert!(!policy.enabled);
        assert_eq!(policy.classifier.min_confidence, 60);
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/custom.yaml");
        assert_eq!(resolve_config_path(Some(&explicit)), Some(explicit));
    }

    #[test]
    fn defaults_round_trip_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        assert_eq!(Config::from_yaml_str(&yaml).unwrap(), Config::default());
    }
}
