use serde::{Deserialize, Serialize};
use std::time::Duration;

use field_classifier::ClassifierPolicy;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillPolicyView {
    pub enabled: bool,
    pub classifier: ClassifierPolicy,
    pub indicator: IndicatorPolicy,
    pub highlight: HighlightPolicy,
}

impl Default for AutofillPolicyView {
    fn default() -> Self {
        Self {
            enabled: true,
            classifier: ClassifierPolicy::default(),
            indicator: IndicatorPolicy::default(),
            highlight: HighlightPolicy::default(),
        }
    }
}

/// Transient styling applied to a control after a verified fill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPolicy {
    pub enabled: bool,
    pub clear_after_ms: u64,
    pub border_color: String,
    pub box_shadow: String,
    pub background_color: String,
    pub transition: String,
}

impl IndicatorPolicy {
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }
}

impl Default for IndicatorPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            clear_after_ms: 3000,
            border_color: "#10b981".to_string(),
            box_shadow: "0 0 0 1px #10b981".to_string(),
            background_color: "#f0fdf4".to_string(),
            transition: "all 0.3s ease".to_string(),
        }
    }
}

/// Outline drawn by `highlight_detected`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightPolicy {
    pub box_shadow: String,
    pub transition: String,
}

impl Default for HighlightPolicy {
    fn default() -> Self {
        Self {
            box_shadow: "0 0 0 2px rgba(59, 130, 246, 0.3)".to_string(),
            transition: "box-shadow 0.3s ease".to_string(),
        }
    }
}
