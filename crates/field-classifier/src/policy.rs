use serde::{Deserialize, Serialize};

/// Confidence a detection needs before it is reported.
pub const DEFAULT_MIN_CONFIDENCE: u8 = 25;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierPolicy {
    pub min_confidence: u8,
}

impl ClassifierPolicy {
    pub fn threshold(&self) -> u8 {
        self.min_confidence.min(100)
    }
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}
