///! Field classifier: exclusion, scoring and winner selection
use formfill_core_types::{DetectionMethod, FieldType, NodeId};
use page_dom::DomReader;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::catalog::{catalog, max_possible_score};
use crate::context::ElementContext;
use crate::errors::Result;
use crate::policy::ClassifierPolicy;
use crate::question::{exclusion_reason, ExclusionReason};
use crate::scoring::{normalize, score_rule, ScoringInput};

/// Winning field type for one control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub field_type: FieldType,
    pub confidence: u8,
    pub method: DetectionMethod,
}

/// One scoring rule in the ranked set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub field_type: FieldType,
    pub score: f64,
    pub confidence: u8,
    pub method: DetectionMethod,
}

/// Full outcome of classifying one control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub context: ElementContext,
    pub exclusion: Option<ExclusionReason>,
    pub candidates: Vec<Candidate>,
    pub detection: Option<Detection>,
}

/// Rule-based field classifier
pub struct FieldClassifier {
    policy: ClassifierPolicy,
    max_possible: f64,
}

impl FieldClassifier {
    pub fn new() -> Self {
        Self::with_policy(ClassifierPolicy::default())
    }

    pub fn with_policy(policy: ClassifierPolicy) -> Self {
        Self {
            policy,
            max_possible: max_possible_score(),
        }
    }

    pub fn policy(&self) -> &ClassifierPolicy {
        &self.policy
    }

    /// Best field type for `node`, or `None` when the control is excluded or
    /// nothing clears the confidence threshold.
    pub fn detect(&self, dom: &dyn DomReader, node: NodeId) -> Result<Option<Detection>> {
        Ok(self.assess(dom, node)?.detection)
    }

    /// Every scoring rule for `node`, strongest first.
    pub fn rank(&self, dom: &dyn DomReader, node: NodeId) -> Result<Vec<Candidate>> {
        Ok(self.assess(dom, node)?.candidates)
    }

    #[instrument(skip_all, fields(node = %node))]
    pub fn assess(&self, dom: &dyn DomReader, node: NodeId) -> Result<Assessment> {
        let context = ElementContext::capture(dom, node)?;
        Ok(self.assess_context(context))
    }

    pub fn assess_context(&self, context: ElementContext) -> Assessment {
        if let Some(reason) = exclusion_reason(&context) {
            debug!(
                id = %context.id,
                name = %context.name,
                reason = %reason,
                "skipping question field"
            );
            return Assessment {
                context,
                exclusion: Some(reason),
                candidates: Vec::new(),
                detection: None,
            };
        }

        let candidates = self.rank_context(&context);
        let threshold = self.policy.threshold();
        let detection = candidates
            .first()
            .filter(|best| best.confidence >= threshold)
            .map(|best| Detection {
                field_type: best.field_type,
                confidence: best.confidence,
                method: best.method,
            });

        Assessment {
            context,
            exclusion: None,
            candidates,
            detection,
        }
    }

    fn rank_context(&self, context: &ElementContext) -> Vec<Candidate> {
        let input = ScoringInput::new(context);
        let mut candidates: Vec<Candidate> = catalog()
            .iter()
            .filter_map(|rule| {
                score_rule(rule, &input).map(|scored| Candidate {
                    field_type: rule.field_type,
                    score: scored.score,
                    confidence: normalize(scored.score, self.max_possible),
                    method: scored.method,
                })
            })
            .collect();
        // stable sort keeps catalog order on ties
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new()
    }
}
