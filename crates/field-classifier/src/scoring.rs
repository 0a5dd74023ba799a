///! Per-rule weighted scoring across the six signal channels
use formfill_core_types::DetectionMethod;

use crate::catalog::FieldTypeRule;
use crate::context::ElementContext;

/// Channel multipliers applied to a rule's priority.
pub mod weights {
    pub const AUTOCOMPLETE: f64 = 2.0;
    pub const INPUT_TYPE: f64 = 1.8;
    pub const PATTERN: f64 = 1.5;
    pub const LABEL_EXACT: f64 = 1.5;
    pub const LABEL_WORD: f64 = 1.3;
    pub const LABEL_SUBSTRING: f64 = 1.2;
    pub const KEYWORD: f64 = 0.8;
    pub const PLACEHOLDER: f64 = 0.6;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelMatch {
    Exact,
    WordBoundary,
    Substring,
}

impl LabelMatch {
    fn weight(self) -> f64 {
        match self {
            LabelMatch::Exact => weights::LABEL_EXACT,
            LabelMatch::WordBoundary => weights::LABEL_WORD,
            LabelMatch::Substring => weights::LABEL_SUBSTRING,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleScore {
    pub score: f64,
    /// First channel that contributed.
    pub method: DetectionMethod,
}

/// Lowercased views of the context, computed once per control.
pub struct ScoringInput<'a> {
    ctx: &'a ElementContext,
    label: String,
    blob: String,
    placeholder: String,
}

impl<'a> ScoringInput<'a> {
    pub fn new(ctx: &'a ElementContext) -> Self {
        Self {
            ctx,
            label: ctx.label_lower(),
            blob: ctx.attribute_blob(),
            placeholder: ctx.placeholder.to_lowercase(),
        }
    }
}

/// First phrase of the rule that matches the label; for that phrase the
/// strongest applicable kind is reported.
pub fn label_match(rule: &FieldTypeRule, label: &str) -> Option<LabelMatch> {
    if label.is_empty() {
        return None;
    }
    rule.labels.iter().find_map(|phrase| {
        if label == phrase.text {
            Some(LabelMatch::Exact)
        } else if phrase.occurs_as_words_in(label) {
            Some(LabelMatch::WordBoundary)
        } else if label.contains(phrase.text) {
            Some(LabelMatch::Substring)
        } else {
            None
        }
    })
}

/// Score one rule; `None` when no channel contributed.
pub fn score_rule(rule: &FieldTypeRule, input: &ScoringInput<'_>) -> Option<RuleScore> {
    let ctx = input.ctx;
    let priority = f64::from(rule.priority);
    let mut score = 0.0;
    let mut method = None;
    let mut hit = |weight: f64, channel: DetectionMethod| {
        score += priority * weight;
        method.get_or_insert(channel);
    };

    if !ctx.autocomplete.is_empty() && rule.autocomplete.contains(&ctx.autocomplete.as_str()) {
        hit(weights::AUTOCOMPLETE, DetectionMethod::Autocomplete);
    }
    if !ctx.input_type.is_empty() && rule.input_types.contains(&ctx.input_type.as_str()) {
        hit(weights::INPUT_TYPE, DetectionMethod::Type);
    }
    if rule
        .patterns
        .iter()
        .any(|p| p.is_match(&ctx.id) || p.is_match(&ctx.name))
    {
        hit(weights::PATTERN, DetectionMethod::Pattern);
    }
    if let Some(kind) = label_match(rule, &input.label) {
        hit(kind.weight(), DetectionMethod::Label);
    }
    if rule.keywords.iter().any(|kw| input.blob.contains(kw)) {
        hit(weights::KEYWORD, DetectionMethod::Keyword);
    }
    if !input.placeholder.is_empty()
        && rule
            .labels
            .iter()
            .any(|phrase| input.placeholder.contains(phrase.text))
    {
        hit(weights::PLACEHOLDER, DetectionMethod::Placeholder);
    }

    method.map(|method| RuleScore { score, method })
}

/// Map a raw score onto 0..=100 against `max_possible`.
pub fn normalize(score: f64, max_possible: f64) -> u8 {
    if max_possible <= 0.0 {
        return 0;
    }
    (score / max_possible * 100.0).min(100.0).round() as u8
}
