///! Detection of open-ended question and essay controls
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::ElementContext;

/// Textarea labels at or under this many characters are never treated as
/// prompts ("What", "Why").
const TEXTAREA_PROMPT_MIN_LEN: usize = 10;

/// Why a control was kept out of field detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExclusionReason {
    /// Label, id or name contains a question mark.
    QuestionMark,
    /// Label uses interview phrasing.
    InterviewPrompt,
    /// Label, id or name names a long-form topic.
    EssayTopic,
    /// Textarea whose label asks for an explanation.
    TextareaPrompt,
}

impl ExclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusionReason::QuestionMark => "question mark",
            ExclusionReason::InterviewPrompt => "interview prompt",
            ExclusionReason::EssayTopic => "essay topic",
            ExclusionReason::TextareaPrompt => "textarea prompt",
        }
    }
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("exclusion pattern is valid"))
        .collect()
}

static INTERVIEW_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"why\s+are\s+you\s+interested",
        r"why\s+do\s+you\s+want",
        r"what\s+motivates\s+you",
        r"describe\s+yourself",
        r"tell\s+us\s+about\s+yourself",
        r"what\s+makes\s+you\s+(unique|special)",
        r"how\s+would\s+you\s+handle",
        r"explain\s+why",
        r"why\s+should\s+we\s+hire",
        r"what\s+are\s+your\s+(strengths|weaknesses|goals)",
    ])
});

static ESSAY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"cover\s+letter",
        r"personal\s+statement",
        r"motivation\s+letter",
        r"essay",
        r"additional\s+information",
        r"comments",
        r"notes",
        r"message",
    ])
});

static TEXTAREA_PROMPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(why|describe|tell\s+us|explain|what\s+makes)")
        .expect("textarea prompt pattern is valid")
});

/// Returns the reason `ctx` should be skipped, if any. Runs before scoring.
pub fn exclusion_reason(ctx: &ElementContext) -> Option<ExclusionReason> {
    let label = ctx.label_lower();
    let id_name = format!("{} {}", ctx.id, ctx.name).to_lowercase();

    if label.contains('?') || id_name.contains('?') {
        return Some(ExclusionReason::QuestionMark);
    }
    if INTERVIEW_PATTERNS.iter().any(|p| p.is_match(&label)) {
        return Some(ExclusionReason::InterviewPrompt);
    }

    let all_text = format!("{label} {id_name}");
    if ESSAY_PATTERNS.iter().any(|p| p.is_match(&all_text)) {
        return Some(ExclusionReason::EssayTopic);
    }

    if ctx.is_textarea()
        && label.chars().count() > TEXTAREA_PROMPT_MIN_LEN
        && TEXTAREA_PROMPT.is_match(&label)
    {
        return Some(ExclusionReason::TextareaPrompt);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(tag: &str, label: &str, id: &str) -> ElementContext {
        ElementContext {
            tag_name: tag.to_string(),
            label_text: label.to_string(),
            id: id.to_string(),
            ..ElementContext::default()
        }
    }

    #[test]
    fn test_question_mark_in_label_or_id() {
        assert_eq!(
            exclusion_reason(&ctx("input", "Are you over 18?", "")),
            Some(ExclusionReason::QuestionMark)
        );
        assert_eq!(
            exclusion_reason(&ctx("input", "", "relocate?")),
            Some(ExclusionReason::QuestionMark)
        );
    }

    #[test]
    fn test_interview_prompts() {
        assert_eq!(
            exclusion_reason(&ctx("input", "Why do you want to join", "")),
            Some(ExclusionReason::InterviewPrompt)
        );
        assert_eq!(
            exclusion_reason(&ctx("input", "What are your   strengths", "")),
            Some(ExclusionReason::InterviewPrompt)
        );
    }

    #[test]
    fn test_essay_topics_check_id_and_name() {
        assert_eq!(
            exclusion_reason(&ctx("input", "Upload", "cover letter")),
            Some(ExclusionReason::EssayTopic)
        );
        assert_eq!(
            exclusion_reason(&ctx("textarea", "Comments", "")),
            Some(ExclusionReason::EssayTopic)
        );
    }

    #[test]
    fn test_textarea_prompt_requires_textarea_and_length() {
        assert_eq!(
            exclusion_reason(&ctx("textarea", "Tell us about your background", "")),
            Some(ExclusionReason::TextareaPrompt)
        );
        assert_eq!(
            exclusion_reason(&ctx("input", "Tell us about your background", "")),
            None
        );
        assert_eq!(exclusion_reason(&ctx("textarea", "Why", "")), None);
    }

    #[test]
    fn test_plain_fields_pass() {
        assert_eq!(exclusion_reason(&ctx("input", "Email address", "email")), None);
        assert_eq!(exclusion_reason(&ctx("select", "", "")), None);
        assert_eq!(
            exclusion_reason(&ctx("input", "Years of experience", "")),
            None
        );
    }
}
