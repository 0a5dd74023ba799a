///! Static rule catalog, one rule per field type
use formfill_core_types::FieldType;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::weights;

/// A label phrase with its precompiled word-boundary matcher.
#[derive(Debug)]
pub struct LabelPhrase {
    pub text: &'static str,
    boundary: Regex,
}

impl LabelPhrase {
    fn compile(text: &'static str) -> Self {
        let body = text
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        let boundary =
            Regex::new(&format!(r"\b{body}\b")).expect("label phrase compiles to a valid regex");
        Self { text, boundary }
    }

    pub fn occurs_as_words_in(&self, label: &str) -> bool {
        self.boundary.is_match(label)
    }
}

/// Compiled detection rule for one field type.
#[derive(Debug)]
pub struct FieldTypeRule {
    pub field_type: FieldType,
    pub patterns: Vec<Regex>,
    pub keywords: &'static [&'static str],
    pub labels: Vec<LabelPhrase>,
    pub autocomplete: &'static [&'static str],
    pub input_types: &'static [&'static str],
    pub priority: u32,
}

struct RuleSpec {
    field_type: FieldType,
    patterns: &'static [&'static str],
    keywords: &'static [&'static str],
    labels: &'static [&'static str],
    autocomplete: &'static [&'static str],
    input_types: &'static [&'static str],
    priority: u32,
}

impl FieldTypeRule {
    fn compile(spec: &RuleSpec) -> Self {
        Self {
            field_type: spec.field_type,
            patterns: spec
                .patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){p}")).expect("catalog pattern is valid"))
                .collect(),
            keywords: spec.keywords,
            labels: spec.labels.iter().copied().map(LabelPhrase::compile).collect(),
            autocomplete: spec.autocomplete,
            input_types: spec.input_types,
            priority: spec.priority,
        }
    }
}

const RULE_SPECS: [RuleSpec; 18] = [
    RuleSpec {
        field_type: FieldType::FirstName,
        patterns: &["^first_?name$", "^fname$", "^given_?name$"],
        keywords: &["first", "given"],
        labels: &["first name", "given name", "first", "fname"],
        autocomplete: &["given-name"],
        input_types: &[],
        priority: 10,
    },
    RuleSpec {
        field_type: FieldType::LastName,
        patterns: &["^last_?name$", "^lname$", "^surname$", "^family_?name$"],
        keywords: &["last", "surname", "family"],
        labels: &["last name", "surname", "family name", "last", "lname"],
        autocomplete: &["family-name"],
        input_types: &[],
        priority: 10,
    },
    RuleSpec {
        field_type: FieldType::FullName,
        patterns: &["^full_?name$", "^name$", "^applicant_?name$"],
        keywords: &["full"],
        labels: &["full name", "name", "your name", "applicant name"],
        autocomplete: &["name"],
        input_types: &[],
        priority: 8,
    },
    RuleSpec {
        field_type: FieldType::Email,
        patterns: &["^email$", "^e_?mail$", "^contact_?email$", "^email_?address$"],
        keywords: &["email", "mail"],
        labels: &[
            "email",
            "e-mail",
            "email address",
            "contact email",
            "your email",
            "work email",
        ],
        autocomplete: &["email"],
        input_types: &["email"],
        priority: 15,
    },
    RuleSpec {
        field_type: FieldType::Phone,
        patterns: &[
            "^phone$",
            "^tel$",
            "^mobile$",
            "^cell$",
            "^mobile_?number$",
            "^phone_?number$",
        ],
        keywords: &["phone", "tel", "mobile", "cell", "number"],
        labels: &[
            "phone",
            "telephone",
            "mobile",
            "cell phone",
            "mobile number",
            "best phone number",
            "phone number",
            "contact number",
        ],
        autocomplete: &["tel"],
        input_types: &["tel"],
        priority: 12,
    },
    RuleSpec {
        field_type: FieldType::Address,
        patterns: &["^address$", "^street$", "^street_?address$"],
        keywords: &["address", "street"],
        labels: &["address", "street address", "home address"],
        autocomplete: &["street-address", "address-line1"],
        input_types: &[],
        priority: 8,
    },
    RuleSpec {
        field_type: FieldType::City,
        patterns: &["^city$", "^town$", "^locality$"],
        keywords: &["city", "town"],
        labels: &["city", "town"],
        autocomplete: &["locality"],
        input_types: &[],
        priority: 8,
    },
    RuleSpec {
        field_type: FieldType::State,
        patterns: &["^state$", "^province$", "^region$"],
        keywords: &["state", "province"],
        labels: &["state", "province", "select state"],
        autocomplete: &["region"],
        input_types: &[],
        priority: 8,
    },
    RuleSpec {
        field_type: FieldType::ZipCode,
        patterns: &["^zip_?code$", "^postal_?code$", "^zip$", "^postal$"],
        keywords: &["zip", "postal"],
        labels: &["zip code", "postal code", "zip"],
        autocomplete: &["postal-code"],
        input_types: &[],
        priority: 8,
    },
    RuleSpec {
        field_type: FieldType::Country,
        patterns: &["^country$", "^nation$"],
        keywords: &["country"],
        labels: &["country"],
        autocomplete: &["country"],
        input_types: &[],
        priority: 8,
    },
    RuleSpec {
        field_type: FieldType::LinkedIn,
        patterns: &["^linked_?in$", "^linkedin_?(profile|url)?$"],
        keywords: &["linkedin"],
        labels: &[
            "linkedin",
            "linkedin profile",
            "linkedin url",
            "linkedin profile url",
        ],
        autocomplete: &[],
        input_types: &[],
        priority: 7,
    },
    RuleSpec {
        field_type: FieldType::Website,
        patterns: &["^website$", "^portfolio$", "^personal_?site$", "^homepage$"],
        keywords: &["website", "portfolio", "homepage"],
        labels: &[
            "website",
            "portfolio",
            "personal website",
            "portfolio website",
        ],
        autocomplete: &["url"],
        input_types: &["url"],
        priority: 7,
    },
    RuleSpec {
        field_type: FieldType::Github,
        patterns: &["^github$", "^git_?hub$", "^github_?(profile|url)?$"],
        keywords: &["github"],
        labels: &["github", "github profile"],
        autocomplete: &[],
        input_types: &[],
        priority: 7,
    },
    RuleSpec {
        field_type: FieldType::CurrentTitle,
        patterns: &[
            "^current_?title$",
            "^job_?title$",
            "^position$",
            "^role$",
            "^title$",
        ],
        keywords: &["title", "position", "role", "job"],
        labels: &[
            "job title",
            "current title",
            "position",
            "role",
            "desired position",
        ],
        autocomplete: &["organization-title"],
        input_types: &[],
        priority: 6,
    },
    RuleSpec {
        field_type: FieldType::Company,
        patterns: &[
            "^company$",
            "^employer$",
            "^current_?company$",
            "^organization$",
        ],
        keywords: &["company", "employer"],
        labels: &["company", "current company", "employer"],
        autocomplete: &["organization"],
        input_types: &[],
        priority: 6,
    },
    RuleSpec {
        field_type: FieldType::Experience,
        patterns: &["^experience$", "^years_?experience$", "^work_?experience$"],
        keywords: &["experience", "years"],
        labels: &["experience", "years of experience", "work experience"],
        autocomplete: &[],
        input_types: &[],
        priority: 5,
    },
    RuleSpec {
        field_type: FieldType::Salary,
        patterns: &[
            "^salary$",
            "^compensation$",
            "^expected_?salary$",
            "^desired_?salary$",
        ],
        keywords: &["salary", "compensation", "pay"],
        labels: &["salary", "expected salary", "desired salary"],
        autocomplete: &[],
        input_types: &[],
        priority: 5,
    },
    RuleSpec {
        field_type: FieldType::WorkAuthorization,
        patterns: &[
            "^work_?authorization$",
            "^visa$",
            "^work_?permit$",
            "^authorization$",
        ],
        keywords: &["authorization", "visa", "permit"],
        labels: &["work authorization", "visa status", "work permit"],
        autocomplete: &[],
        input_types: &[],
        priority: 6,
    },
];

static CATALOG: Lazy<Vec<FieldTypeRule>> =
    Lazy::new(|| RULE_SPECS.iter().map(FieldTypeRule::compile).collect());

/// All rules, in catalog order. Ties between equal scores resolve to the
/// earlier rule.
pub fn catalog() -> &'static [FieldTypeRule] {
    &CATALOG
}

pub fn rule_for(field_type: FieldType) -> Option<&'static FieldTypeRule> {
    catalog().iter().find(|rule| rule.field_type == field_type)
}

/// Normalization constant for confidences: the highest priority in the
/// catalog times the strongest channel weight.
pub fn max_possible_score() -> f64 {
    let top = catalog().iter().map(|rule| rule.priority).max().unwrap_or(0);
    f64::from(top) * weights::AUTOCOMPLETE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_rule_per_field_type() {
        assert_eq!(catalog().len(), FieldType::ALL.len());
        for (rule, expected) in catalog().iter().zip(FieldType::ALL.iter()) {
            assert_eq!(rule.field_type, *expected);
        }
    }

    #[test]
    fn test_max_possible_score() {
        assert_eq!(max_possible_score(), 30.0);
    }

    #[test]
    fn test_patterns_are_anchored_and_case_insensitive() {
        let email = rule_for(FieldType::Email).unwrap();
        assert!(email.patterns.iter().any(|p| p.is_match("Email_Address")));
        assert!(!email.patterns.iter().any(|p| p.is_match("backup_email")));

        let linkedin = rule_for(FieldType::LinkedIn).unwrap();
        assert!(linkedin.patterns.iter().any(|p| p.is_match("linkedin_url")));
        assert!(linkedin.patterns.iter().any(|p| p.is_match("linked_in")));
    }

    #[test]
    fn test_label_phrase_word_boundaries() {
        let city = rule_for(FieldType::City).unwrap();
        let phrase = &city.labels[0];
        assert!(phrase.occurs_as_words_in("your city of residence"));
        assert!(!phrase.occurs_as_words_in("ethnicity"));
    }
}
