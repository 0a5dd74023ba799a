use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tool_autofill::{ProfileBook, UserProfile};

/// Profile book bundled with the binary.
pub const SAMPLE_PROFILE_BOOK: &str = include_str!("../config/profiles.sample.json");

pub fn sample_book() -> Result<ProfileBook> {
    serde_json::from_str(SAMPLE_PROFILE_BOOK).context("parsing bundled profile book")
}

/// Load a profile book; `.yaml`/`.yml` files are read as YAML, anything else
/// as JSON. Without a path the bundled sample book is returned.
pub fn load_book(path: Option<&Path>) -> Result<ProfileBook> {
    let Some(path) = path else {
        return sample_book();
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading profile book {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let book = if is_yaml {
        serde_yaml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
    } else {
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
    };
    Ok(book)
}

/// Make `key` current when given, then return the book's active profile.
pub fn pick_profile(book: &mut ProfileBook, key: Option<&str>) -> Result<(String, UserProfile)> {
    if let Some(key) = key {
        if !book.select(key) {
            let known: Vec<&str> = book.keys().collect();
            bail!("unknown profile {key:?}; available: {}", known.join(", "));
        }
    }
    book.active()
        .map(|(key, named)| (key.to_string(), named.profile.clone()))
        .ok_or_else(|| anyhow!("profile book has no profiles"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_core_types::FieldType;

    #[test]
    fn sample_book_parses() {
        let mut book = sample_book().unwrap();
        assert_eq!(book.current_profile, "software-engineer");
        assert_eq!(book.profiles.len(), 2);

        let (key, profile) = pick_profile(&mut book, None).unwrap();
        assert_eq!(key, "software-engineer");
        assert_eq!(
            profile.value_for(FieldType::CurrentTitle),
            "Senior Software Engineer"
        );
        assert_eq!(profile.documents.resume_url, "/resume-swe.pdf");
    }

    #[test]
    fn named_profile_becomes_current() {
        let mut book = sample_book().unwrap();
        let (key, profile) = pick_profile(&mut book, Some("product-manager")).unwrap();
        assert_eq!(key, "product-manager");
        assert_eq!(book.current_profile, "product-manager");
        assert_eq!(book.active().unwrap().1.profile, profile);
    }

    #[test]
    fn unknown_profile_lists_available_keys() {
        let mut book = sample_book().unwrap();
        let err = pick_profile(&mut book, Some("designer")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("product-manager"));
        assert!(message.contains("software-engineer"));
    }

    #[test]
    fn empty_book_has_no_active_profile() {
        assert!(pick_profile(&mut ProfileBook::default(), None).is_err());
    }
}
