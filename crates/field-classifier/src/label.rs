///! Label resolution for form controls
use formfill_core_types::NodeId;
use page_dom::{DomReader, DomResult};
use serde::{Deserialize, Serialize};

const CONTAINER_TAGS: [&str; 2] = ["div", "fieldset"];
const CONTAINER_CLASS_FRAGMENTS: [&str; 2] = ["field", "form"];
const CONTAINER_TEXT_TAGS: [&str; 4] = ["label", "span", "div", "p"];
const CONTAINER_TEXT_MAX_WORDS: usize = 6;

/// Where a control's label text came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelSource {
    /// `<label for=id>`
    ForAttribute,
    /// Ancestor `<label>`
    Wrapping,
    /// Preceding sibling `<label>`
    Sibling,
    /// Short text inside the nearest field container
    Container,
    AriaLabel,
    AriaLabelledBy,
    #[default]
    None,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedLabel {
    pub text: String,
    pub source: LabelSource,
}

impl ResolvedLabel {
    fn found(text: String, source: LabelSource) -> Option<Self> {
        let text = text.trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(Self { text, source })
        }
    }
}

/// Resolve the human-visible label of `node`, trying in order: an explicit
/// `for` label, a wrapping label, a preceding sibling label, short text in
/// the nearest field container, then ARIA attributes.
pub fn resolve_label(dom: &dyn DomReader, node: NodeId) -> DomResult<ResolvedLabel> {
    let steps: [fn(&dyn DomReader, NodeId) -> DomResult<Option<ResolvedLabel>>; 5] = [
        by_for_attribute,
        by_wrapping_label,
        by_sibling_label,
        by_container_text,
        by_aria,
    ];
    for step in steps {
        if let Some(label) = step(dom, node)? {
            return Ok(label);
        }
    }
    Ok(ResolvedLabel::default())
}

fn by_for_attribute(dom: &dyn DomReader, node: NodeId) -> DomResult<Option<ResolvedLabel>> {
    let Some(id) = dom.attribute(node, "id")?.filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    match dom.label_for(&id)? {
        Some(label) => Ok(ResolvedLabel::found(
            dom.text_content(label)?,
            LabelSource::ForAttribute,
        )),
        None => Ok(None),
    }
}

fn by_wrapping_label(dom: &dyn DomReader, node: NodeId) -> DomResult<Option<ResolvedLabel>> {
    let mut cursor = dom.parent_element(node)?;
    while let Some(ancestor) = cursor {
        if dom.tag_name(ancestor)? == "label" {
            return Ok(ResolvedLabel::found(
                dom.text_content(ancestor)?,
                LabelSource::Wrapping,
            ));
        }
        cursor = dom.parent_element(ancestor)?;
    }
    Ok(None)
}

fn by_sibling_label(dom: &dyn DomReader, node: NodeId) -> DomResult<Option<ResolvedLabel>> {
    let mut cursor = dom.previous_element_sibling(node)?;
    while let Some(sibling) = cursor {
        if dom.tag_name(sibling)? == "label" {
            return Ok(ResolvedLabel::found(
                dom.text_content(sibling)?,
                LabelSource::Sibling,
            ));
        }
        cursor = dom.previous_element_sibling(sibling)?;
    }
    Ok(None)
}

fn is_field_container(dom: &dyn DomReader, node: NodeId) -> DomResult<bool> {
    if CONTAINER_TAGS.contains(&dom.tag_name(node)?.as_str()) {
        return Ok(true);
    }
    let class = dom.attribute(node, "class")?.unwrap_or_default();
    Ok(CONTAINER_CLASS_FRAGMENTS
        .iter()
        .any(|fragment| class.contains(fragment)))
}

fn is_short_caption(text: &str) -> bool {
    let len = text.chars().count();
    len > 2
        && len < 100
        && !text.contains('*')
        && text.split_whitespace().count() <= CONTAINER_TEXT_MAX_WORDS
}

fn by_container_text(dom: &dyn DomReader, node: NodeId) -> DomResult<Option<ResolvedLabel>> {
    let mut cursor = dom.parent_element(node)?;
    let container = loop {
        match cursor {
            Some(ancestor) if is_field_container(dom, ancestor)? => break ancestor,
            Some(ancestor) => cursor = dom.parent_element(ancestor)?,
            None => return Ok(None),
        }
    };

    for candidate in dom.descendant_elements(container)? {
        if !CONTAINER_TEXT_TAGS.contains(&dom.tag_name(candidate)?.as_str()) {
            continue;
        }
        let text = dom.text_content(candidate)?;
        let text = text.trim();
        if is_short_caption(text) {
            return Ok(ResolvedLabel::found(text.to_string(), LabelSource::Container));
        }
    }
    Ok(None)
}

fn by_aria(dom: &dyn DomReader, node: NodeId) -> DomResult<Option<ResolvedLabel>> {
    if let Some(aria) = dom.attribute(node, "aria-label")? {
        if let Some(label) = ResolvedLabel::found(aria, LabelSource::AriaLabel) {
            return Ok(Some(label));
        }
    }
    let Some(target) = dom.attribute(node, "aria-labelledby")? else {
        return Ok(None);
    };
    match dom.element_by_id(target.trim())? {
        Some(referenced) => Ok(ResolvedLabel::found(
            dom.text_content(referenced)?,
            LabelSource::AriaLabelledBy,
        )),
        None => Ok(None),
    }
}
