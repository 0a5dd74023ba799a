use formfill_core_types::NodeId;
use page_dom::{DomReader, DomResult};

/// Lookup key for a control: `#id`, else `[name="..."]`, else the tag with
/// up to two classes, else the bare tag. Not guaranteed unique.
pub fn selector_for(dom: &dyn DomReader, node: NodeId) -> DomResult<String> {
    if let Some(id) = dom.attribute(node, "id")?.filter(|id| !id.is_empty()) {
        return Ok(format!("#{id}"));
    }
    if let Some(name) = dom.attribute(node, "name")?.filter(|name| !name.is_empty()) {
        return Ok(format!("[name=\"{name}\"]"));
    }
    let tag = dom.tag_name(node)?;
    let classes = dom.class_list(node)?;
    if classes.is_empty() {
        return Ok(tag);
    }
    let head: Vec<&str> = classes.iter().take(2).map(String::as_str).collect();
    Ok(format!("{tag}.{}", head.join(".")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_dom::HtmlDocument;

    #[test]
    fn selector_precedence() {
        let doc = HtmlDocument::parse(
            r#"<input id="email" name="e">
               <input name="phone">
               <select class="a b c"></select>
               <textarea></textarea>"#,
        );
        let selectors: Vec<String> = doc
            .form_controls()
            .unwrap()
            .into_iter()
            .map(|node| selector_for(&doc, node).unwrap())
            .collect();
        assert_eq!(
            selectors,
            vec!["#email", "[name=\"phone\"]", "select.a.b", "textarea"]
        );
    }
}
