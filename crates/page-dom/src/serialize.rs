use formfill_core_types::NodeId;

use crate::document::{DomTree, NodeData, Selection};

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are written verbatim.
const RAW_TEXT_ELEMENTS: [&str; 8] = [
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

/// Render the tree back to HTML, reflecting live control state: written
/// input values become `value` attributes, textareas carry their value as
/// content and the chosen option of a select gets `selected`.
pub(crate) fn render(tree: &DomTree) -> String {
    let mut out = String::from("<!DOCTYPE html>");
    for child in &tree.nodes[0].children {
        render_node(tree, *child, Selection::Default, false, &mut out);
    }
    out
}

/// `selection` is the state of the enclosing select; `Selection::Default`
/// keeps the parsed `selected` markers.
fn render_node(
    tree: &DomTree,
    node: NodeId,
    selection: Selection,
    raw_text: bool,
    out: &mut String,
) {
    match &tree.nodes[node.0].data {
        NodeData::Document => {}
        NodeData::Text(text) if raw_text => out.push_str(text),
        NodeData::Text(text) => out.push_str(&escape(text, false)),
        NodeData::Element(el) => {
            let overrides_selected = selection != Selection::Default;
            out.push('<');
            out.push_str(&el.tag);
            for (key, value) in &el.attrs {
                if el.tag == "input" && key == "value" && el.dirty_value.is_some() {
                    continue;
                }
                if el.tag == "option" && key == "selected" && overrides_selected {
                    continue;
                }
                push_attr(out, key, value);
            }
            if el.tag == "input" {
                if let Some(value) = &el.dirty_value {
                    push_attr(out, "value", value);
                }
            }
            if el.tag == "option" && selection == Selection::Option(node) {
                push_attr(out, "selected", "");
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }

            let inner = if el.tag == "select" { el.selection } else { selection };
            let raw = RAW_TEXT_ELEMENTS.contains(&el.tag.as_str());

            match (&el.dirty_value, el.tag.as_str()) {
                (Some(value), "textarea") => out.push_str(&escape(value, false)),
                _ => {
                    for child in &tree.nodes[node.0].children {
                        render_node(tree, *child, inner, raw, out);
                    }
                }
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    if !value.is_empty() {
        out.push_str("=\"");
        out.push_str(&escape(value, true));
        out.push('"');
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' if !attribute => escaped.push_str("&lt;"),
            '>' if !attribute => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use crate::ports::{DomReader, DomWriter};
    use crate::HtmlDocument;

    #[test]
    fn written_values_are_reflected_in_markup() {
        let doc = HtmlDocument::parse(
            r#"<form><input id="n" value="old"><textarea id="t">draft</textarea>
            <select id="s"><option value="a" selected>A</option><option value="b">B</option></select></form>"#,
        );
        let input = doc.element_by_id("n").unwrap().unwrap();
        let area = doc.element_by_id("t").unwrap().unwrap();
        let select = doc.element_by_id("s").unwrap().unwrap();
        doc.set_value(input, "Ada \"A\" & co").unwrap();
        doc.set_value(area, "<hi>").unwrap();
        doc.set_value(select, "b").unwrap();

        let html = doc.to_html();
        assert!(html.contains(r#"<input id="n" value="Ada &quot;A&quot; &amp; co">"#));
        assert!(html.contains(r#"<textarea id="t">&lt;hi&gt;</textarea>"#));
        assert!(html.contains(r#"<option value="a">A</option>"#));
        assert!(html.contains(r#"<option value="b" selected>B</option>"#));
    }

    #[test]
    fn script_and_style_bodies_are_written_verbatim() {
        let doc = HtmlDocument::parse(
            r#"<html><head><style>a > b { color: red }</style></head>
            <body><script>if (a < b && c > d) { go(); }</script><p>a < b & c</p></body></html>"#,
        );
        let html = doc.to_html();
        assert!(html.contains("<script>if (a < b && c > d) { go(); }</script>"));
        assert!(html.contains("<style>a > b { color: red }</style>"));
        assert!(html.contains("<p>a &lt; b &amp; c</p>"));
    }

    #[test]
    fn cleared_select_drops_parsed_markers() {
        let doc = HtmlDocument::parse(
            r#"<select id="s"><option value="a" selected>A</option><option value="b">B</option></select>
            <select id="t"><option value="x" selected>X</option></select>"#,
        );
        let select = doc.element_by_id("s").unwrap().unwrap();
        doc.set_value(select, "nowhere").unwrap();

        let html = doc.to_html();
        assert!(html.contains(r#"<option value="a">A</option><option value="b">B</option>"#));
        assert!(html.contains(r#"<option value="x" selected>X</option>"#));
    }
}
