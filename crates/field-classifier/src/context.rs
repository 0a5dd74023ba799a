use formfill_core_types::NodeId;
use page_dom::{DomReader, DomResult};
use serde::{Deserialize, Serialize};

use crate::label::{resolve_label, LabelSource};

/// Signals gathered from one control, captured once per classification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementContext {
    pub tag_name: String,
    pub id: String,
    pub name: String,
    /// Lowercased `type` attribute.
    pub input_type: String,
    /// Lowercased `autocomplete` attribute.
    pub autocomplete: String,
    pub placeholder: String,
    pub class_name: String,
    pub data_field: String,
    pub data_testid: String,
    pub label_text: String,
    pub label_source: LabelSource,
}

impl ElementContext {
    pub fn capture(dom: &dyn DomReader, node: NodeId) -> DomResult<Self> {
        let attr = |name: &str| -> DomResult<String> {
            Ok(dom.attribute(node, name)?.unwrap_or_default())
        };
        let label = resolve_label(dom, node)?;
        let tag_name = dom.tag_name(node)?;
        let placeholder = match tag_name.as_str() {
            "input" | "textarea" => attr("placeholder")?,
            _ => String::new(),
        };
        Ok(Self {
            tag_name,
            id: attr("id")?,
            name: attr("name")?,
            input_type: attr("type")?.trim().to_lowercase(),
            autocomplete: attr("autocomplete")?.trim().to_lowercase(),
            placeholder,
            class_name: attr("class")?,
            data_field: attr("data-field")?,
            data_testid: attr("data-testid")?,
            label_text: label.text,
            label_source: label.source,
        })
    }

    /// Lowercased, space-joined id, name, class, data-field, data-testid and
    /// label text. Keyword matching runs against this.
    pub fn attribute_blob(&self) -> String {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.class_name.as_str(),
            self.data_field.as_str(),
            self.data_testid.as_str(),
            self.label_text.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }

    pub fn label_lower(&self) -> String {
        self.label_text.to_lowercase()
    }

    pub fn is_textarea(&self) -> bool {
        self.tag_name == "textarea"
    }
}
