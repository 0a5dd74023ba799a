use formfill_core_types::NodeId;

use crate::errors::DomResult;
use crate::model::{EventKind, SelectOption};

/// Read-only view of a host document.
///
/// Element handles come from [`DomReader::form_controls`] or the traversal
/// methods and stay valid for the lifetime of the document.
pub trait DomReader: Send + Sync {
    /// Every `input` (except hidden/submit/button), `textarea` and `select`,
    /// in document order.
    fn form_controls(&self) -> DomResult<Vec<NodeId>>;

    /// Lower-case tag name.
    fn tag_name(&self, node: NodeId) -> DomResult<String>;

    fn attribute(&self, node: NodeId, name: &str) -> DomResult<Option<String>>;

    fn text_content(&self, node: NodeId) -> DomResult<String>;

    fn parent_element(&self, node: NodeId) -> DomResult<Option<NodeId>>;

    fn previous_element_sibling(&self, node: NodeId) -> DomResult<Option<NodeId>>;

    /// Element descendants in document order, excluding `node` itself.
    fn descendant_elements(&self, node: NodeId) -> DomResult<Vec<NodeId>>;

    fn element_by_id(&self, id: &str) -> DomResult<Option<NodeId>>;

    /// First `label` whose `for` attribute equals `id`.
    fn label_for(&self, id: &str) -> DomResult<Option<NodeId>>;

    /// Current `value` property of a control.
    fn value(&self, node: NodeId) -> DomResult<String>;

    /// Options of a `select`, in document order.
    fn options(&self, node: NodeId) -> DomResult<Vec<SelectOption>>;

    fn style(&self, node: NodeId, property: &str) -> DomResult<Option<String>>;

    fn has_attribute(&self, node: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.attribute(node, name)?.is_some())
    }

    fn class_list(&self, node: NodeId) -> DomResult<Vec<String>> {
        Ok(self
            .attribute(node, "class")?
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default())
    }
}

/// Mutating half of the host document.
pub trait DomWriter: DomReader {
    /// This document as a read-only view.
    fn reader(&self) -> &dyn DomReader;

    /// Direct `element.value = value` assignment. Page frameworks may swallow it.
    fn set_value(&self, node: NodeId, value: &str) -> DomResult<()>;

    /// Invoke the native setter found through the prototype's `value`
    /// descriptor. Returns `false` when no such setter exists.
    fn set_value_with_native_setter(&self, node: NodeId, value: &str) -> DomResult<bool>;

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> DomResult<()>;

    fn remove_attribute(&self, node: NodeId, name: &str) -> DomResult<()>;

    /// Set one inline style property; an empty value clears it.
    fn set_style(&self, node: NodeId, property: &str, value: &str) -> DomResult<()>;

    fn dispatch_event(&self, node: NodeId, kind: EventKind, bubbles: bool) -> DomResult<()>;
}
