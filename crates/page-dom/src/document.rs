use formfill_core_types::NodeId;
use parking_lot::RwLock;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

use crate::errors::{DomError, DomResult};
use crate::model::{
    DispatchedEvent, EventKind, SelectOption, ValueInterception, WriteChannel, WriteRecord,
};
use crate::ports::{DomReader, DomWriter};
use crate::serialize;
use crate::style::InlineStyle;

const EXCLUDED_INPUT_TYPES: [&str; 3] = ["hidden", "submit", "button"];

/// In-memory host document built from parsed HTML.
///
/// Nodes live in an arena indexed by [`NodeId`]; the arena is filled in
/// document order, so comparing ids compares document positions. Value
/// semantics follow the browser: a written `value` property detaches an
/// input from its `value` attribute, textareas default to their text, and a
/// select reports the value of its selected option.
pub struct HtmlDocument {
    inner: RwLock<DomTree>,
}

pub(crate) struct DomTree {
    pub(crate) nodes: Vec<Node>,
    detached: bool,
    events: Vec<DispatchedEvent>,
    writes: Vec<WriteRecord>,
}

pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

pub(crate) enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Selection {
    Default,
    Option(NodeId),
    Nothing,
}

pub(crate) struct ElementData {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) style: InlineStyle,
    pub(crate) dirty_value: Option<String>,
    pub(crate) selection: Selection,
    interception: ValueInterception,
    pinned_value: Option<String>,
}

impl ElementData {
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.attrs.push((name, value.to_string())),
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    }

    fn is_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut tree = DomTree {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            detached: false,
            events: Vec::new(),
            writes: Vec::new(),
        };
        tree.append_element(parsed.root_element(), NodeId(0));
        debug!(nodes = tree.nodes.len(), "parsed html document");
        Self {
            inner: RwLock::new(tree),
        }
    }

    /// Simulate a page framework wrapping the control's value setter.
    pub fn intercept_value_writes(&self, node: NodeId, mode: ValueInterception) -> DomResult<()> {
        let mut tree = self.inner.write();
        let current = tree.control_value(node)?;
        let el = tree.element_mut(node)?;
        el.interception = mode;
        el.pinned_value = matches!(mode, ValueInterception::Frozen).then_some(current);
        Ok(())
    }

    /// Tear the document down; every later call fails with [`DomError::Detached`].
    pub fn detach(&self) {
        self.inner.write().detached = true;
    }

    pub fn events(&self) -> Vec<DispatchedEvent> {
        self.inner.read().events.clone()
    }

    pub fn events_for(&self, node: NodeId) -> Vec<EventKind> {
        self.inner
            .read()
            .events
            .iter()
            .filter(|event| event.target == node)
            .map(|event| event.kind)
            .collect()
    }

    pub fn write_log(&self) -> Vec<WriteRecord> {
        self.inner.read().writes.clone()
    }

    pub fn to_html(&self) -> String {
        serialize::render(&self.inner.read())
    }
}

impl DomTree {
    fn append_element(&mut self, element: ElementRef<'_>, parent: NodeId) {
        let value = element.value();
        let attrs: Vec<(String, String)> = value
            .attrs()
            .map(|(key, val)| (key.to_ascii_lowercase(), val.to_string()))
            .collect();
        let style = attrs
            .iter()
            .find(|(key, _)| key == "style")
            .map(|(_, raw)| InlineStyle::parse(raw))
            .unwrap_or_default();
        let id = self.push(
            parent,
            NodeData::Element(ElementData {
                tag: value.name().to_ascii_lowercase(),
                attrs,
                style,
                dirty_value: None,
                selection: Selection::Default,
                interception: ValueInterception::None,
                pinned_value: None,
            }),
        );
        for child in element.children() {
            if let Some(child_el) = ElementRef::wrap(child) {
                self.append_element(child_el, id);
            } else if let Some(text) = child.value().as_text() {
                let content: &str = text;
                self.push(id, NodeData::Text(content.to_string()));
            }
        }
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn node(&self, node: NodeId) -> DomResult<&Node> {
        if self.detached {
            return Err(DomError::Detached);
        }
        self.nodes.get(node.0).ok_or(DomError::NodeNotFound(node))
    }

    pub(crate) fn element(&self, node: NodeId) -> DomResult<&ElementData> {
        match &self.node(node)?.data {
            NodeData::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(node)),
        }
    }

    fn element_mut(&mut self, node: NodeId) -> DomResult<&mut ElementData> {
        if self.detached {
            return Err(DomError::Detached);
        }
        match self.nodes.get_mut(node.0).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => Ok(el),
            Some(_) => Err(DomError::NotAnElement(node)),
            None => Err(DomError::NodeNotFound(node)),
        }
    }

    fn control_mut(&mut self, node: NodeId) -> DomResult<&mut ElementData> {
        let el = self.element_mut(node)?;
        if !el.is_control() {
            return Err(DomError::NotAControl(node));
        }
        Ok(el)
    }

    fn elements(&self) -> impl Iterator<Item = (NodeId, &ElementData)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| match &node.data {
                NodeData::Element(el) => Some((NodeId(idx), el)),
                _ => None,
            })
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[node.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        out
    }

    pub(crate) fn text_of(&self, node: NodeId) -> String {
        let mut text = String::new();
        if let NodeData::Text(own) = &self.nodes[node.0].data {
            text.push_str(own);
        }
        for child in self.descendants(node) {
            if let NodeData::Text(content) = &self.nodes[child.0].data {
                text.push_str(content);
            }
        }
        text
    }

    fn options_of(&self, node: NodeId) -> DomResult<Vec<SelectOption>> {
        let el = self.element(node)?;
        if el.tag != "select" {
            return Err(DomError::NotAControl(node));
        }
        Ok(self
            .descendants(node)
            .into_iter()
            .filter_map(|child| match &self.nodes[child.0].data {
                NodeData::Element(opt) if opt.tag == "option" => {
                    let text = collapse_whitespace(&self.text_of(child));
                    let value = opt
                        .attr("value")
                        .map(str::to_string)
                        .unwrap_or_else(|| text.clone());
                    Some(SelectOption {
                        node: child,
                        value,
                        text,
                    })
                }
                _ => None,
            })
            .collect())
    }

    pub(crate) fn selected_option(&self, node: NodeId) -> DomResult<Option<SelectOption>> {
        let selection = self.element(node)?.selection;
        let options = self.options_of(node)?;
        let picked = match selection {
            Selection::Nothing => None,
            Selection::Option(chosen) => options.into_iter().find(|opt| opt.node == chosen),
            Selection::Default => {
                let explicit = options.iter().position(|opt| {
                    matches!(&self.nodes[opt.node.0].data,
                        NodeData::Element(el) if el.attr("selected").is_some())
                });
                match explicit {
                    Some(idx) => options.into_iter().nth(idx),
                    None => options.into_iter().next(),
                }
            }
        };
        Ok(picked)
    }

    fn control_value(&self, node: NodeId) -> DomResult<String> {
        let el = self.element(node)?;
        if let Some(pinned) = &el.pinned_value {
            return Ok(pinned.clone());
        }
        match el.tag.as_str() {
            "input" => Ok(el
                .dirty_value
                .clone()
                .or_else(|| el.attr("value").map(str::to_string))
                .unwrap_or_default()),
            "textarea" => Ok(el
                .dirty_value
                .clone()
                .unwrap_or_else(|| self.text_of(node))),
            "select" => Ok(self
                .selected_option(node)?
                .map(|opt| opt.value)
                .unwrap_or_default()),
            _ => Err(DomError::NotAControl(node)),
        }
    }

    /// Native value assignment, after interception has been ruled out.
    fn assign_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        let tag = self.element(node)?.tag.clone();
        if tag == "select" {
            let selection = match self
                .options_of(node)?
                .into_iter()
                .find(|opt| opt.value == value)
            {
                Some(opt) => Selection::Option(opt.node),
                None => Selection::Nothing,
            };
            self.control_mut(node)?.selection = selection;
        } else {
            self.control_mut(node)?.dirty_value = Some(value.to_string());
        }
        Ok(())
    }

    fn record_write(&mut self, node: NodeId, channel: WriteChannel, value: &str, applied: bool) {
        trace!(%node, channel = channel.as_str(), applied, "value write");
        self.writes.push(WriteRecord {
            node,
            channel,
            value: value.to_string(),
            applied,
        });
    }
}

pub(crate) fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl DomReader for HtmlDocument {
    fn form_controls(&self) -> DomResult<Vec<NodeId>> {
        let tree = self.inner.read();
        if tree.detached {
            return Err(DomError::Detached);
        }
        Ok(tree
            .elements()
            .filter(|(_, el)| match el.tag.as_str() {
                "textarea" | "select" => true,
                "input" => {
                    let ty = el.attr("type").unwrap_or("").trim().to_ascii_lowercase();
                    !EXCLUDED_INPUT_TYPES.contains(&ty.as_str())
                }
                _ => false,
            })
            .map(|(id, _)| id)
            .collect())
    }

    fn tag_name(&self, node: NodeId) -> DomResult<String> {
        Ok(self.inner.read().element(node)?.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self
            .inner
            .read()
            .element(node)?
            .attr(name)
            .map(str::to_string))
    }

    fn text_content(&self, node: NodeId) -> DomResult<String> {
        let tree = self.inner.read();
        tree.node(node)?;
        Ok(tree.text_of(node))
    }

    fn parent_element(&self, node: NodeId) -> DomResult<Option<NodeId>> {
        let tree = self.inner.read();
        let parent = tree.node(node)?.parent;
        Ok(parent.filter(|p| matches!(tree.nodes[p.0].data, NodeData::Element(_))))
    }

    fn previous_element_sibling(&self, node: NodeId) -> DomResult<Option<NodeId>> {
        let tree = self.inner.read();
        let Some(parent) = tree.node(node)?.parent else {
            return Ok(None);
        };
        let siblings = &tree.nodes[parent.0].children;
        let Some(pos) = siblings.iter().position(|sib| *sib == node) else {
            return Ok(None);
        };
        Ok(siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|sib| matches!(tree.nodes[sib.0].data, NodeData::Element(_))))
    }

    fn descendant_elements(&self, node: NodeId) -> DomResult<Vec<NodeId>> {
        let tree = self.inner.read();
        tree.node(node)?;
        Ok(tree
            .descendants(node)
            .into_iter()
            .filter(|id| matches!(tree.nodes[id.0].data, NodeData::Element(_)))
            .collect())
    }

    fn element_by_id(&self, id: &str) -> DomResult<Option<NodeId>> {
        let tree = self.inner.read();
        if tree.detached {
            return Err(DomError::Detached);
        }
        let found = tree
            .elements()
            .find(|(_, el)| el.attr("id") == Some(id))
            .map(|(node, _)| node);
        Ok(found)
    }

    fn label_for(&self, id: &str) -> DomResult<Option<NodeId>> {
        let tree = self.inner.read();
        if tree.detached {
            return Err(DomError::Detached);
        }
        let found = tree
            .elements()
            .find(|(_, el)| el.tag == "label" && el.attr("for") == Some(id))
            .map(|(node, _)| node);
        Ok(found)
    }

    fn value(&self, node: NodeId) -> DomResult<String> {
        self.inner.read().control_value(node)
    }

    fn options(&self, node: NodeId) -> DomResult<Vec<SelectOption>> {
        self.inner.read().options_of(node)
    }

    fn style(&self, node: NodeId, property: &str) -> DomResult<Option<String>> {
        Ok(self
            .inner
            .read()
            .element(node)?
            .style
            .get(property)
            .map(str::to_string))
    }
}

impl DomWriter for HtmlDocument {
    fn reader(&self) -> &dyn DomReader {
        self
    }

    fn set_value(&self, node: NodeId, value: &str) -> DomResult<()> {
        let mut tree = self.inner.write();
        let blocked = !matches!(
            tree.control_mut(node)?.interception,
            ValueInterception::None
        );
        if !blocked {
            tree.assign_value(node, value)?;
        }
        tree.record_write(node, WriteChannel::Property, value, !blocked);
        Ok(())
    }

    fn set_value_with_native_setter(&self, node: NodeId, value: &str) -> DomResult<bool> {
        let mut tree = self.inner.write();
        let blocked = matches!(
            tree.control_mut(node)?.interception,
            ValueInterception::PropertyWrites | ValueInterception::Frozen
        );
        if !blocked {
            tree.assign_value(node, value)?;
        }
        tree.record_write(node, WriteChannel::DescriptorSetter, value, !blocked);
        Ok(true)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        let mut tree = self.inner.write();
        let el = tree.element_mut(node)?;
        el.set_attr(name, value);
        if name.eq_ignore_ascii_case("style") {
            el.style = InlineStyle::parse(value);
        }
        if name.eq_ignore_ascii_case("value") && el.is_control() {
            let reflects =
                el.tag == "input" && el.dirty_value.is_none() && el.pinned_value.is_none();
            tree.record_write(node, WriteChannel::Attribute, value, reflects);
        }
        Ok(())
    }

    fn remove_attribute(&self, node: NodeId, name: &str) -> DomResult<()> {
        let mut tree = self.inner.write();
        let el = tree.element_mut(node)?;
        el.remove_attr(name);
        if name.eq_ignore_ascii_case("style") {
            el.style = InlineStyle::default();
        }
        Ok(())
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) -> DomResult<()> {
        let mut tree = self.inner.write();
        let el = tree.element_mut(node)?;
        el.style.set(property, value);
        if el.style.is_empty() {
            el.remove_attr("style");
        } else {
            let rendered = el.style.render();
            el.set_attr("style", &rendered);
        }
        Ok(())
    }

    fn dispatch_event(&self, node: NodeId, kind: EventKind, bubbles: bool) -> DomResult<()> {
        let mut tree = self.inner.write();
        tree.element(node)?;
        tree.events.push(DispatchedEvent {
            target: node,
            kind,
            bubbles,
        });
        Ok(())
    }
}
