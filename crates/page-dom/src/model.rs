use formfill_core_types::NodeId;
use serde::{Deserialize, Serialize};

/// Synthetic events dispatched after a value write.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Input,
    Change,
    Blur,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Blur => "blur",
        }
    }
}

/// Route a value write took into the control.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteChannel {
    /// Plain `element.value = ...` assignment.
    Property,
    /// Setter taken from the prototype's `value` property descriptor.
    DescriptorSetter,
    /// `setAttribute("value", ...)`.
    Attribute,
}

impl WriteChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteChannel::Property => "property",
            WriteChannel::DescriptorSetter => "descriptor_setter",
            WriteChannel::Attribute => "attribute",
        }
    }
}

/// How a page framework treats writes to a control's `value`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueInterception {
    #[default]
    None,
    /// The instance setter is wrapped and swallows direct assignment; the
    /// prototype descriptor still reaches the native setter.
    DirectWrites,
    /// Both property routes are swallowed.
    PropertyWrites,
    /// The value is pinned; nothing changes it.
    Frozen,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub node: NodeId,
    pub value: String,
    pub text: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DispatchedEvent {
    pub target: NodeId,
    pub kind: EventKind,
    pub bubbles: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WriteRecord {
    pub node: NodeId,
    pub channel: WriteChannel,
    pub value: String,
    pub applied: bool,
}
