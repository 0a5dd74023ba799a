use formfill_core_types::{CoreError, NodeId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("{0} is not an element")]
    NotAnElement(NodeId),
    #[error("{0} is not a form control")]
    NotAControl(NodeId),
    #[error("document detached")]
    Detached,
}

impl DomError {
    /// Errors that mean the whole document is unusable, not just one node.
    pub fn is_document_level(&self) -> bool {
        matches!(self, DomError::Detached)
    }
}

impl From<DomError> for CoreError {
    fn from(err: DomError) -> Self {
        CoreError::new(err.to_string())
    }
}

pub type DomResult<T> = std::result::Result<T, DomError>;
