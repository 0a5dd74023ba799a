///! Error types for the field classifier
use formfill_core_types::CoreError;
use page_dom::DomError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("dom access failed: {0}")]
    Dom(#[from] DomError),
}

impl ClassifierError {
    pub fn is_document_level(&self) -> bool {
        match self {
            ClassifierError::Dom(err) => err.is_document_level(),
        }
    }
}

impl From<ClassifierError> for CoreError {
    fn from(err: ClassifierError) -> Self {
        CoreError::new(err.to_string())
    }
}

/// Result type for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;
