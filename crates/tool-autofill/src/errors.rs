use field_classifier::ClassifierError;
use formfill_core_types::CoreError;
use page_dom::DomError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutofillError {
    #[error("autofill disabled by policy")]
    Disabled,
    #[error("{0} port required")]
    MissingPort(&'static str),
    #[error("dom access failed: {0}")]
    Dom(#[from] DomError),
    #[error("classification failed: {0}")]
    Classifier(#[from] ClassifierError),
}

impl AutofillError {
    /// The document itself is unusable, not just one control.
    pub fn is_document_level(&self) -> bool {
        match self {
            AutofillError::Dom(err) => err.is_document_level(),
            AutofillError::Classifier(err) => err.is_document_level(),
            AutofillError::Disabled | AutofillError::MissingPort(_) => false,
        }
    }
}

impl From<AutofillError> for CoreError {
    fn from(err: AutofillError) -> Self {
        CoreError::new(err.to_string())
    }
}
