///! Field Classifier - semantic field detection for form controls
///!
///! Given one control and its document, scores every rule of a fixed catalog
///! across six signal channels and returns the best field type:
///! - autocomplete tokens and input types
///! - id/name patterns
///! - resolved label text
///! - attribute keywords and placeholder text
///!
///! Open-ended question and essay controls are excluded before scoring.
pub mod catalog;
pub mod classifier;
pub mod context;
pub mod errors;
pub mod label;
pub mod policy;
pub mod question;
pub mod scoring;

// Re-exports
pub use catalog::{catalog, max_possible_score, FieldTypeRule};
pub use classifier::{Assessment, Candidate, Detection, FieldClassifier};
pub use context::ElementContext;
pub use errors::{ClassifierError, Result};
pub use label::{LabelSource, ResolvedLabel};
pub use policy::ClassifierPolicy;
pub use question::ExclusionReason;
