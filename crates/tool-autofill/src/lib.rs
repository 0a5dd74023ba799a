pub mod api;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod policy;
pub mod ports;
pub mod profile;
pub mod selector;
pub mod timer;

mod indicator;
mod runner;
mod select;
mod write;

pub use api::{AutofillTool, AutofillToolBuilder};
pub use errors::AutofillError;
pub use metrics::{InMemoryMetrics, NoopMetrics};
pub use model::{AnalysisEntry, FillSummary, ScanReport};
pub use policy::{AutofillPolicyView, HighlightPolicy, IndicatorPolicy};
pub use ports::{IndicatorTimer, MetricsPort, TimerTask};
pub use profile::{NamedProfile, ProfileBook, UserProfile};
pub use timer::{ManualTimer, TokioIndicatorTimer};
