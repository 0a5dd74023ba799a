use std::time::Duration;

use formfill_core_types::{DetectionMethod, FieldType};
use page_dom::WriteChannel;

/// Deferred work scheduled by the indicator.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after a delay. Fire-and-forget: callers never wait.
pub trait IndicatorTimer: Send + Sync {
    fn schedule(&self, delay: Duration, task: TimerTask);
}

pub trait MetricsPort: Send + Sync {
    fn record_detection(&self, method: DetectionMethod);
    fn record_fill(&self, field: FieldType, ok: bool);
    /// A write channel beyond the direct property assignment was needed.
    fn record_fallback(&self, channel: WriteChannel);
    fn record_skip(&self, reason: &str);
}
