use std::collections::BTreeMap;

use dashmap::DashMap;
use formfill_core_types::{DetectionMethod, FieldType};
use page_dom::WriteChannel;

use crate::ports::MetricsPort;

#[derive(Clone, Debug, Default)]
pub struct NoopMetrics;

impl MetricsPort for NoopMetrics {
    fn record_detection(&self, _method: DetectionMethod) {}
    fn record_fill(&self, _field: FieldType, _ok: bool) {}
    fn record_fallback(&self, _channel: WriteChannel) {}
    fn record_skip(&self, _reason: &str) {}
}

/// Counter map keyed by `<family>.<label>`.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    counters: DashMap<String, u64>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self, key: String) {
        *self.counters.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counters.get(key).map(|v| *v).unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

impl MetricsPort for InMemoryMetrics {
    fn record_detection(&self, method: DetectionMethod) {
        self.bump(format!("detect.{}", method.as_str()));
    }

    fn record_fill(&self, field: FieldType, ok: bool) {
        let outcome = if ok { "ok" } else { "fail" };
        self.bump(format!("fill.{outcome}.{}", field.as_str()));
    }

    fn record_fallback(&self, channel: WriteChannel) {
        self.bump(format!("fallback.{}", channel.as_str()));
    }

    fn record_skip(&self, reason: &str) {
        self.bump(format!("skip.{reason}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = InMemoryMetrics::new();
        metrics.record_detection(DetectionMethod::Pattern);
        metrics.record_detection(DetectionMethod::Pattern);
        metrics.record_fill(FieldType::Email, true);
        metrics.record_skip("readonly");

        assert_eq!(metrics.get("detect.pattern"), 2);
        assert_eq!(metrics.get("fill.ok.email"), 1);
        assert_eq!(metrics.get("fallback.attribute"), 0);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get("skip.readonly"), Some(&1));
    }
}
