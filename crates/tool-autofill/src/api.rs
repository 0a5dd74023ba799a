use std::collections::BTreeMap;
use std::sync::Arc;

use field_classifier::FieldClassifier;
use formfill_core_types::FieldType;
use page_dom::DomWriter;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::errors::AutofillError;
use crate::indicator::Indicator;
use crate::metrics::NoopMetrics;
use crate::model::{FillSummary, ScanReport, ScanState};
use crate::policy::AutofillPolicyView;
use crate::ports::{IndicatorTimer, MetricsPort};
use crate::profile::UserProfile;
use crate::runner::{execute, highlight, scan_only, RuntimeDeps};
use crate::timer::TokioIndicatorTimer;

/// Detects form fields in one document and fills them from a profile.
pub trait AutofillTool: Send + Sync {
    /// Scan the document, fill every detected control the profile has a
    /// value for, and report. Never fails; problems yield a zero summary.
    fn scan_and_fill(&self, profile: &UserProfile) -> FillSummary;

    /// Scan without writing.
    fn scan(&self) -> ScanReport;

    /// Selector to field type mapping of the last scan.
    fn detected_fields(&self) -> BTreeMap<String, FieldType>;

    /// Outline the controls of the last scan; returns how many were outlined.
    fn highlight_detected(&self) -> usize;
}

pub struct AutofillToolBuilder {
    policy: AutofillPolicyView,
    dom: Option<Arc<dyn DomWriter>>,
    classifier: Option<FieldClassifier>,
    timer: Option<Arc<dyn IndicatorTimer>>,
    metrics: Option<Arc<dyn MetricsPort>>,
}

impl AutofillToolBuilder {
    pub fn new(policy: AutofillPolicyView) -> Self {
        Self {
            policy,
            dom: None,
            classifier: None,
            timer: None,
            metrics: None,
        }
    }

    pub fn with_dom(mut self, dom: Arc<dyn DomWriter>) -> Self {
        self.dom = Some(dom);
        self
    }

    pub fn with_classifier(mut self, classifier: FieldClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_timer(mut self, timer: Arc<dyn IndicatorTimer>) -> Self {
        self.timer = Some(timer);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsPort>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// The timer defaults to the ambient tokio runtime and the metrics port
    /// to a no-op; the dom has no default.
    pub fn build(self) -> Result<Arc<dyn AutofillTool>, AutofillError> {
        let dom = self.dom.ok_or(AutofillError::MissingPort("dom"))?;
        let timer = match self.timer {
            Some(timer) => timer,
            None => Arc::new(
                TokioIndicatorTimer::try_current()
                    .ok_or(AutofillError::MissingPort("indicator timer"))?,
            ),
        };
        let classifier = self
            .classifier
            .unwrap_or_else(|| FieldClassifier::with_policy(self.policy.classifier.clone()));
        let indicator = Indicator::new(
            self.policy.indicator.clone(),
            self.policy.highlight.clone(),
            timer,
        );
        Ok(Arc::new(AutofillToolImpl {
            policy: self.policy,
            dom,
            classifier,
            indicator,
            metrics: self.metrics.unwrap_or_else(|| Arc::new(NoopMetrics)),
            state: Mutex::new(ScanState::default()),
        }))
    }
}

pub struct AutofillToolImpl {
    policy: AutofillPolicyView,
    dom: Arc<dyn DomWriter>,
    classifier: FieldClassifier,
    indicator: Indicator,
    metrics: Arc<dyn MetricsPort>,
    // held for a whole scan so overlapping calls serialize
    state: Mutex<ScanState>,
}

impl AutofillToolImpl {
    fn deps(&self) -> RuntimeDeps<'_> {
        RuntimeDeps {
            dom: &self.dom,
            classifier: &self.classifier,
            indicator: &self.indicator,
            metrics: self.metrics.as_ref(),
            policy: &self.policy,
        }
    }
}

impl AutofillTool for AutofillToolImpl {
    fn scan_and_fill(&self, profile: &UserProfile) -> FillSummary {
        let mut state = self.state.lock();
        match execute(&self.deps(), &mut state, profile) {
            Ok(summary) => summary,
            Err(AutofillError::Disabled) => {
                info!("autofill disabled; nothing scanned");
                FillSummary::default()
            }
            Err(err) => {
                warn!(error = %err, "scan failed");
                state.mapping.clear();
                state.analysis.clear();
                FillSummary::default()
            }
        }
    }

    fn scan(&self) -> ScanReport {
        let mut state = self.state.lock();
        scan_only(&self.deps(), &mut state).unwrap_or_else(|err| {
            warn!(error = %err, "scan failed");
            state.mapping.clear();
            state.analysis.clear();
            ScanReport::default()
        })
    }

    fn detected_fields(&self) -> BTreeMap<String, FieldType> {
        self.state
            .lock()
            .mapping
            .iter()
            .map(|mapped| (mapped.selector.clone(), mapped.field_type))
            .collect()
    }

    fn highlight_detected(&self) -> usize {
        let state = self.state.lock();
        highlight(&self.deps(), &state)
    }
}
