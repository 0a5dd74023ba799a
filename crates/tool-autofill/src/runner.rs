use std::sync::Arc;

use field_classifier::FieldClassifier;
use formfill_core_types::{FieldType, NodeId};
use page_dom::{DomError, DomResult, DomWriter};
use tracing::{debug, info, instrument, warn};

use crate::errors::AutofillError;
use crate::indicator::Indicator;
use crate::model::{AnalysisEntry, FillSummary, ScanReport, ScanState};
use crate::policy::AutofillPolicyView;
use crate::ports::MetricsPort;
use crate::profile::UserProfile;
use crate::select::fill_select;
use crate::selector::selector_for;
use crate::write::fill_text;

pub(crate) struct RuntimeDeps<'a> {
    pub dom: &'a Arc<dyn DomWriter>,
    pub classifier: &'a FieldClassifier,
    pub indicator: &'a Indicator,
    pub metrics: &'a dyn MetricsPort,
    pub policy: &'a AutofillPolicyView,
}

/// Classify every control and rebuild `state`. Returns the number of
/// controls examined.
#[instrument(skip_all)]
pub(crate) fn scan(deps: &RuntimeDeps<'_>, state: &mut ScanState) -> Result<usize, AutofillError> {
    state.reset();
    let controls = deps.dom.form_controls()?;
    for &node in &controls {
        match classify(deps, node) {
            Ok(Some(entry)) => {
                deps.metrics.record_detection(entry.method);
                state.record(node, entry);
            }
            Ok(None) => {}
            Err(err) if err.is_document_level() => return Err(err),
            Err(err) => warn!(%node, error = %err, "skipping control"),
        }
    }
    debug!(
        controls = controls.len(),
        detected = state.mapping.len(),
        "scan finished"
    );
    Ok(controls.len())
}

fn classify(deps: &RuntimeDeps<'_>, node: NodeId) -> Result<Option<AnalysisEntry>, AutofillError> {
    let reader = deps.dom.reader();
    let Some(detection) = deps.classifier.detect(reader, node)? else {
        return Ok(None);
    };
    let selector = selector_for(reader, node)?;
    debug!(
        %node,
        %selector,
        field = %detection.field_type,
        confidence = detection.confidence,
        method = %detection.method,
        "detected field"
    );
    Ok(Some(AnalysisEntry {
        field_type: detection.field_type,
        confidence: detection.confidence,
        method: detection.method,
        selector,
    }))
}

pub(crate) fn scan_only(deps: &RuntimeDeps<'_>, state: &mut ScanState) -> Result<ScanReport, AutofillError> {
    let controls = scan(deps, state)?;
    Ok(ScanReport {
        controls,
        detected: state.mapping.len(),
        analysis: state.analysis.clone(),
    })
}

#[instrument(skip_all, fields(scan = tracing::field::Empty))]
pub(crate) fn execute(
    deps: &RuntimeDeps<'_>,
    state: &mut ScanState,
    profile: &UserProfile,
) -> Result<FillSummary, AutofillError> {
    if !deps.policy.enabled {
        return Err(AutofillError::Disabled);
    }

    let controls = scan(deps, state)?;
    if let Some(scan_id) = &state.scan_id {
        tracing::Span::current().record("scan", scan_id.as_str());
    }
    let detected = state.mapping.len();
    let analysis = state.analysis.clone();

    match fill_detected(deps, state, profile) {
        Ok(fields) => {
            info!(controls, detected, filled = fields.len(), "autofill complete");
            Ok(FillSummary {
                filled: fields.len(),
                detected,
                fields,
                analysis,
            })
        }
        Err(err) => {
            warn!(error = %err, detected, "fill phase aborted");
            Ok(FillSummary {
                filled: 0,
                detected,
                fields: Vec::new(),
                analysis,
            })
        }
    }
}

fn fill_detected(
    deps: &RuntimeDeps<'_>,
    state: &ScanState,
    profile: &UserProfile,
) -> Result<Vec<FieldType>, DomError> {
    let mut filled = Vec::new();
    for mapped in &state.mapping {
        let value = profile.value_for(mapped.field_type);
        if value.is_empty() {
            deps.metrics.record_skip("empty_value");
            continue;
        }
        match fill_control(deps, mapped.node, value) {
            Ok(ok) => {
                deps.metrics.record_fill(mapped.field_type, ok);
                if ok {
                    filled.push(mapped.field_type);
                } else {
                    debug!(selector = %mapped.selector, "value did not stick");
                }
            }
            Err(err) if err.is_document_level() => return Err(err),
            Err(err) => {
                deps.metrics.record_fill(mapped.field_type, false);
                warn!(selector = %mapped.selector, error = %err, "fill failed");
            }
        }
    }
    Ok(filled)
}

fn fill_control(deps: &RuntimeDeps<'_>, node: NodeId, value: &str) -> DomResult<bool> {
    let dom = deps.dom.as_ref();
    for guard in ["readonly", "disabled"] {
        if dom.has_attribute(node, guard)? {
            deps.metrics.record_skip(guard);
            debug!(%node, guard, "control not writable");
            return Ok(false);
        }
    }

    let ok = if dom.tag_name(node)? == "select" {
        fill_select(dom, node, value)?
    } else {
        fill_text(dom, deps.metrics, node, value)?
    };
    if ok {
        deps.indicator.mark_filled(deps.dom, node)?;
    }
    Ok(ok)
}

/// Outline every control of the last scan; returns how many were outlined.
pub(crate) fn highlight(deps: &RuntimeDeps<'_>, state: &ScanState) -> usize {
    state
        .mapping
        .iter()
        .filter(|mapped| {
            match deps
                .indicator
                .highlight(deps.dom.as_ref(), mapped.node, mapped.field_type)
            {
                Ok(()) => true,
                Err(err) => {
                    warn!(selector = %mapped.selector, error = %err, "highlight failed");
                    false
                }
            }
        })
        .count()
}
