use formfill_core_types::{DetectionMethod, FieldType, NodeId, ScanId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One detection recorded during a scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisEntry {
    pub field_type: FieldType,
    pub confidence: u8,
    pub method: DetectionMethod,
    pub selector: String,
}

/// Result of one `scan_and_fill` call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillSummary {
    pub filled: usize,
    /// Distinct selectors in the mapping.
    pub detected: usize,
    pub fields: Vec<FieldType>,
    pub analysis: Vec<AnalysisEntry>,
}

/// Detection-only pass over the document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub controls: usize,
    pub detected: usize,
    pub analysis: Vec<AnalysisEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MappedField {
    pub selector: String,
    pub field_type: FieldType,
    pub node: NodeId,
}

/// Instance-owned results of the most recent scan.
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    pub scan_id: Option<ScanId>,
    pub mapping: Vec<MappedField>,
    pub analysis: Vec<AnalysisEntry>,
}

impl ScanState {
    pub fn reset(&mut self) {
        self.scan_id = Some(ScanId::new());
        self.mapping.clear();
        self.analysis.clear();
    }

    /// Record a detection. A reused selector replaces the earlier entry in
    /// place, keeping its position.
    pub fn record(&mut self, node: NodeId, entry: AnalysisEntry) {
        let mapped = MappedField {
            selector: entry.selector.clone(),
            field_type: entry.field_type,
            node,
        };
        match self
            .mapping
            .iter_mut()
            .find(|existing| existing.selector == mapped.selector)
        {
            Some(existing) => {
                warn!(
                    selector = %mapped.selector,
                    previous = %existing.field_type,
                    replacement = %mapped.field_type,
                    "selector collision; earlier control will not be filled"
                );
                *existing = mapped;
            }
            None => self.mapping.push(mapped),
        }
        self.analysis.push(entry);
    }
}
