use std::sync::Arc;

use dashmap::DashMap;
use formfill_core_types::{FieldType, NodeId};
use page_dom::{DomResult, DomWriter};
use tracing::debug;

use crate::policy::{HighlightPolicy, IndicatorPolicy};
use crate::ports::IndicatorTimer;

pub(crate) const AUTOFILLED_ATTR: &str = "data-autofilled";
const INDICATOR_PROPS: [&str; 4] = ["border-color", "box-shadow", "background-color", "transition"];

/// Applies and later clears the "just filled" styling.
pub(crate) struct Indicator {
    policy: IndicatorPolicy,
    highlight: HighlightPolicy,
    timer: Arc<dyn IndicatorTimer>,
    generations: Arc<DashMap<NodeId, u64>>,
}

impl Indicator {
    pub fn new(
        policy: IndicatorPolicy,
        highlight: HighlightPolicy,
        timer: Arc<dyn IndicatorTimer>,
    ) -> Self {
        Self {
            policy,
            highlight,
            timer,
            generations: Arc::new(DashMap::new()),
        }
    }

    pub fn mark_filled(&self, dom: &Arc<dyn DomWriter>, node: NodeId) -> DomResult<()> {
        if !self.policy.enabled {
            return Ok(());
        }
        dom.set_style(node, "border-color", &self.policy.border_color)?;
        dom.set_style(node, "box-shadow", &self.policy.box_shadow)?;
        dom.set_style(node, "background-color", &self.policy.background_color)?;
        dom.set_attribute(node, AUTOFILLED_ATTR, "true")?;
        dom.set_style(node, "transition", &self.policy.transition)?;

        let generation = {
            let mut slot = self.generations.entry(node).or_insert(0);
            *slot += 1;
            *slot
        };
        let dom = Arc::clone(dom);
        let generations = Arc::clone(&self.generations);
        self.timer.schedule(
            self.policy.clear_after(),
            Box::new(move || {
                match clear_if_current(dom.as_ref(), &generations, node, generation) {
                    Ok(cleared) => debug!(%node, generation, cleared, "indicator timer fired"),
                    Err(err) => debug!(%node, error = %err, "indicator removal failed"),
                }
            }),
        );
        Ok(())
    }

    /// Outline a detected control and add a tooltip naming its field type.
    pub fn highlight(&self, dom: &dyn DomWriter, node: NodeId, field: FieldType) -> DomResult<()> {
        dom.set_style(node, "box-shadow", &self.highlight.box_shadow)?;
        dom.set_style(node, "transition", &self.highlight.transition)?;
        dom.set_attribute(node, "title", &format!("detected: {field}"))
    }
}

/// Remove the indicator unless a newer one was applied to the same control
/// or the marker is already gone.
fn clear_if_current(
    dom: &dyn DomWriter,
    generations: &DashMap<NodeId, u64>,
    node: NodeId,
    generation: u64,
) -> DomResult<bool> {
    let latest = generations.get(&node).map(|slot| *slot);
    if latest != Some(generation) {
        return Ok(false);
    }
    if dom.attribute(node, AUTOFILLED_ATTR)?.as_deref() != Some("true") {
        return Ok(false);
    }
    for prop in INDICATOR_PROPS {
        dom.set_style(node, prop, "")?;
    }
    dom.remove_attribute(node, AUTOFILLED_ATTR)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimer;
    use page_dom::{DomReader, HtmlDocument};

    fn setup() -> (Arc<HtmlDocument>, Arc<dyn DomWriter>, NodeId) {
        let doc = Arc::new(HtmlDocument::parse(r#"<input id="f" style="width: 10px">"#));
        let node = doc.element_by_id("f").unwrap().unwrap();
        let dom: Arc<dyn DomWriter> = doc.clone();
        (doc, dom, node)
    }

    #[test]
    fn indicator_applied_then_cleared() {
        let (doc, dom, node) = setup();
        let timer = Arc::new(ManualTimer::new());
        let indicator = Indicator::new(
            IndicatorPolicy::default(),
            HighlightPolicy::default(),
            timer.clone(),
        );

        indicator.mark_filled(&dom, node).unwrap();
        assert_eq!(doc.attribute(node, AUTOFILLED_ATTR).unwrap().as_deref(), Some("true"));
        assert_eq!(doc.style(node, "border-color").unwrap().as_deref(), Some("#10b981"));
        assert_eq!(timer.pending(), 1);

        timer.fire_all();
        assert!(!doc.has_attribute(node, AUTOFILLED_ATTR).unwrap());
        assert_eq!(doc.style(node, "box-shadow").unwrap(), None);
        assert_eq!(doc.style(node, "width").unwrap().as_deref(), Some("10px"));
    }

    #[test]
    fn stale_removal_keeps_newer_indicator() {
        let (doc, dom, node) = setup();
        let timer = Arc::new(ManualTimer::new());
        let indicator = Indicator::new(
            IndicatorPolicy::default(),
            HighlightPolicy::default(),
            timer.clone(),
        );
        indicator.mark_filled(&dom, node).unwrap();
        indicator.mark_filled(&dom, node).unwrap();

        let generations = indicator.generations.clone();
        assert!(!clear_if_current(dom.as_ref(), &generations, node, 1).unwrap());
        assert!(doc.has_attribute(node, AUTOFILLED_ATTR).unwrap());
        assert!(clear_if_current(dom.as_ref(), &generations, node, 2).unwrap());
        timer.discard();
    }

    #[test]
    fn removal_skipped_when_marker_gone() {
        let (doc, dom, node) = setup();
        let timer = Arc::new(ManualTimer::new());
        let indicator = Indicator::new(
            IndicatorPolicy::default(),
            HighlightPolicy::default(),
            timer.clone(),
        );
        indicator.mark_filled(&dom, node).unwrap();
        dom.remove_attribute(node, AUTOFILLED_ATTR).unwrap();
        timer.fire_all();
        assert_eq!(doc.style(node, "border-color").unwrap().as_deref(), Some("#10b981"));
    }

    #[test]
    fn disabled_indicator_touches_nothing() {
        let (doc, dom, node) = setup();
        let timer = Arc::new(ManualTimer::new());
        let policy = IndicatorPolicy {
            enabled: false,
            ..IndicatorPolicy::default()
        };
        let indicator = Indicator::new(policy, HighlightPolicy::default(), timer.clone());
        indicator.mark_filled(&dom, node).unwrap();
        assert_eq!(timer.pending(), 0);
        assert!(!doc.has_attribute(node, AUTOFILLED_ATTR).unwrap());
    }

    #[test]
    fn highlight_sets_tooltip() {
        let (doc, dom, node) = setup();
        let indicator = Indicator::new(
            IndicatorPolicy::default(),
            HighlightPolicy::default(),
            Arc::new(ManualTimer::new()),
        );
        indicator.highlight(dom.as_ref(), node, FieldType::ZipCode).unwrap();
        assert_eq!(
            doc.attribute(node, "title").unwrap().as_deref(),
            Some("detected: zipCode")
        );
        assert_eq!(
            doc.style(node, "box-shadow").unwrap().as_deref(),
            Some("0 0 0 2px rgba(59, 130, 246, 0.3)")
        );
    }
}
