use formfill_core_types::NodeId;
use page_dom::{DomResult, DomWriter, EventKind, WriteChannel};
use tracing::debug;

use crate::ports::MetricsPort;

const CHANGE_EVENTS: [EventKind; 3] = [EventKind::Input, EventKind::Change, EventKind::Blur];

/// Bubbling `input`, `change` and `blur`, in that order.
pub(crate) fn dispatch_change_events(dom: &dyn DomWriter, node: NodeId) -> DomResult<()> {
    for kind in CHANGE_EVENTS {
        dom.dispatch_event(node, kind, true)?;
    }
    Ok(())
}

/// Write `target` into a text-like control, falling back from the direct
/// property to the native descriptor setter to the `value` attribute while
/// the value still differs. Returns whether the control ends up holding
/// exactly `target`.
pub(crate) fn fill_text(
    dom: &dyn DomWriter,
    metrics: &dyn MetricsPort,
    node: NodeId,
    target: &str,
) -> DomResult<bool> {
    dom.set_value(node, target)?;

    if dom.value(node)? != target && dom.set_value_with_native_setter(node, target)? {
        metrics.record_fallback(WriteChannel::DescriptorSetter);
        debug!(%node, "direct value write intercepted; used native setter");
    }

    if dom.value(node)? != target {
        dom.set_attribute(node, "value", target)?;
        metrics.record_fallback(WriteChannel::Attribute);
        debug!(%node, "property writes intercepted; set value attribute");
    }

    dispatch_change_events(dom, node)?;
    Ok(dom.value(node)? == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::InMemoryMetrics;
    use page_dom::{DomReader, HtmlDocument, ValueInterception};

    fn setup(html: &str) -> (HtmlDocument, NodeId) {
        let doc = HtmlDocument::parse(html);
        let node = doc.element_by_id("f").unwrap().unwrap();
        (doc, node)
    }

    #[test]
    fn direct_write_needs_no_fallback() {
        let (doc, node) = setup(r#"<input id="f">"#);
        let metrics = InMemoryMetrics::new();
        assert!(fill_text(&doc, &metrics, node, "Ada").unwrap());
        assert!(metrics.snapshot().is_empty());
        assert_eq!(
            doc.events_for(node),
            vec![EventKind::Input, EventKind::Change, EventKind::Blur]
        );
        assert!(doc.events().iter().all(|event| event.bubbles));
    }

    #[test]
    fn intercepted_direct_write_uses_native_setter() {
        let (doc, node) = setup(r#"<input id="f">"#);
        doc.intercept_value_writes(node, ValueInterception::DirectWrites)
            .unwrap();
        let metrics = InMemoryMetrics::new();
        assert!(fill_text(&doc, &metrics, node, "Ada").unwrap());
        assert_eq!(metrics.get("fallback.descriptor_setter"), 1);
        assert_eq!(metrics.get("fallback.attribute"), 0);
        assert_eq!(doc.value(node).unwrap(), "Ada");
    }

    #[test]
    fn attribute_fallback_reaches_pristine_input() {
        let (doc, node) = setup(r#"<input id="f">"#);
        doc.intercept_value_writes(node, ValueInterception::PropertyWrites)
            .unwrap();
        let metrics = InMemoryMetrics::new();
        assert!(fill_text(&doc, &metrics, node, "Ada").unwrap());
        assert_eq!(metrics.get("fallback.attribute"), 1);
    }

    #[test]
    fn frozen_control_is_not_filled() {
        let (doc, node) = setup(r#"<input id="f" value="locked">"#);
        doc.intercept_value_writes(node, ValueInterception::Frozen)
            .unwrap();
        let metrics = InMemoryMetrics::new();
        assert!(!fill_text(&doc, &metrics, node, "Ada").unwrap());
        assert_eq!(doc.value(node).unwrap(), "locked");
        // events still fire once after the chain
        assert_eq!(doc.events_for(node).len(), 3);
    }
}
