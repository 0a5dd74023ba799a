use formfill_core_types::NodeId;
use page_dom::{DomResult, DomWriter, SelectOption};
use tracing::debug;

use crate::write::dispatch_change_events;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionMatch {
    Exact,
    Substring,
    Alias,
}

impl OptionMatch {
    fn as_str(&self) -> &'static str {
        match self {
            OptionMatch::Exact => "exact",
            OptionMatch::Substring => "substring",
            OptionMatch::Alias => "alias",
        }
    }
}

fn alias_match<'a>(options: &'a [SelectOption], target: &str) -> Option<&'a SelectOption> {
    let lowered = target.to_lowercase();
    let text_contains = |opt: &SelectOption, needles: &[&str]| {
        let text = opt.text.to_lowercase();
        needles.iter().any(|needle| text.contains(needle))
    };

    if lowered == "ca" {
        if let Some(opt) = options.iter().find(|opt| {
            opt.text.to_lowercase().contains("california")
                || opt.value.to_lowercase().contains("california")
        }) {
            return Some(opt);
        }
    }
    if lowered.contains("5+") {
        if let Some(opt) = options
            .iter()
            .find(|opt| text_contains(opt, &["5+", "5-", "senior"]))
        {
            return Some(opt);
        }
    }
    if lowered.contains("citizen") {
        return options
            .iter()
            .find(|opt| text_contains(opt, &["citizen", "authorized", "yes"]));
    }
    None
}

/// Pick the option for `target`: case-insensitive exact value/text match,
/// then an option whose text or value contains the target, then the
/// state, seniority and work-authorization aliases.
pub(crate) fn resolve_option<'a>(
    options: &'a [SelectOption],
    target: &str,
) -> Option<(&'a SelectOption, OptionMatch)> {
    let lowered = target.to_lowercase();
    if let Some(opt) = options.iter().find(|opt| {
        opt.value.to_lowercase() == lowered || opt.text.to_lowercase() == lowered
    }) {
        return Some((opt, OptionMatch::Exact));
    }
    if let Some(opt) = options.iter().find(|opt| {
        opt.text.to_lowercase().contains(&lowered) || opt.value.to_lowercase().contains(&lowered)
    }) {
        return Some((opt, OptionMatch::Substring));
    }
    alias_match(options, target).map(|opt| (opt, OptionMatch::Alias))
}

/// Select the option resolved for `target` and verify the select took it.
pub(crate) fn fill_select(dom: &dyn DomWriter, node: NodeId, target: &str) -> DomResult<bool> {
    let options = dom.options(node)?;
    let Some((option, kind)) = resolve_option(&options, target) else {
        debug!(%node, target, "no matching option");
        return Ok(false);
    };
    debug!(%node, option = %option.text, kind = kind.as_str(), "resolved select option");
    dom.set_value(node, &option.value)?;
    dispatch_change_events(dom, node)?;
    Ok(dom.value(node)? == option.value)
}
