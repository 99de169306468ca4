//! In-page anchor navigation.
//!
//! At enhance time every anchor-style link (`a[href^="#"]`) is collected into
//! a binding, in document order. Clicking a binding never falls through to
//! default navigation; it resolves the fragment against element ids at click
//! time and yields a [`ScrollRequest`] when a target exists. A dangling
//! fragment is a silent no-op. Links added to the tree after binding are not
//! bound.

use crate::dom::{Dom, NodeId, Selector};
use crate::error::Result;

/// How the viewport travels to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// The outcome of clicking a bound anchor link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Element the viewport should travel to.
    pub target: NodeId,
    pub behavior: ScrollBehavior,
}

/// A bound anchor link.
#[derive(Debug, Clone)]
pub struct AnchorBinding {
    /// The link element.
    pub link: NodeId,
    /// Fragment identifier, without the leading `#`.
    pub fragment: String,
}

/// Default selector for anchor-style links.
pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// Collect bindings for every anchor-style link currently in the page.
pub fn bind_anchors(dom: &Dom) -> Result<Vec<AnchorBinding>> {
    let selector = Selector::parse(ANCHOR_SELECTOR)?;
    let bindings = selector
        .select_all(dom)
        .into_iter()
        .filter_map(|link| {
            let href = dom.get_attr(link, "href")?;
            let fragment = href.strip_prefix('#')?;
            Some(AnchorBinding {
                link,
                fragment: fragment.to_string(),
            })
        })
        .collect();
    Ok(bindings)
}

/// Resolve a click on a binding.
///
/// Resolution happens now, not at bind time: an id added to the page after
/// binding is honored. An empty fragment (`href="#"`) has no target.
pub fn click(dom: &Dom, binding: &AnchorBinding) -> Option<ScrollRequest> {
    if binding.fragment.is_empty() {
        return None;
    }
    dom.get_by_id(&binding.fragment).map(|target| ScrollRequest {
        target,
        behavior: ScrollBehavior::Smooth,
    })
}

/// Fragments with no matching element id, for dead-link reporting.
pub fn unresolved_fragments(dom: &Dom, bindings: &[AnchorBinding]) -> Vec<String> {
    bindings
        .iter()
        .filter(|b| dom.get_by_id(&b.fragment).is_none())
        .map(|b| b.fragment.clone())
        .collect()
}
