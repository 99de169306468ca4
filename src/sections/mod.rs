//! Collapsible endpoint sections.
//!
//! Each section header is paired with its next element sibling, the detail
//! block. Initialization expands exactly the first pair and collapses the
//! rest; clicking a header toggles its own pair and nothing else. Expansion
//! state lives in the detail's inline `display` and the header's `active`
//! class, matching what the page stylesheet keys on.

use crate::dom::{Dom, NodeId, Selector};
use crate::error::{Error, Result};

/// Marker class for an expanded section's header.
pub const ACTIVE_CLASS: &str = "active";

/// Default selector for section headers.
pub const SECTION_SELECTOR: &str = ".endpoint h3";

/// A header/detail pair.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub header: NodeId,
    pub detail: NodeId,
}

/// Collect header/detail pairs and force the initial state: first section
/// expanded, all others collapsed, regardless of prior inline state.
///
/// A header with no following element sibling violates the structural
/// pattern the page is expected to follow and fails the pass.
pub fn init_sections(dom: &mut Dom, selector: &Selector) -> Result<Vec<Section>> {
    let headers = selector.select_all(dom);

    let mut sections = Vec::with_capacity(headers.len());
    for header in headers {
        let detail = dom.next_element_sibling(header).ok_or_else(|| {
            Error::SectionStructure(dom.collect_text(header).trim().to_string())
        })?;
        sections.push(Section { header, detail });
    }

    for (index, section) in sections.iter().enumerate() {
        if index == 0 {
            dom.add_class(section.header, ACTIVE_CLASS);
            dom.set_inline_display(section.detail, "block");
        } else {
            dom.remove_class(section.header, ACTIVE_CLASS);
            dom.set_inline_display(section.detail, "none");
        }
    }

    Ok(sections)
}

/// Toggle a section between collapsed and expanded.
///
/// Returns the new expanded state. Collapsed means the detail's inline
/// display is unset or `none`, the same test the rendered page makes.
pub fn toggle(dom: &mut Dom, section: &Section) -> bool {
    let collapsed = match dom.inline_display(section.detail) {
        None => true,
        Some(display) => display == "none",
    };

    if collapsed {
        dom.set_inline_display(section.detail, "block");
        dom.add_class(section.header, ACTIVE_CLASS);
    } else {
        dom.set_inline_display(section.detail, "none");
        dom.remove_class(section.header, ACTIVE_CLASS);
    }
    collapsed
}

/// Check whether a section is currently expanded.
pub fn is_expanded(dom: &Dom, section: &Section) -> bool {
    dom.inline_display(section.detail)
        .is_some_and(|display| display != "none")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="endpoint">
            <h3>GET /api/product</h3>
            <div class="details">one</div>
        </div>
        <div class="endpoint">
            <h3>GET /api/position</h3>
            <div class="details">two</div>
        </div>
        <div class="endpoint">
            <h3>POST /api/tracking</h3>
            <div class="details">three</div>
        </div>
    "#;

    fn setup() -> (Dom, Vec<Section>) {
        let mut dom = Dom::parse(PAGE);
        let selector = Selector::parse(SECTION_SELECTOR).unwrap();
        let sections = init_sections(&mut dom, &selector).unwrap();
        (dom, sections)
    }

    #[test]
    fn test_init_first_expanded_rest_collapsed() {
        let (dom, sections) = setup();
        assert_eq!(sections.len(), 3);

        assert!(is_expanded(&dom, &sections[0]));
        assert!(dom.has_class(sections[0].header, ACTIVE_CLASS));

        for section in &sections[1..] {
            assert!(!is_expanded(&dom, section));
            assert!(!dom.has_class(section.header, ACTIVE_CLASS));
            assert_eq!(
                dom.inline_display(section.detail),
                Some("none".to_string())
            );
        }
    }

    #[test]
    fn test_init_overrides_prior_inline_state() {
        let mut dom = Dom::parse(
            r#"
            <div class="endpoint"><h3 class="active">A</h3><div style="display: none">a</div></div>
            <div class="endpoint"><h3 class="active">B</h3><div style="display: block">b</div></div>
        "#,
        );
        let selector = Selector::parse(SECTION_SELECTOR).unwrap();
        let sections = init_sections(&mut dom, &selector).unwrap();

        assert!(is_expanded(&dom, &sections[0]));
        assert!(!is_expanded(&dom, &sections[1]));
        assert!(!dom.has_class(sections[1].header, ACTIVE_CLASS));
    }

    #[test]
    fn test_toggle_cycles_state() {
        let (mut dom, sections) = setup();

        // Expand the second section
        assert!(toggle(&mut dom, &sections[1]));
        assert!(is_expanded(&dom, &sections[1]));
        assert!(dom.has_class(sections[1].header, ACTIVE_CLASS));

        // Collapse it again
        assert!(!toggle(&mut dom, &sections[1]));
        assert!(!is_expanded(&dom, &sections[1]));
        assert!(!dom.has_class(sections[1].header, ACTIVE_CLASS));

        // First section was never affected
        assert!(is_expanded(&dom, &sections[0]));
        assert!(dom.has_class(sections[0].header, ACTIVE_CLASS));
    }

    #[test]
    fn test_toggle_first_section_collapses() {
        let (mut dom, sections) = setup();

        assert!(!toggle(&mut dom, &sections[0]));
        assert!(!is_expanded(&dom, &sections[0]));
        assert!(!dom.has_class(sections[0].header, ACTIVE_CLASS));
    }

    #[test]
    fn test_header_without_detail_fails() {
        let mut dom = Dom::parse(r#"<div class="endpoint"><h3>Orphan</h3></div>"#);
        let selector = Selector::parse(SECTION_SELECTOR).unwrap();

        let err = init_sections(&mut dom, &selector).unwrap_err();
        assert!(matches!(err, Error::SectionStructure(ref h) if h == "Orphan"));
    }

    #[test]
    fn test_unset_display_counts_as_collapsed() {
        let mut dom = Dom::parse(r#"<div class="endpoint"><h3>A</h3><div>a</div></div>"#);
        let h3 = dom.find_by_tag("h3").unwrap();
        let detail = dom.next_element_sibling(h3).unwrap();
        let section = Section { header: h3, detail };

        // No inline display set: first click expands
        assert!(toggle(&mut dom, &section));
        assert_eq!(dom.inline_display(detail), Some("block".to_string()));
    }
}
