//! Page orchestration.
//!
//! [`Page`] is the central type: parse a documentation page, enhance it, poke
//! at it headlessly, serialize it back out. Enhancement runs the three passes
//! once, synchronously, in a fixed order (anchors, highlighter, sections),
//! the same single page-ready hook the rendered page uses. The passes are
//! independent and share no state.

use std::fs;
use std::path::Path;

use crate::dom::{Dom, Selector, serialize};
use crate::error::Result;
use crate::highlight::{self, Engine};
use crate::nav::{self, AnchorBinding, ScrollRequest};
use crate::sections::{self, Section};

/// Knobs for an enhancement run.
#[derive(Debug, Clone)]
pub struct EnhanceOptions {
    /// Highlighting engine.
    pub engine: Engine,
    /// Selector for code blocks.
    pub code_selector: String,
    /// Selector for section headers.
    pub section_selector: String,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            code_selector: "pre code".to_string(),
            section_selector: sections::SECTION_SELECTOR.to_string(),
        }
    }
}

impl EnhanceOptions {
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }
}

/// What an enhancement run did.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct EnhanceReport {
    /// Anchor-style links bound.
    pub anchors_bound: usize,
    /// Bound fragments with no matching element id at enhance time.
    pub unresolved_anchors: Vec<String>,
    /// Code blocks rewritten.
    pub code_blocks: usize,
    /// Sections initialized.
    pub sections: usize,
}

/// A parsed documentation page.
pub struct Page {
    dom: Dom,
    anchors: Vec<AnchorBinding>,
    sections: Vec<Section>,
}

impl Page {
    /// Parse a page. No bindings exist until [`Page::enhance`] runs.
    pub fn parse(html: &str) -> Self {
        Self {
            dom: Dom::parse(html),
            anchors: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Run the enhancement passes.
    pub fn enhance(&mut self, options: &EnhanceOptions) -> Result<EnhanceReport> {
        self.anchors = nav::bind_anchors(&self.dom)?;
        let unresolved_anchors = nav::unresolved_fragments(&self.dom, &self.anchors);

        let code_selector = Selector::parse(&options.code_selector)?;
        let code_blocks = highlight::highlight_blocks(&mut self.dom, &code_selector, options.engine);

        let section_selector = Selector::parse(&options.section_selector)?;
        self.sections = sections::init_sections(&mut self.dom, &section_selector)?;

        Ok(EnhanceReport {
            anchors_bound: self.anchors.len(),
            unresolved_anchors,
            code_blocks,
            sections: self.sections.len(),
        })
    }

    /// The underlying DOM.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Bound anchor links, in document order.
    pub fn anchors(&self) -> &[AnchorBinding] {
        &self.anchors
    }

    /// Initialized sections, in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Click the nth bound anchor link.
    ///
    /// Default navigation never happens; the return value is the scroll the
    /// viewport should perform, or `None` for a dangling fragment or an index
    /// out of range.
    pub fn click_anchor(&self, index: usize) -> Option<ScrollRequest> {
        let binding = self.anchors.get(index)?;
        nav::click(&self.dom, binding)
    }

    /// Click the nth section header. Returns the new expanded state, or
    /// `None` for an index out of range.
    pub fn click_header(&mut self, index: usize) -> Option<bool> {
        let section = *self.sections.get(index)?;
        Some(sections::toggle(&mut self.dom, &section))
    }

    /// Check whether the nth section is expanded.
    pub fn section_expanded(&self, index: usize) -> Option<bool> {
        let section = self.sections.get(index)?;
        Some(sections::is_expanded(&self.dom, section))
    }

    /// Serialize the page back to HTML.
    pub fn to_html(&self) -> String {
        serialize(&self.dom)
    }
}

/// Enhance an HTML string with the given options.
pub fn enhance_str(html: &str, options: &EnhanceOptions) -> Result<String> {
    let mut page = Page::parse(html);
    page.enhance(options)?;
    Ok(page.to_html())
}

/// Enhance a file on disk, writing the result to `output`.
pub fn enhance_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &EnhanceOptions,
) -> Result<EnhanceReport> {
    let bytes = fs::read(input)?;
    let html = String::from_utf8(bytes)?;

    let mut page = Page::parse(&html);
    let report = page.enhance(options)?;

    fs::write(output, page.to_html())?;
    Ok(report)
}
