//! Code block highlighting.
//!
//! Two engines wrap keyword/string/comment occurrences in marker spans that
//! the page's stylesheet colors:
//!
//! - [`Engine::Spans`] (default): a single-pass tokenizer producing typed
//!   spans rendered as structural DOM children. Markup-safe and idempotent.
//! - [`Engine::Naive`]: three sequential regex substitutions over the block's
//!   serialized inner markup, kept for output compatibility with the page's
//!   previous script. Later passes see the markup inserted by earlier ones;
//!   the resulting interference is documented behavior, not a bug to fix
//!   here.

use std::fmt;
use std::str::FromStr;

use crate::dom::{Dom, Selector};

pub mod naive;
pub mod spans;

pub use spans::{Token, TokenKind, tokenize};

/// Reserved words and literals recognized by both engines.
pub const KEYWORDS: &[&str] = &[
    "const", "let", "var", "function", "return", "if", "else", "for", "while", "try", "catch",
    "import", "export", "class", "new", "this", "async", "await", "true", "false", "null",
];

/// Marker classes the page stylesheet is expected to provide.
pub const KEYWORD_CLASS: &str = "keyword";
pub const STRING_CLASS: &str = "string";
pub const COMMENT_CLASS: &str = "comment";

/// Highlighting engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    /// Regex substitution passes over serialized markup.
    Naive,
    /// Tokenizer producing typed spans.
    #[default]
    Spans,
}

impl Engine {
    /// Highlight a single code block in place.
    pub fn apply(self, dom: &mut Dom, block: crate::dom::NodeId) {
        match self {
            Engine::Naive => naive::apply(dom, block),
            Engine::Spans => spans::apply(dom, block),
        }
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "naive" => Ok(Engine::Naive),
            "spans" => Ok(Engine::Spans),
            other => Err(format!("unknown engine '{other}' (expected naive or spans)")),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Naive => f.write_str("naive"),
            Engine::Spans => f.write_str("spans"),
        }
    }
}

/// Highlight every element matching the code block selector.
///
/// Returns the number of blocks rewritten.
pub fn highlight_blocks(dom: &mut Dom, selector: &Selector, engine: Engine) -> usize {
    let blocks = selector.select_all(dom);
    for &block in &blocks {
        engine.apply(dom, block);
    }
    blocks.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_from_str() {
        assert_eq!("naive".parse::<Engine>().unwrap(), Engine::Naive);
        assert_eq!("spans".parse::<Engine>().unwrap(), Engine::Spans);
        assert!("fancy".parse::<Engine>().is_err());
    }

    #[test]
    fn test_highlight_blocks_counts_matches() {
        let mut dom = Dom::parse(
            "<pre><code>const a = 1;</code></pre><pre><code>let b = 2;</code></pre><p>const</p>",
        );
        let selector = Selector::parse("pre code").unwrap();
        let count = highlight_blocks(&mut dom, &selector, Engine::Spans);
        assert_eq!(count, 2);

        // The paragraph is not a code block and stays untouched
        let p = dom.find_by_tag("p").unwrap();
        let children: Vec<_> = dom.children(p).collect();
        assert_eq!(children.len(), 1);
        assert!(dom.is_text(children[0]));
    }
}
