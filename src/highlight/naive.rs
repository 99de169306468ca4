//! Naive regex highlighting engine.
//!
//! Three sequential substitution passes over the code block's serialized
//! inner markup: keywords, then quoted strings, then line comments. Each pass
//! operates on the string the previous pass produced, so the string pass
//! matches the attribute quotes of keyword spans and a keyword inside a
//! string or comment ends up double-wrapped. Running the engine twice wraps
//! keywords found inside the previous run's marker tags. None of this is
//! corrected; callers wanting markup-safe output use the spans engine.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::{Dom, NodeId, inner_html};

use super::{COMMENT_CLASS, KEYWORD_CLASS, KEYWORDS, STRING_CLASS};

static KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = KEYWORDS.join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("invalid keyword regex")
});

// Single-line, no escape handling. The regex crate has no backreferences, so
// the quote pairing is spelled out as an alternation.
static STRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[^"\n]*"|'[^'\n]*'"#).expect("invalid string regex"));

static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(//[^\n]*)(?:\n|$)").expect("invalid comment regex"));

/// Run the three substitution passes over a markup string.
pub fn highlight_markup(markup: &str) -> String {
    let keyword_rep = format!(r#"<span class="{KEYWORD_CLASS}">$0</span>"#);
    let string_rep = format!(r#"<span class="{STRING_CLASS}">$0</span>"#);
    // The comment pass consumes the line break and re-emits it, which appends
    // a newline even at end of input.
    let comment_rep = format!("<span class=\"{COMMENT_CLASS}\">$1</span>\n");

    let pass1 = KEYWORD_RE.replace_all(markup, keyword_rep.as_str());
    let pass2 = STRING_RE.replace_all(&pass1, string_rep.as_str());
    let pass3 = COMMENT_RE.replace_all(&pass2, comment_rep.as_str());
    pass3.into_owned()
}

/// Highlight a code block in place.
///
/// Serializes the block's children, rewrites the markup, re-parses it as a
/// fragment, and grafts the result back (innerHTML assignment semantics).
pub fn apply(dom: &mut Dom, block: NodeId) {
    let markup = inner_html(dom, block);
    let highlighted = highlight_markup(&markup);
    let fragment = Dom::parse_fragment(&highlighted);
    if let Some(body) = fragment.body() {
        dom.clear_children(block);
        dom.import_children(&fragment, body, block);
    }
}
