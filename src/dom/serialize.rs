//! HTML serialization for the arena DOM.
//!
//! Walks the tree and emits HTML text. Serialization is what the enhanced
//! page is written back out as, and `inner_html` feeds the naive highlighter
//! engine its substitution input.

use super::{Dom, NodeData, NodeId};

/// Elements with no content and no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is emitted raw, without entity escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize the whole document.
pub fn serialize(dom: &Dom) -> String {
    let mut out = String::new();
    for child in dom.children(dom.document()) {
        write_node(dom, child, false, &mut out);
    }
    out
}

/// Serialize the children of a node (innerHTML semantics).
pub fn inner_html(dom: &Dom, id: NodeId) -> String {
    let mut out = String::new();
    let raw = is_raw_text(dom, id);
    for child in dom.children(id) {
        write_node(dom, child, raw, &mut out);
    }
    out
}

fn is_raw_text(dom: &Dom, id: NodeId) -> bool {
    dom.tag_name(id)
        .is_some_and(|n| RAW_TEXT_ELEMENTS.contains(&n.as_ref()))
}

fn write_node(dom: &Dom, id: NodeId, raw_text: bool, out: &mut String) {
    let node = match dom.get(id) {
        Some(n) => n,
        None => return,
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, false, out);
            }
        }
        NodeData::Doctype { name, .. } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_html(text));
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in attrs {
                out.push(' ');
                out.push_str(attr.name.local.as_ref());
                out.push_str("=\"");
                out.push_str(&escape_attr(&attr.value));
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let raw = RAW_TEXT_ELEMENTS.contains(&tag);
            for child in dom.children(id) {
                write_node(dom, child, raw, out);
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

/// Escape text content.
///
/// Quote characters stay literal, as in browser innerHTML output; the naive
/// highlighter's string pass depends on seeing them.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an attribute value for double-quoted emission.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        // Quotes pass through untouched
        assert_eq!(escape_html(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn test_inner_html_roundtrip() {
        let dom = Dom::parse(r#"<pre><code>const x = "a &lt; b";</code></pre>"#);
        let code = dom.find_by_tag("code").unwrap();
        assert_eq!(inner_html(&dom, code), r#"const x = "a &lt; b";"#);
    }

    #[test]
    fn test_serialize_element_with_attrs() {
        let dom = Dom::parse(r#"<div id="main" class="a b"><p>hi</p></div>"#);
        let html = serialize(&dom);
        assert!(html.contains(r#"<div id="main" class="a b"><p>hi</p></div>"#));
    }

    #[test]
    fn test_serialize_void_element() {
        let dom = Dom::parse(r#"<p>a<br>b</p>"#);
        let html = serialize(&dom);
        assert!(html.contains("a<br>b"));
        assert!(!html.contains("</br>"));
    }

    #[test]
    fn test_serialize_doctype() {
        let dom = Dom::parse("<!DOCTYPE html><html><body></body></html>");
        let html = serialize(&dom);
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_raw_text_style_element() {
        let dom = Dom::parse("<style>a > b { color: red }</style>");
        let html = serialize(&dom);
        assert!(html.contains("a > b { color: red }"));
    }

    #[test]
    fn test_reparse_stability() {
        let src = r#"<!DOCTYPE html><html><head><title>t</title></head><body><div class="endpoint"><h3>GET /x</h3><div><pre><code>const a = 1;</code></pre></div></div></body></html>"#;
        let once = serialize(&Dom::parse(src));
        let twice = serialize(&Dom::parse(&once));
        assert_eq!(once, twice);
    }
}
