//! Tokenizing highlighting engine.
//!
//! A single pass over the code block's text produces a sequence of typed
//! spans that concatenate back to the input exactly. The spans are rendered
//! as structural DOM children, so markup-significant characters are escaped
//! at serialization time and nothing is ever re-wrapped.

use memchr::memchr;

use crate::dom::{Attribute, Dom, NodeId, attribute_name, element_name};

use super::{COMMENT_CLASS, KEYWORD_CLASS, KEYWORDS, STRING_CLASS};

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Str,
    Comment,
    Plain,
}

impl TokenKind {
    /// Marker class for this kind, or `None` for plain text.
    pub fn marker_class(self) -> Option<&'static str> {
        match self {
            TokenKind::Keyword => Some(KEYWORD_CLASS),
            TokenKind::Str => Some(STRING_CLASS),
            TokenKind::Comment => Some(COMMENT_CLASS),
            TokenKind::Plain => None,
        }
    }
}

/// A typed slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Tokenize source text into keyword/string/comment/plain spans.
///
/// Invariant: the token texts concatenate back to `src` exactly.
///
/// - `//` starts a comment running to the end of the line, newline excluded.
/// - A quote starts a string ended by the same quote on the same line, no
///   escape handling; an unterminated quote is plain text.
/// - Words are maximal `[A-Za-z0-9_$]` runs matched case-sensitively against
///   the keyword list.
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    // Flush the pending plain run up to `end`
    fn flush<'a>(tokens: &mut Vec<Token<'a>>, src: &'a str, start: usize, end: usize) {
        if start < end {
            tokens.push(Token {
                kind: TokenKind::Plain,
                text: &src[start..end],
            });
        }
    }

    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            flush(&mut tokens, src, plain_start, i);
            let end = memchr(b'\n', &bytes[i..])
                .map(|p| i + p)
                .unwrap_or(bytes.len());
            tokens.push(Token {
                kind: TokenKind::Comment,
                text: &src[i..end],
            });
            i = end;
            plain_start = i;
        } else if b == b'"' || b == b'\'' {
            let line_end = memchr(b'\n', &bytes[i + 1..])
                .map(|p| i + 1 + p)
                .unwrap_or(bytes.len());
            match memchr(b, &bytes[i + 1..line_end]) {
                Some(p) => {
                    let end = i + 1 + p + 1;
                    flush(&mut tokens, src, plain_start, i);
                    tokens.push(Token {
                        kind: TokenKind::Str,
                        text: &src[i..end],
                    });
                    i = end;
                    plain_start = i;
                }
                // Unterminated quote stays plain
                None => i += 1,
            }
        } else if is_word_byte(b) {
            let start = i;
            while i < bytes.len() && is_word_byte(bytes[i]) {
                i += 1;
            }
            let word = &src[start..i];
            if KEYWORDS.contains(&word) {
                flush(&mut tokens, src, plain_start, start);
                tokens.push(Token {
                    kind: TokenKind::Keyword,
                    text: word,
                });
                plain_start = i;
            }
        } else {
            i += 1;
        }
    }

    flush(&mut tokens, src, plain_start, bytes.len());
    tokens
}

/// Highlight a code block in place.
///
/// Replaces the block's children with marker spans and text nodes built from
/// the block's text content. Applying twice is a no-op beyond the first run.
pub fn apply(dom: &mut Dom, block: NodeId) {
    let text = dom.collect_text(block);
    let tokens = tokenize(&text);

    dom.clear_children(block);
    for token in &tokens {
        match token.kind.marker_class() {
            None => dom.append_text(block, token.text),
            Some(class) => {
                let span = dom.create_element(
                    element_name("span"),
                    vec![Attribute {
                        name: attribute_name("class"),
                        value: class.to_string(),
                    }],
                );
                let text_node = dom.create_text(token.text.to_string());
                dom.append(span, text_node);
                dom.append(block, span);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::dom::inner_html;

    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, &str)> {
        tokenize(src).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_keyword_and_comment() {
        assert_eq!(
            kinds("const x = 1; // keep"),
            vec![
                (TokenKind::Keyword, "const"),
                (TokenKind::Plain, " x = 1; "),
                (TokenKind::Comment, "// keep"),
            ]
        );
    }

    #[test]
    fn test_string_token() {
        assert_eq!(
            kinds(r#"greet("hello")"#),
            vec![
                (TokenKind::Plain, "greet("),
                (TokenKind::Str, "\"hello\""),
                (TokenKind::Plain, ")"),
            ]
        );
    }

    #[test]
    fn test_keyword_inside_string_not_wrapped() {
        assert_eq!(
            kinds(r#"s = "const""#),
            vec![(TokenKind::Plain, "s = "), (TokenKind::Str, "\"const\"")]
        );
    }

    #[test]
    fn test_keyword_inside_comment_not_wrapped() {
        assert_eq!(
            kinds("x // return later"),
            vec![
                (TokenKind::Plain, "x "),
                (TokenKind::Comment, "// return later"),
            ]
        );
    }

    #[test]
    fn test_comment_excludes_newline() {
        assert_eq!(
            kinds("a // one\nlet b"),
            vec![
                (TokenKind::Plain, "a "),
                (TokenKind::Comment, "// one"),
                (TokenKind::Plain, "\n"),
                (TokenKind::Keyword, "let"),
                (TokenKind::Plain, " b"),
            ]
        );
    }

    #[test]
    fn test_whole_word_only() {
        assert_eq!(kinds("iffy"), vec![(TokenKind::Plain, "iffy")]);
        assert_eq!(kinds("classes"), vec![(TokenKind::Plain, "classes")]);
        assert_eq!(
            kinds("if(x)"),
            vec![
                (TokenKind::Keyword, "if"),
                (TokenKind::Plain, "(x)"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_plain() {
        assert_eq!(kinds("x = \"oops"), vec![(TokenKind::Plain, "x = \"oops")]);
        // ...even when a quote appears on a later line
        assert_eq!(
            kinds("x = \"a\nb\""),
            vec![(TokenKind::Plain, "x = \"a\nb\"")]
        );
    }

    #[test]
    fn test_single_quotes() {
        assert_eq!(
            kinds("import x from 'mod'"),
            vec![
                (TokenKind::Keyword, "import"),
                (TokenKind::Plain, " x from "),
                (TokenKind::Str, "'mod'"),
            ]
        );
    }

    #[test]
    fn test_apply_builds_marker_spans() {
        let mut dom = Dom::parse("<pre><code>const x = \"hello\" // keep</code></pre>");
        let code = dom.find_by_tag("code").unwrap();

        apply(&mut dom, code);

        let markup = inner_html(&dom, code);
        assert_eq!(
            markup,
            "<span class=\"keyword\">const</span> x = \
             <span class=\"string\">\"hello\"</span> \
             <span class=\"comment\">// keep</span>"
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut dom = Dom::parse("<pre><code>let a = 'b' // c</code></pre>");
        let code = dom.find_by_tag("code").unwrap();

        apply(&mut dom, code);
        let once = inner_html(&dom, code);

        apply(&mut dom, code);
        let twice = inner_html(&dom, code);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_escapes_markup_characters() {
        let mut dom = Dom::parse("<pre><code>a &lt; b // cmp</code></pre>");
        let code = dom.find_by_tag("code").unwrap();

        apply(&mut dom, code);

        let markup = inner_html(&dom, code);
        assert_eq!(markup, "a &lt; b <span class=\"comment\">// cmp</span>");
    }

    proptest! {
        #[test]
        fn tokens_concatenate_to_input(src in any::<String>()) {
            let tokens = tokenize(&src);
            let joined: String = tokens.iter().map(|t| t.text).collect();
            prop_assert_eq!(joined, src);
        }

        #[test]
        fn no_empty_tokens(src in any::<String>()) {
            for token in tokenize(&src) {
                prop_assert!(!token.text.is_empty());
            }
        }
    }
}
