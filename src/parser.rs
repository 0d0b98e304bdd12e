//! Hand-rolled tag parser.
//!
//! Supports `<tag attr="value">`, `</tag>`, and self-closing `<tag .../>`
//! with double-quoted attribute values. Processing instructions (`<?...?>`)
//! and comment-like constructs (`<!--...`) are skipped without entering the
//! tree. It deliberately does NOT handle namespaces, entity references, or
//! CDATA.
//!
//! The parser is the only component that can fail: structural problems
//! (unclosed brackets, mismatched closing tags) are [`ParseError`]s.
//! Everything semantic is left to the validator.

use memchr::memchr;

use crate::error::{ParseError, Result};
use crate::node::MarkupNode;

/// Tag of the synthetic document root produced by [`parse`].
pub const DOCUMENT_TAG: &str = "#document";

/// Parse markup text into a tree rooted at a synthetic document node.
///
/// The returned node is tagged [`DOCUMENT_TAG`] and holds all top-level
/// content. Whitespace-only text runs between tags are dropped; other text
/// runs are kept untrimmed.
///
/// # Examples
///
/// ```
/// use voxml::parse;
///
/// let doc = parse(r#"<speak>Hello <break time="500ms"/> world</speak>"#).unwrap();
/// let speak = doc.children().next().unwrap();
/// assert_eq!(speak.tag, "speak");
/// assert_eq!(speak.element_count(), 2);
/// ```
pub fn parse(input: &str) -> Result<MarkupNode> {
    let bytes = input.as_bytes();
    // Stack of currently-open nodes, seeded with the synthetic root. Nodes
    // are owned here and folded into their parent when they close.
    let mut stack: Vec<MarkupNode> = vec![MarkupNode::new(DOCUMENT_TAG)];
    let mut pos = 0;

    while pos < bytes.len() {
        let Some(lt) = memchr(b'<', &bytes[pos..]).map(|rel| pos + rel) else {
            flush_text(&mut stack, &input[pos..]);
            break;
        };
        flush_text(&mut stack, &input[pos..lt]);

        let gt = memchr(b'>', &bytes[lt + 1..])
            .map(|rel| lt + 1 + rel)
            .ok_or(ParseError::UnclosedBracket)?;
        let inside = input[lt + 1..gt].trim();
        if inside.is_empty() {
            return Err(ParseError::EmptyTag);
        }

        if inside.starts_with('?') || inside.starts_with("!--") {
            // Processing instruction or comment: skip verbatim.
            pos = gt + 1;
            continue;
        }

        if let Some(rest) = inside.strip_prefix('/') {
            close_element(&mut stack, rest.trim())?;
        } else {
            open_element(&mut stack, inside);
        }
        pos = gt + 1;
    }

    if stack.len() != 1 {
        return Err(ParseError::UnclosedAtEnd(stack.len() - 1));
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Push pending text onto the innermost open node, dropping whitespace-only
/// runs. The text is stored untrimmed; trimming is a flattening concern.
fn flush_text(stack: &mut [MarkupNode], text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(top) = stack.last_mut() {
        top.push_text(text);
    }
}

/// Handle a start or self-closing tag body (the text between `<` and `>`).
fn open_element(stack: &mut Vec<MarkupNode>, inside: &str) {
    let self_closing = inside.ends_with('/');
    let body = if self_closing {
        inside[..inside.len() - 1].trim()
    } else {
        inside
    };

    let node = match body.split_once(' ') {
        Some((tag, rest)) => {
            let mut node = MarkupNode::new(tag);
            parse_attrs(rest, &mut node);
            node
        }
        None => MarkupNode::new(body),
    };

    if self_closing {
        if let Some(top) = stack.last_mut() {
            top.push_child(node);
        }
    } else {
        // The node stays on the open stack until its closing tag attaches
        // it to the parent.
        stack.push(node);
    }
}

/// Handle `</tag>`: the innermost open element must match exactly.
fn close_element(stack: &mut Vec<MarkupNode>, tag: &str) -> Result<()> {
    // The synthetic root is never closable by input, so a matching top means
    // the stack holds at least two entries.
    if stack.len() < 2 || stack.last().is_none_or(|top| top.tag != tag) {
        return Err(ParseError::MismatchedClosingTag(tag.to_string()));
    }
    let closed = stack.pop().unwrap_or_default();
    if let Some(top) = stack.last_mut() {
        top.push_child(closed);
    }
    Ok(())
}

/// Parse `key="value"` pairs into the node's attribute map.
///
/// Recovery is deliberately lenient: at the first malformed point (missing
/// `=`, unquoted value) attribute parsing stops silently and whatever was
/// parsed so far is kept.
fn parse_attrs(input: &str, node: &mut MarkupNode) {
    let mut chars = input.char_indices().peekable();

    loop {
        // Skip leading whitespace.
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        let Some(&(key_start, _)) = chars.peek() else {
            break;
        };

        // Attribute name: alphanumerics plus `_`, `-`, `:`.
        let mut key_end = key_start;
        while let Some(&(i, c)) = chars.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | ':') {
                key_end = i + c.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let key = &input[key_start..key_end];

        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
        if chars.next_if(|&(_, c)| c == '=').is_none() {
            break;
        }
        while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some((quote, _)) = chars.next_if(|&(_, c)| c == '"') else {
            break;
        };
        let value_start = quote + 1;
        let mut value_end = None;
        for (i, c) in chars.by_ref() {
            if c == '"' {
                value_end = Some(i);
                break;
            }
        }
        match value_end {
            Some(end) => {
                node.attributes
                    .insert(key.to_string(), input[value_start..end].to_string());
            }
            None => {
                // Unterminated value: keep what we have, minus this pair.
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs_of(input: &str) -> Vec<(String, String)> {
        let mut node = MarkupNode::new("x");
        parse_attrs(input, &mut node);
        node.attributes.into_iter().collect()
    }

    #[test]
    fn test_attrs_basic() {
        assert_eq!(
            attrs_of(r#"rate="slow" pitch="low""#),
            vec![
                ("pitch".to_string(), "low".to_string()),
                ("rate".to_string(), "slow".to_string()),
            ]
        );
    }

    #[test]
    fn test_attrs_stop_at_unquoted_value() {
        // Lenient recovery: the well-formed pair before the malformed one
        // survives, the rest is dropped.
        assert_eq!(
            attrs_of(r#"time="500ms" strength=strong level="x""#),
            vec![("time".to_string(), "500ms".to_string())]
        );
    }

    #[test]
    fn test_attrs_stop_at_missing_equals() {
        assert_eq!(attrs_of(r#"alias "NYC""#), vec![]);
    }

    #[test]
    fn test_attrs_unterminated_value_dropped() {
        assert_eq!(
            attrs_of(r#"a="one" b="two"#),
            vec![("a".to_string(), "one".to_string())]
        );
    }

    #[test]
    fn test_attrs_empty_value() {
        assert_eq!(attrs_of(r#"alias="""#), vec![("alias".to_string(), String::new())]);
    }

    #[test]
    fn test_skip_processing_instruction_and_comment() {
        let doc = parse("<?xml version=\"1.0\"?><speak>hi<!-- note --></speak>").unwrap();
        assert_eq!(doc.children().count(), 1);
        let speak = doc.children().next().unwrap();
        assert_eq!(speak.direct_text(), "hi");
    }

    #[test]
    fn test_whitespace_only_runs_dropped() {
        let doc = parse("<speak>\n  <p>one</p>\n  \n</speak>").unwrap();
        let speak = doc.children().next().unwrap();
        // Only the <p> child remains; the newline runs around it are gone.
        assert_eq!(speak.content.len(), 1);
    }

    #[test]
    fn test_text_kept_untrimmed() {
        let doc = parse("<speak>  hello  </speak>").unwrap();
        let speak = doc.children().next().unwrap();
        assert_eq!(speak.content.len(), 1);
        assert!(matches!(
            &speak.content[0],
            crate::node::Content::Text(t) if t == "  hello  "
        ));
    }
}
