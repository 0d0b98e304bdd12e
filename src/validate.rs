//! Structural validation.
//!
//! Walks an entire parsed tree and collects every violation of the schema's
//! tag/attribute contract. Validation never aborts: traversal continues past
//! unknown tags, past nodes with bad attributes, and even past the depth
//! guard, so one run reports the complete picture. An empty issue list means
//! the tree is acceptable for flattening, but flattening does not require it.

use std::fmt;

use crate::node::MarkupNode;
use crate::parser::DOCUMENT_TAG;
use crate::schema::{Schema, strength_seconds};

/// One recorded, non-fatal violation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ValidationIssue {
    /// Tag of the offending element.
    pub tag: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationIssue {
    fn new(tag: &str, message: impl Into<String>) -> Self {
        Self { tag: tag.to_string(), message: message.into() }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>: {}", self.tag, self.message)
    }
}

/// Validate a tree against a schema, returning every issue found in document
/// order. The input may be the synthetic document node produced by
/// [`parse`](crate::parse) or a root element directly.
pub fn validate(root: &MarkupNode, schema: &Schema) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // Unwrap the synthetic document container if present: the root check and
    // depth guard apply to the actual top-level element(s).
    let top_level: Vec<&MarkupNode> = if root.tag == DOCUMENT_TAG {
        root.children().collect()
    } else {
        vec![root]
    };

    match top_level.first() {
        Some(first) if first.tag == schema.root_tag() => {}
        _ => {
            issues.push(ValidationIssue::new(
                schema.root_tag(),
                format!("root element must be <{}>", schema.root_tag()),
            ));
        }
    }

    // Explicit work stack instead of native recursion: adversarial nesting
    // must not exhaust the call stack. Children are pushed in reverse so
    // issues come out in document order.
    let mut work: Vec<(&MarkupNode, usize)> =
        top_level.iter().rev().map(|node| (*node, 0)).collect();

    while let Some((node, depth)) = work.pop() {
        check_node(node, depth, schema, &mut issues);
        for child in node.children().collect::<Vec<_>>().into_iter().rev() {
            work.push((child, depth + 1));
        }
    }

    issues
}

/// Collect every issue for a single node. Each rule reports independently.
fn check_node(node: &MarkupNode, depth: usize, schema: &Schema, issues: &mut Vec<ValidationIssue>) {
    if depth > schema.max_depth() {
        issues.push(ValidationIssue::new(
            &node.tag,
            format!("nesting depth {depth} exceeds the limit of {}", schema.max_depth()),
        ));
    }

    if !schema.is_allowed_tag(&node.tag) {
        issues.push(ValidationIssue::new(&node.tag, "unknown tag"));
    }

    // Attribute allow-list check. A tag with no registered list is
    // unconstrained; that asymmetry is intentional.
    if let Some(allowed) = schema.registered_attrs(&node.tag) {
        for name in node.attributes.keys() {
            if !allowed.contains(name) {
                issues.push(ValidationIssue::new(
                    &node.tag,
                    format!("unsupported attribute '{name}'"),
                ));
            }
        }
    }

    match node.tag.as_str() {
        "break" => check_break(node, issues),
        "sub" => {
            if node.attr("alias").is_none_or(|alias| alias.trim().is_empty()) {
                issues.push(ValidationIssue::new(&node.tag, "requires a non-empty 'alias'"));
            }
        }
        "say-as" => {
            if node.attr("interpret-as").is_none() {
                issues.push(ValidationIssue::new(&node.tag, "requires 'interpret-as'"));
            }
        }
        _ => {}
    }
}

fn check_break(node: &MarkupNode, issues: &mut Vec<ValidationIssue>) {
    let time = node.attr("time");
    let strength = node.attr("strength");

    if time.is_some() && strength.is_some() {
        issues.push(ValidationIssue::new(
            &node.tag,
            "must not specify both 'time' and 'strength'",
        ));
    }
    if time.is_none() && strength.is_none() {
        issues.push(ValidationIssue::new(
            &node.tag,
            "requires either 'time' or 'strength'",
        ));
    }

    if let Some(time) = time {
        let magnitude = time
            .strip_suffix("ms")
            .or_else(|| time.strip_suffix('s'));
        match magnitude {
            None => {
                issues.push(ValidationIssue::new(&node.tag, "'time' must end in 'ms' or 's'"));
            }
            Some(magnitude) => {
                if magnitude.trim().parse::<f64>().is_err() {
                    issues.push(ValidationIssue::new(&node.tag, "'time' must be numeric"));
                }
            }
        }
    }

    if let Some(strength) = strength
        && strength_seconds(strength).is_none()
    {
        issues.push(ValidationIssue::new(
            &node.tag,
            format!("unknown break strength '{strength}'"),
        ));
    }
}
