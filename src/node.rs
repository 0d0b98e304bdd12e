//! The markup tree model.
//!
//! A parsed document is a tree of [`MarkupNode`]s. Each node owns an ordered
//! list of [`Content`] items interleaving literal text runs with child
//! elements in source order, so "text before the first child" and "text after
//! a child" are the same thing: positions in the content list. Nothing holds
//! a back-reference, and no component mutates a tree after construction.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write;

/// One item in a node's content list: a literal text run or a child element.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A literal text run, stored untrimmed as it appeared in source.
    Text(String),
    /// A child element.
    Element(MarkupNode),
}

/// One element in the parsed markup tree.
///
/// # Examples
///
/// ```
/// use voxml::MarkupNode;
///
/// let node = MarkupNode::new("break").with_attr("time", "500ms");
/// assert_eq!(node.attr("time"), Some("500ms"));
/// assert_eq!(node.to_markup(), r#"<break time="500ms"/>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkupNode {
    /// Element name. Free-form at parse time; constrained to a vocabulary
    /// only by validation.
    pub tag: String,
    /// Attribute name → value. Keys are unique; insertion order is not
    /// significant, so a sorted map keeps serialization deterministic.
    pub attributes: BTreeMap<String, String>,
    /// Ordered text runs and child elements.
    pub content: Vec<Content>,
}

impl MarkupNode {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            content: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style text appender.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Content::Text(text.into()));
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.content.push(Content::Element(child));
        self
    }

    /// Append a text run to the content list.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.content.push(Content::Text(text.into()));
    }

    /// Append a child element to the content list.
    pub fn push_child(&mut self, child: MarkupNode) {
        self.content.push(Content::Element(child));
    }

    /// Look up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterate over child elements, skipping text runs.
    pub fn children(&self) -> impl Iterator<Item = &MarkupNode> {
        self.content.iter().filter_map(|item| match item {
            Content::Element(child) => Some(child),
            Content::Text(_) => None,
        })
    }

    /// The node's own text runs concatenated and trimmed, without recursing
    /// into child elements.
    pub fn direct_text(&self) -> String {
        let mut out = String::new();
        for item in &self.content {
            if let Content::Text(text) = item {
                out.push_str(text);
            }
        }
        out.trim().to_string()
    }

    /// Total number of elements in this subtree, including this node.
    pub fn element_count(&self) -> usize {
        1 + self.children().map(MarkupNode::element_count).sum::<usize>()
    }

    /// Serialize this subtree back to markup text.
    ///
    /// Attributes come out in sorted order and whitespace is reproduced from
    /// the stored text runs, so serialization round-trips tag names and
    /// attribute sets but not the exact spacing of the original source.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {name}=\"{value}\"");
        }
        if self.content.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for item in &self.content {
            match item {
                Content::Text(text) => out.push_str(text),
                Content::Element(child) => child.write_markup(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl fmt::Display for MarkupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_text_skips_children() {
        let node = MarkupNode::new("sub")
            .with_text("  New ")
            .with_child(MarkupNode::new("s").with_text("nested"))
            .with_text("York  ");
        assert_eq!(node.direct_text(), "New York");
    }

    #[test]
    fn test_serialize_self_closing() {
        let node = MarkupNode::new("break").with_attr("strength", "weak");
        assert_eq!(node.to_markup(), r#"<break strength="weak"/>"#);
    }

    #[test]
    fn test_serialize_sorted_attributes() {
        let node = MarkupNode::new("voice")
            .with_attr("name", "en-US-Jenny")
            .with_attr("gender", "female")
            .with_text("hi");
        assert_eq!(
            node.to_markup(),
            r#"<voice gender="female" name="en-US-Jenny">hi</voice>"#
        );
    }

    #[test]
    fn test_element_count() {
        let node = MarkupNode::new("speak")
            .with_child(MarkupNode::new("p").with_child(MarkupNode::new("s")))
            .with_child(MarkupNode::new("break"));
        assert_eq!(node.element_count(), 4);
    }
}
