//! Error types for voxml operations.

use thiserror::Error;

/// Errors produced by the tag parser.
///
/// These represent malformed input and are always fatal: no partial tree is
/// returned after a parse failure. Semantic problems with a well-formed tree
/// (unknown tags, bad attributes) are reported separately as
/// [`ValidationIssue`](crate::ValidationIssue)s and never abort anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `<` with no matching `>` before end of input.
    #[error("unclosed tag bracket")]
    UnclosedBracket,

    /// A tag with an empty body (`<>`).
    #[error("empty tag")]
    EmptyTag,

    /// A closing tag that does not match the innermost open element.
    #[error("mismatched closing tag: </{0}>")]
    MismatchedClosingTag(String),

    /// Elements still open at end of input.
    #[error("unclosed tags at end of input ({0} still open)")]
    UnclosedAtEnd(usize),
}

pub type Result<T> = std::result::Result<T, ParseError>;
