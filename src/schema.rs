//! Tag and attribute vocabulary.
//!
//! The validator checks trees against a [`Schema`] rather than a hard-coded
//! tag list, so callers can extend or replace the vocabulary. The default
//! schema covers the speech-markup subset this crate targets.

use std::collections::{BTreeMap, BTreeSet};

/// Maximum nesting depth accepted by the default schema.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Named pause strengths and their durations in seconds.
const STRENGTH_SECONDS: &[(&str, f64)] = &[
    ("none", 0.0),
    ("x-weak", 0.1),
    ("weak", 0.25),
    ("medium", 0.5),
    ("strong", 0.75),
    ("x-strong", 1.0),
];

/// Look up a named break strength. Returns `None` for unknown names; callers
/// that must not fail (the flattening engine) substitute 0.5 themselves.
pub fn strength_seconds(name: &str) -> Option<f64> {
    STRENGTH_SECONDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, secs)| *secs)
}

/// The tag/attribute contract a tree is validated against.
///
/// A tag with a *registered* attribute list rejects attributes outside that
/// list. A tag with *no* registered list permits any attributes at all; the
/// absence of a registration means "unconstrained", not "none allowed".
#[derive(Debug, Clone)]
pub struct Schema {
    root_tag: String,
    allowed_tags: BTreeSet<String>,
    allowed_attrs: BTreeMap<String, BTreeSet<String>>,
    max_depth: usize,
}

impl Default for Schema {
    fn default() -> Self {
        let mut schema = Self::empty("speak");
        for tag in ["speak", "p", "s", "voice", "prosody", "break", "say-as", "sub", "emphasis"] {
            schema.allow_tag(tag);
        }
        schema.register_attrs("voice", ["name", "language", "gender"]);
        schema.register_attrs("prosody", ["rate", "pitch", "volume"]);
        schema.register_attrs("break", ["time", "strength"]);
        schema.register_attrs("say-as", ["interpret-as", "format", "detail"]);
        schema.register_attrs("sub", ["alias"]);
        schema.register_attrs("emphasis", ["level"]);
        schema
    }
}

impl Schema {
    /// A schema with no allowed tags beyond configuration added later.
    pub fn empty(root_tag: impl Into<String>) -> Self {
        Self {
            root_tag: root_tag.into(),
            allowed_tags: BTreeSet::new(),
            allowed_attrs: BTreeMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Add a tag to the allow-list.
    pub fn allow_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.allowed_tags.insert(tag.into());
        self
    }

    /// Register the attribute allow-list for a tag. Registering an empty
    /// list still constrains the tag (to no attributes), unlike not
    /// registering at all.
    pub fn register_attrs<I, S>(&mut self, tag: impl Into<String>, attrs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_attrs
            .insert(tag.into(), attrs.into_iter().map(Into::into).collect());
        self
    }

    /// Override the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The designated top-level tag.
    pub fn root_tag(&self) -> &str {
        &self.root_tag
    }

    /// Whether a tag is in the allow-list.
    pub fn is_allowed_tag(&self, tag: &str) -> bool {
        self.allowed_tags.contains(tag)
    }

    /// The registered attribute allow-list for a tag, if any.
    pub fn registered_attrs(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.allowed_attrs.get(tag)
    }

    /// The maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_table() {
        assert_eq!(strength_seconds("none"), Some(0.0));
        assert_eq!(strength_seconds("x-strong"), Some(1.0));
        assert_eq!(strength_seconds("ultra"), None);
    }

    #[test]
    fn test_default_schema_vocabulary() {
        let schema = Schema::default();
        assert_eq!(schema.root_tag(), "speak");
        assert!(schema.is_allowed_tag("prosody"));
        assert!(!schema.is_allowed_tag("div"));
        assert!(schema.registered_attrs("sub").is_some_and(|a| a.contains("alias")));
        // Container tags have no registered list: unconstrained.
        assert!(schema.registered_attrs("p").is_none());
    }
}
