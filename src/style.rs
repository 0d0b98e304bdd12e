//! Style context threaded through flattening.

/// A snapshot of the prosody/emphasis context at one point in the tree.
///
/// Inheritance is value-semantics: a child subtree receives a clone with at
/// most its own overrides applied, so sibling subtrees never observe each
/// other's changes. Nothing here is shared mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct StyleState {
    /// Speaking rate, e.g. `"slow"`, `"medium"`, `"fast"`.
    pub rate: String,
    /// Voice pitch.
    pub pitch: String,
    /// Output volume.
    pub volume: String,
    /// Emphasis level; `"none"` outside any emphasis element.
    pub emphasis: String,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            rate: "medium".to_string(),
            pitch: "medium".to_string(),
            volume: "medium".to_string(),
            emphasis: "none".to_string(),
        }
    }
}

/// One unit of flattened output: a non-empty trimmed text run and the style
/// active at its point of emission.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Segment {
    pub text: String,
    pub style: StyleState,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: StyleState) -> Self {
        Self { text: text.into(), style }
    }
}
