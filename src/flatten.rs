//! Style-aware flattening.
//!
//! Walks a parsed tree depth-first and produces the visible text, a sequence
//! of style-tagged [`Segment`]s, and an estimated speech duration. The walk
//! threads a [`StyleState`] down by value, so a prosody or emphasis override
//! is visible exactly within its subtree and nowhere else.
//!
//! Flattening never fails. Invalid trees degrade per-tag: a `<break>` with
//! no usable duration contributes zero seconds, a `<sub>` without an alias
//! falls back to its own text. Run the validator first when those cases
//! should be surfaced instead of papered over.

use crate::node::{Content, MarkupNode};
use crate::schema::strength_seconds;
use crate::style::{Segment, StyleState};

/// Fallback duration for an unrecognized strength name.
const UNKNOWN_STRENGTH_SECONDS: f64 = 0.5;

/// A `<break>` element's resolved pause source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakSpec {
    /// Explicit duration from a `time` attribute, in seconds.
    Time(f64),
    /// Named strength from a `strength` attribute, in seconds.
    Strength(f64),
}

impl BreakSpec {
    /// Derive the pause from a break element's attributes.
    ///
    /// `time` wins when both are present. A malformed `time` (bad suffix or
    /// non-numeric magnitude) resolves to zero rather than falling through
    /// to `strength`; an unknown strength name resolves to 0.5. Returns
    /// `None` when neither attribute is present.
    pub fn from_attrs(node: &MarkupNode) -> Option<BreakSpec> {
        if let Some(time) = node.attr("time") {
            let seconds = if let Some(ms) = time.strip_suffix("ms") {
                ms.trim().parse::<f64>().map(|v| v / 1000.0).unwrap_or(0.0)
            } else if let Some(s) = time.strip_suffix('s') {
                s.trim().parse::<f64>().unwrap_or(0.0)
            } else {
                0.0
            };
            return Some(BreakSpec::Time(seconds));
        }
        if let Some(strength) = node.attr("strength") {
            let seconds = strength_seconds(strength).unwrap_or(UNKNOWN_STRENGTH_SECONDS);
            return Some(BreakSpec::Strength(seconds));
        }
        None
    }

    /// The pause duration in seconds.
    pub fn seconds(&self) -> f64 {
        match self {
            BreakSpec::Time(secs) | BreakSpec::Strength(secs) => *secs,
        }
    }
}

/// Options for [`flatten`].
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Speaking rate in words per minute. Zero yields zero speech time.
    pub wpm: f64,
    /// When set, segment texts are joined with single spaces and whitespace
    /// runs are collapsed. When clear, segment texts are concatenated with
    /// no added separators for callers needing byte-faithful output.
    pub normalize_whitespace: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self { wpm: 180.0, normalize_whitespace: true }
    }
}

/// Result of flattening a tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct FlattenResult {
    /// The assembled visible text.
    pub text: String,
    /// Every emitted segment in traversal order.
    pub segments: Vec<Segment>,
    /// Total pause time from `<break>` elements, rounded to milliseconds.
    pub break_seconds: f64,
    /// Estimated speech time plus pauses, rounded to milliseconds.
    pub duration_seconds: f64,
}

/// Tag dispatch classes for the flattening walk.
enum TagKind {
    Prosody,
    Emphasis,
    Break,
    Sub,
    SayAs,
    /// Root, paragraph, sentence, voice, and anything unrecognized: recurse
    /// with the inherited style unchanged.
    Container,
}

impl TagKind {
    fn of(tag: &str) -> TagKind {
        match tag {
            "prosody" => TagKind::Prosody,
            "emphasis" => TagKind::Emphasis,
            "break" => TagKind::Break,
            "sub" => TagKind::Sub,
            "say-as" => TagKind::SayAs,
            _ => TagKind::Container,
        }
    }
}

/// Work items for the explicit traversal stack. Carrying the inherited style
/// in each item is what makes inheritance value-semantics; it also keeps
/// deep nesting off the native call stack.
enum Work<'a> {
    Element(&'a MarkupNode, StyleState),
    Text(&'a str, StyleState),
}

/// Flatten a tree to text, segments, and an estimated duration.
///
/// Pure function of its inputs; accepts the synthetic document node from
/// [`parse`](crate::parse) or any element. Does not require prior
/// validation.
///
/// # Examples
///
/// ```
/// use voxml::{flatten, parse, FlattenOptions};
///
/// let doc = parse(r#"<speak>Hello <sub alias="NYC">New York City</sub>!</speak>"#).unwrap();
/// let result = flatten(&doc, &FlattenOptions::default());
/// assert_eq!(result.text, "Hello NYC !");
/// ```
pub fn flatten(root: &MarkupNode, options: &FlattenOptions) -> FlattenResult {
    let mut segments: Vec<Segment> = Vec::new();
    let mut break_seconds = 0.0;

    let mut work = vec![Work::Element(root, StyleState::default())];
    while let Some(item) = work.pop() {
        match item {
            Work::Text(text, style) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    segments.push(Segment::new(trimmed, style));
                }
            }
            Work::Element(node, style) => match TagKind::of(&node.tag) {
                TagKind::Break => {
                    if let Some(spec) = BreakSpec::from_attrs(node) {
                        break_seconds += spec.seconds();
                    }
                }
                TagKind::Sub => {
                    if let Some(segment) = sub_segment(node, style) {
                        segments.push(segment);
                    }
                }
                TagKind::SayAs => {
                    if let Some(segment) = say_as_segment(node, style) {
                        segments.push(segment);
                    }
                }
                TagKind::Prosody => {
                    // Present attributes override the inherited value for
                    // the subtree; absent ones leave it unchanged.
                    let mut style = style;
                    if let Some(rate) = node.attr("rate") {
                        style.rate = rate.to_string();
                    }
                    if let Some(pitch) = node.attr("pitch") {
                        style.pitch = pitch.to_string();
                    }
                    if let Some(volume) = node.attr("volume") {
                        style.volume = volume.to_string();
                    }
                    push_content(&mut work, node, style);
                }
                TagKind::Emphasis => {
                    let mut style = style;
                    style.emphasis = node.attr("level").unwrap_or("moderate").to_string();
                    push_content(&mut work, node, style);
                }
                TagKind::Container => push_content(&mut work, node, style),
            },
        }
    }

    let text = assemble_text(&segments, options.normalize_whitespace);
    let words = text.split_whitespace().count();
    let speech_seconds = if options.wpm > 0.0 {
        words as f64 / (options.wpm / 60.0)
    } else {
        0.0
    };

    FlattenResult {
        text,
        segments,
        break_seconds: round_millis(break_seconds),
        duration_seconds: round_millis(speech_seconds + break_seconds),
    }
}

/// Queue a node's content items in reverse so the pre-order pop visits them
/// in document order, each under the node's derived style.
fn push_content<'a>(work: &mut Vec<Work<'a>>, node: &'a MarkupNode, style: StyleState) {
    for item in node.content.iter().rev() {
        match item {
            Content::Text(text) => work.push(Work::Text(text, style.clone())),
            Content::Element(child) => work.push(Work::Element(child, style.clone())),
        }
    }
}

/// `<sub>` emission: the trimmed alias replaces the entire subtree. Children
/// are fully suppressed even when the alias is usable. Without a usable
/// alias, the node's own direct text is emitted instead so the content is
/// not silently lost.
fn sub_segment(node: &MarkupNode, style: StyleState) -> Option<Segment> {
    let text = match node.attr("alias") {
        Some(alias) if !alias.trim().is_empty() => alias.trim().to_string(),
        _ => node.direct_text(),
    };
    (!text.is_empty()).then(|| Segment::new(text, style))
}

/// `<say-as>` emission: transform the node's direct text by mode. Children
/// are ignored; an empty text yields no segment.
fn say_as_segment(node: &MarkupNode, style: StyleState) -> Option<Segment> {
    let text = node.direct_text();
    if text.is_empty() {
        return None;
    }
    let mode = node.attr("interpret-as").unwrap_or("");
    let rendered = interpret_say_as(&text, mode);
    (!rendered.is_empty()).then(|| Segment::new(rendered, style))
}

/// Expand say-as text according to its `interpret-as` mode. Unrecognized
/// modes pass the text through unchanged.
fn interpret_say_as(text: &str, mode: &str) -> String {
    match mode {
        "characters" | "digits" | "telephone" => {
            let chars: Vec<String> = text.chars().map(|c| c.to_string()).collect();
            chars.join(" ")
        }
        "ordinal" => match text {
            "1" => "first".to_string(),
            "2" => "second".to_string(),
            "3" => "third".to_string(),
            "4" => "fourth".to_string(),
            "5" => "fifth".to_string(),
            _ => format!("{text}th"),
        },
        "date" => {
            let parts: Vec<&str> = text.split('/').collect();
            match parts.as_slice() {
                [m, d, y] => format!("Month {m}, Day {d}, Year {y}"),
                _ => text.to_string(),
            }
        }
        _ => text.to_string(),
    }
}

/// Join segment texts into the final text. Normalized mode space-joins and
/// collapses whitespace runs; raw mode concatenates with no separators.
fn assemble_text(segments: &[Segment], normalize: bool) -> String {
    if normalize {
        let joined = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        segments.iter().map(|segment| segment.text.as_str()).collect()
    }
}

/// Round to 3 decimal places (millisecond precision).
fn round_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
