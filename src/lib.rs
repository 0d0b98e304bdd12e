//! # voxml
//!
//! A small, fast library for parsing a constrained speech-markup language
//! and flattening it to plain text with style annotations and timing
//! estimates.
//!
//! ## Features
//!
//! - Hand-rolled tag parser for `<tag attr="value">` markup with lenient
//!   attribute recovery
//! - Collect-all structural validation against a configurable [`Schema`]
//! - Style-aware flattening: prosody/emphasis inheritance, `<sub>` aliasing,
//!   `<say-as>` expansion, `<break>` pause accounting
//! - Speech duration estimation from a words-per-minute rate
//!
//! ## Quick Start
//!
//! ```
//! use voxml::{flatten, parse, validate, FlattenOptions, Schema};
//!
//! let markup = r#"<speak>
//!   Hello <sub alias="NYC">New York City</sub> fans!
//!   <break time="500ms"/>
//!   <prosody rate="slow">Thanks for listening.</prosody>
//! </speak>"#;
//!
//! let doc = parse(markup).unwrap();
//!
//! let issues = validate(&doc, &Schema::default());
//! assert!(issues.is_empty());
//!
//! let result = flatten(&doc, &FlattenOptions::default());
//! assert_eq!(result.text, "Hello NYC fans! Thanks for listening.");
//! assert_eq!(result.break_seconds, 0.5);
//! assert_eq!(result.segments.last().unwrap().style.rate, "slow");
//! ```
//!
//! ## Pipeline
//!
//! Raw text flows through [`parse`] into a [`MarkupNode`] tree; [`validate`]
//! and [`flatten`] are independent read-only consumers of that tree. Parsing
//! is the only step that can fail — validation collects issues without
//! aborting, and flattening degrades gracefully on invalid nodes. All three
//! are synchronous pure functions with no shared state, so independent calls
//! are safe to run in parallel.

pub mod error;
pub mod flatten;
pub mod node;
pub mod parser;
pub mod schema;
pub mod style;
pub mod util;
pub mod validate;

pub use error::{ParseError, Result};
pub use flatten::{BreakSpec, FlattenOptions, FlattenResult, flatten};
pub use node::{Content, MarkupNode};
pub use parser::{DOCUMENT_TAG, parse};
pub use schema::Schema;
pub use style::{Segment, StyleState};
pub use validate::{ValidationIssue, validate};
