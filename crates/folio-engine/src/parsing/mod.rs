//! # Play Parsing
//!
//! Two-phase extraction of scenes from a flat element stream.
//!
//! ## Parsing Phases
//!
//! 1. **Element Classification** (`classify`): each top-level element gets a
//!    `Role` from its tag alone (boundary, character anchor, dialogue
//!    container, other)
//!
//! 2. **Structure Building** (`builder`): a `PlayBuilder` state machine walks
//!    the stream with one element of lookahead, keeps act/scene counters and
//!    flushes a `Scene` at every boundary and at the end
//!
//! ## Modules
//!
//! - **`options`**: `ParseOptions` naming the tags and attributes of the source
//! - **`classify`**: `ElementClassifier`, `Role`, `LineRole`
//! - **`citation`**: `Citation` parsing of `act.scene.line` identifiers
//! - **`dialogue`**: `parse_dialogue` for one anchor/container pair
//! - **`builder`**: `PlayBuilder` and its `BuilderState`
//! - **`error`**: `ParseError` and friends
//!
//! ## Key Invariants
//!
//! - Scenes emitted = boundaries seen + 1, empty scenes included
//! - A dialogue's act, scene, start and end come only from its citations
//! - Every failure is fatal and carries the element position

pub mod builder;
pub mod citation;
pub mod classify;
pub mod dialogue;
pub mod error;
pub mod options;

#[cfg(test)]
mod tests;

pub use builder::{BuilderState, PlayBuilder};
pub use citation::Citation;
pub use classify::{ElementClassifier, LineRole, Role};
pub use dialogue::parse_dialogue;
pub use error::{CitationError, ParseError, StructureErrorKind};
pub use options::{MismatchPolicy, ParseOptions};

use crate::markup::{Element, html};
use crate::models::Play;

/// Builds a play from already-extracted top-level elements.
pub fn parse_play<I>(elements: I, options: &ParseOptions) -> Result<Play, ParseError>
where
    I: IntoIterator<Item = Element>,
{
    PlayBuilder::new(options)?.build(elements)
}

/// Parses an HTML document and builds a play from its `<body>`.
pub fn parse_html(html: &str, options: &ParseOptions) -> Result<Play, ParseError> {
    let elements = html::body_elements(html);
    log::debug!("document body has {} top-level elements", elements.len());
    parse_play(elements, options)
}
