use thiserror::Error;

/// Why a citation string did not parse as `act.scene.line`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CitationError {
    #[error("missing `{attribute}` attribute")]
    Missing { attribute: String },
    #[error("expected 3 dotted numbers, found {count} token(s)")]
    WrongArity { count: usize },
    #[error("token {token:?} is not a base-10 integer")]
    InvalidToken { token: String },
    #[error("last line {end} comes before first line {start}")]
    InvertedRange { start: u32, end: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureErrorKind {
    /// A character anchor was the last element.
    MissingContainer,
    /// An act boundary was not followed by a scene label.
    MissingSetting,
    /// A boundary had no staging element, or the next element was another boundary.
    MissingStaging,
    /// A dialogue container appeared without a character anchor before it.
    OrphanContainer,
}

impl std::fmt::Display for StructureErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            StructureErrorKind::MissingContainer => "character anchor has no dialogue container",
            StructureErrorKind::MissingSetting => "act marker is not followed by a scene label",
            StructureErrorKind::MissingStaging => "scene heading has no staging direction",
            StructureErrorKind::OrphanContainer => "dialogue container has no character anchor",
        };
        f.write_str(msg)
    }
}

/// Fatal errors raised while building a [`Play`](crate::models::Play).
///
/// `position` is the index of the offending element among the top-level
/// body elements.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed citation {citation:?} at element {position} ({context}): {source}")]
    CitationFormat {
        position: usize,
        citation: String,
        context: String,
        source: CitationError,
    },

    #[error("dialogue for {speaker:?} at element {position} has no spoken lines")]
    EmptyDialogue { position: usize, speaker: String },

    #[error("{kind} at element {position} ({context})")]
    Structure {
        position: usize,
        context: String,
        kind: StructureErrorKind,
    },

    #[error(
        "dialogue for {speaker:?} at element {position} cites act {cited_act} scene {cited_scene} but the document is at act {act} scene {scene}"
    )]
    CounterMismatch {
        position: usize,
        speaker: String,
        act: u32,
        scene: u32,
        cited_act: u32,
        cited_scene: u32,
    },

    #[error("invalid act marker pattern: {0}")]
    InvalidActMarker(#[from] regex::Error),
}

impl ParseError {
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::CitationFormat { position, .. }
            | ParseError::EmptyDialogue { position, .. }
            | ParseError::Structure { position, .. }
            | ParseError::CounterMismatch { position, .. } => Some(*position),
            ParseError::InvalidActMarker(_) => None,
        }
    }
}
