use serde::{Deserialize, Serialize};

/// What to do when a dialogue's citation disagrees with the builder's
/// running act/scene counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Log a warning and keep the citation values.
    #[default]
    Warn,
    /// Abort the run with [`ParseError::CounterMismatch`](super::ParseError::CounterMismatch).
    Fail,
    Ignore,
}

/// The markup conventions of the source document.
///
/// Defaults describe the MIT Shakespeare HTML pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Tag marking an act or scene boundary.
    pub boundary_tag: String,
    /// Tag of the character-name anchor, and of spoken lines inside a speech.
    pub anchor_tag: String,
    /// Tag of the element holding a speech.
    pub container_tag: String,
    /// Tag of a stage direction inside a speech.
    pub direction_tag: String,
    /// Attribute carrying the `act.scene.line` citation.
    pub citation_attribute: String,
    /// Regex matched against boundary text to detect a new act.
    pub act_marker: String,
    pub on_mismatch: MismatchPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            boundary_tag: "h3".into(),
            anchor_tag: "a".into(),
            container_tag: "blockquote".into(),
            direction_tag: "p".into(),
            citation_attribute: "name".into(),
            act_marker: r"(?i)^\s*act\b".into(),
            on_mismatch: MismatchPolicy::Warn,
        }
    }
}
