use regex::Regex;

use crate::markup::Element;

use super::{error::ParseError, options::ParseOptions};

/// Semantic role of a top-level element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    ActOrSceneBoundary,
    CharacterAnchor,
    DialogueContainer,
    Other,
}

/// Role of a child element inside a dialogue container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Spoken,
    Direction,
    Ignored,
}

/// Maps elements to roles from tag identity alone.
///
/// This is phase 1 of play parsing: each element is classified without
/// reference to its neighbours. Positional meaning (which element is a
/// setting label, which is staging) belongs to the builder.
#[derive(Debug, Clone)]
pub struct ElementClassifier {
    boundary_tag: String,
    anchor_tag: String,
    container_tag: String,
    direction_tag: String,
    act_marker: Regex,
}

impl ElementClassifier {
    pub fn new(options: &ParseOptions) -> Result<Self, ParseError> {
        Ok(Self {
            boundary_tag: options.boundary_tag.clone(),
            anchor_tag: options.anchor_tag.clone(),
            container_tag: options.container_tag.clone(),
            direction_tag: options.direction_tag.clone(),
            act_marker: Regex::new(&options.act_marker)?,
        })
    }

    /// Classifies a top-level element. Total: unknown tags are [`Role::Other`].
    pub fn classify(&self, element: &Element) -> Role {
        if element.is(&self.boundary_tag) {
            Role::ActOrSceneBoundary
        } else if element.is(&self.anchor_tag) {
            Role::CharacterAnchor
        } else if element.is(&self.container_tag) {
            Role::DialogueContainer
        } else {
            Role::Other
        }
    }

    /// Whether a boundary element opens a new act rather than just a scene.
    pub fn is_act_marker(&self, element: &Element) -> bool {
        self.act_marker.is_match(element.text())
    }

    /// Classifies one child of a dialogue container.
    pub fn child_role(&self, child: &Element) -> LineRole {
        if child.is(&self.anchor_tag) {
            LineRole::Spoken
        } else if child.is(&self.direction_tag) {
            LineRole::Direction
        } else {
            LineRole::Ignored
        }
    }
}
