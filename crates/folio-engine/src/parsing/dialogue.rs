use crate::markup::Element;
use crate::models::{Dialogue, Line};

use super::{
    citation::Citation,
    classify::{ElementClassifier, LineRole},
    error::{CitationError, ParseError},
};

/// Builds a [`Dialogue`] from a character anchor and the container after it.
///
/// `position` is the container's index in the element stream and is only
/// used for error reporting. Act, scene and start come from the first spoken
/// line's citation, end from the last one's; the builder's counters are not
/// consulted here.
pub fn parse_dialogue(
    position: usize,
    anchor: &Element,
    container: &Element,
    classifier: &ElementClassifier,
    citation_attribute: &str,
) -> Result<Dialogue, ParseError> {
    let character = anchor.text().to_string();

    let mut lines = Vec::new();
    let mut first: Option<&Element> = None;
    let mut last: Option<&Element> = None;
    for child in container.children() {
        match classifier.child_role(child) {
            LineRole::Spoken => {
                if first.is_none() {
                    first = Some(child);
                }
                last = Some(child);
                lines.push(Line::SpokenText(child.text().to_string()));
            }
            LineRole::Direction => lines.push(Line::StageDirection(child.text().to_string())),
            LineRole::Ignored => {}
        }
    }

    let (Some(first), Some(last)) = (first, last) else {
        return Err(ParseError::EmptyDialogue {
            position,
            speaker: character,
        });
    };

    let opening = cite(position, first, citation_attribute)?;
    let closing = cite(position, last, citation_attribute)?;
    if closing.line < opening.line {
        return Err(ParseError::CitationFormat {
            position,
            citation: format!("{opening}..{closing}"),
            context: container.snippet(),
            source: CitationError::InvertedRange {
                start: opening.line,
                end: closing.line,
            },
        });
    }

    Ok(Dialogue {
        character,
        act: opening.act,
        scene: opening.scene,
        start: opening.line,
        end: closing.line,
        lines,
    })
}

fn cite(position: usize, line: &Element, attribute: &str) -> Result<Citation, ParseError> {
    let Some(raw) = line.attr(attribute) else {
        return Err(ParseError::CitationFormat {
            position,
            citation: String::new(),
            context: line.snippet(),
            source: CitationError::Missing {
                attribute: attribute.to_string(),
            },
        });
    };
    Citation::parse(raw).map_err(|source| ParseError::CitationFormat {
        position,
        citation: raw.to_string(),
        context: line.snippet(),
        source,
    })
}
