use std::iter::Peekable;

use crate::markup::Element;
use crate::models::{ContentBlock, Dialogue, Line, Play, Scene, SceneHeading};

use super::{
    classify::{ElementClassifier, Role},
    dialogue::parse_dialogue,
    error::{ParseError, StructureErrorKind},
    options::{MismatchPolicy, ParseOptions},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    BetweenScenes,
    InScene,
    /// Terminal: the stream is exhausted and the last scene flushed.
    Done,
}

/// Rebuilds act → scene → dialogue structure from the flat element stream.
///
/// Phase 2 of play parsing. One forward pass with one element of lookahead;
/// every boundary flushes the open scene, and so does the end of the stream,
/// so the play always has one more scene than the boundaries seen.
pub struct PlayBuilder {
    classifier: ElementClassifier,
    citation_attribute: String,
    on_mismatch: MismatchPolicy,
    state: BuilderState,
    act: u32,
    scene: u32,
    current: Scene,
    last_end: Option<u32>,
    scenes: Vec<Scene>,
}

impl PlayBuilder {
    pub fn new(options: &ParseOptions) -> Result<Self, ParseError> {
        Ok(Self {
            classifier: ElementClassifier::new(options)?,
            citation_attribute: options.citation_attribute.clone(),
            on_mismatch: options.on_mismatch,
            state: BuilderState::BetweenScenes,
            act: 0,
            scene: 0,
            current: Scene::new(),
            last_end: None,
            scenes: vec![],
        })
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Runs the state machine over `elements` to completion.
    pub fn build<I>(mut self, elements: I) -> Result<Play, ParseError>
    where
        I: IntoIterator<Item = Element>,
    {
        let mut stream = elements.into_iter().enumerate().peekable();
        while self.step(&mut stream)? != BuilderState::Done {}
        Ok(self.finish())
    }

    /// Consumes the next element (plus any lookahead it needs).
    ///
    /// Items are `(position, element)`. Once the stream is exhausted the open
    /// scene is flushed and the builder stays [`BuilderState::Done`].
    pub fn step<I>(&mut self, stream: &mut Peekable<I>) -> Result<BuilderState, ParseError>
    where
        I: Iterator<Item = (usize, Element)>,
    {
        if self.state == BuilderState::Done {
            return Ok(self.state);
        }

        let Some((position, element)) = stream.next() else {
            self.flush();
            self.state = BuilderState::Done;
            return Ok(self.state);
        };

        match self.classifier.classify(&element) {
            Role::ActOrSceneBoundary => self.open_scene(position, element, stream)?,
            Role::CharacterAnchor => self.push_dialogue(position, element, stream)?,
            Role::DialogueContainer => {
                return Err(structure_error(
                    position,
                    &element,
                    StructureErrorKind::OrphanContainer,
                ));
            }
            Role::Other => log::debug!("skipping element {position}: {}", element.snippet()),
        }
        Ok(self.state)
    }

    /// Returns the play, flushing the open scene if the stream was not
    /// driven to the end.
    pub fn finish(mut self) -> Play {
        if self.state != BuilderState::Done {
            self.flush();
        }
        Play::new(self.scenes)
    }

    fn flush(&mut self) {
        let scene = std::mem::take(&mut self.current);
        log::debug!(
            "flushing scene {} with {} block(s)",
            self.scenes.len(),
            scene.len()
        );
        self.scenes.push(scene);
        self.last_end = None;
        self.state = BuilderState::BetweenScenes;
    }

    fn open_scene<I>(
        &mut self,
        position: usize,
        boundary: Element,
        stream: &mut Peekable<I>,
    ) -> Result<(), ParseError>
    where
        I: Iterator<Item = (usize, Element)>,
    {
        self.flush();

        let (label_position, label) = if self.classifier.is_act_marker(&boundary) {
            self.act += 1;
            self.scene = 0;
            log::debug!("act {} opens at element {position}", self.act);
            stream.next().ok_or_else(|| {
                structure_error(position, &boundary, StructureErrorKind::MissingSetting)
            })?
        } else {
            if self.act == 0 {
                // Scenes before any act marker belong to an implicit first act.
                self.act = 1;
            }
            (position, boundary)
        };
        self.scene += 1;

        let classifier = &self.classifier;
        let (_, staging) = stream
            .next_if(|(_, next)| classifier.classify(next) != Role::ActOrSceneBoundary)
            .ok_or_else(|| {
                structure_error(label_position, &label, StructureErrorKind::MissingStaging)
            })?;

        self.current.push(ContentBlock::SceneHeading(SceneHeading {
            act: self.act,
            scene: self.scene,
            setting: label.text().trim().to_string(),
            staging: Line::StageDirection(staging.text().trim().to_string()),
        }));
        self.state = BuilderState::InScene;
        Ok(())
    }

    fn push_dialogue<I>(
        &mut self,
        position: usize,
        anchor: Element,
        stream: &mut Peekable<I>,
    ) -> Result<(), ParseError>
    where
        I: Iterator<Item = (usize, Element)>,
    {
        let (container_position, container) = stream.next().ok_or_else(|| {
            structure_error(position, &anchor, StructureErrorKind::MissingContainer)
        })?;
        if self.classifier.classify(&container) != Role::DialogueContainer {
            log::debug!(
                "element {container_position} follows a character anchor but is <{}>",
                container.tag()
            );
        }

        let dialogue = parse_dialogue(
            container_position,
            &anchor,
            &container,
            &self.classifier,
            &self.citation_attribute,
        )?;
        self.check_counters(container_position, &dialogue)?;
        self.check_order(container_position, &dialogue);

        self.last_end = Some(dialogue.end);
        self.current.push(ContentBlock::Dialogue(dialogue));
        self.state = BuilderState::InScene;
        Ok(())
    }

    /// Cross-checks the citation against the counters. Skipped until the
    /// first heading sets them.
    fn check_counters(&self, position: usize, dialogue: &Dialogue) -> Result<(), ParseError> {
        if self.act == 0 || (dialogue.act, dialogue.scene) == (self.act, self.scene) {
            return Ok(());
        }
        let mismatch = ParseError::CounterMismatch {
            position,
            speaker: dialogue.character.clone(),
            act: self.act,
            scene: self.scene,
            cited_act: dialogue.act,
            cited_scene: dialogue.scene,
        };
        match self.on_mismatch {
            MismatchPolicy::Fail => Err(mismatch),
            MismatchPolicy::Warn => {
                log::warn!("{mismatch}");
                Ok(())
            }
            MismatchPolicy::Ignore => Ok(()),
        }
    }

    fn check_order(&self, position: usize, dialogue: &Dialogue) {
        if let Some(previous) = self.last_end
            && dialogue.start < previous
        {
            log::warn!(
                "dialogue for {:?} at element {position} starts at line {} before the previous turn ended at {previous}",
                dialogue.character,
                dialogue.start
            );
        }
    }
}

fn structure_error(position: usize, element: &Element, kind: StructureErrorKind) -> ParseError {
    ParseError::Structure {
        position,
        context: element.snippet(),
        kind,
    }
}
