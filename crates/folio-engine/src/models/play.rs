use serde::{Deserialize, Serialize};

/// A bit of text from the play.
///
/// The variant alone decides how the text is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Line {
    /// Words spoken by the character.
    #[serde(rename = "text")]
    SpokenText(String),
    /// A stage direction embedded in the text.
    #[serde(rename = "direction")]
    StageDirection(String),
}

impl Line {
    pub fn text(&self) -> &str {
        match self {
            Line::SpokenText(text) | Line::StageDirection(text) => text,
        }
    }

    pub fn is_spoken(&self) -> bool {
        matches!(self, Line::SpokenText(_))
    }
}

/// The heading that opens a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneHeading {
    /// Act counter at the point the heading was read.
    pub act: u32,
    /// Positional scene counter within the act.
    pub scene: u32,
    /// The scene label, e.g. `SCENE I. King Lear's palace.`
    pub setting: String,
    /// The initial stage state. Always a [`Line::StageDirection`].
    pub staging: Line,
}

/// One uninterrupted speaking turn by a single character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    pub character: String,
    pub act: u32,
    pub scene: u32,
    /// Line citation of the first spoken line.
    pub start: u32,
    /// Line citation of the last spoken line. Never below `start`.
    pub end: u32,
    /// Spoken text and stage directions in document order.
    pub lines: Vec<Line>,
}

impl Dialogue {
    pub fn spoken_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            Line::SpokenText(text) => Some(text.as_str()),
            Line::StageDirection(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentBlock {
    SceneHeading(SceneHeading),
    Dialogue(Dialogue),
}

impl ContentBlock {
    pub fn as_dialogue(&self) -> Option<&Dialogue> {
        match self {
            ContentBlock::Dialogue(dialogue) => Some(dialogue),
            ContentBlock::SceneHeading(_) => None,
        }
    }

    pub fn as_heading(&self) -> Option<&SceneHeading> {
        match self {
            ContentBlock::SceneHeading(heading) => Some(heading),
            ContentBlock::Dialogue(_) => None,
        }
    }
}

/// One continuous scene: an optional heading followed by dialogue in
/// speaking order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    blocks: Vec<ContentBlock>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    pub(crate) fn push(&mut self, block: ContentBlock) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// The heading, which is always the first block when present.
    pub fn heading(&self) -> Option<&SceneHeading> {
        self.blocks.first().and_then(ContentBlock::as_heading)
    }

    pub fn dialogues(&self) -> impl Iterator<Item = &Dialogue> {
        self.blocks.iter().filter_map(ContentBlock::as_dialogue)
    }

    pub fn last_dialogue(&self) -> Option<&Dialogue> {
        self.blocks.iter().rev().find_map(ContentBlock::as_dialogue)
    }
}

/// The whole document in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Play {
    scenes: Vec<Scene>,
}

impl Play {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn into_scenes(self) -> Vec<Scene> {
        self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn dialogues(&self) -> impl Iterator<Item = &Dialogue> {
        self.scenes.iter().flat_map(Scene::dialogues)
    }
}
