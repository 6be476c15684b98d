use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::io::{self, IoError};
use crate::models::{ContentBlock, Play, Scene};

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Act {0} is not present")]
    InvalidAct(u32),
    #[error("Act {act}, scene {scene} is not present")]
    InvalidScene { act: u32, scene: u32 },
    #[error("Lines {start}-{end} are not present in act {act}, scene {scene}")]
    InvalidLines {
        act: u32,
        scene: u32,
        start: u32,
        end: u32,
    },
    #[error("Line selection {start}-{end} is invalid")]
    InvertedRange { start: u32, end: u32 },
    #[error("No scene has any dialogue")]
    NoScenes,
}

/// Read-side view over a play's scenes, as loaded back from scene files.
#[derive(Debug, Clone, Default)]
pub struct PlayLibrary {
    scenes: Vec<Scene>,
}

const MIN_PASSAGE: usize = 2;
const MAX_PASSAGE: usize = 5;

impl PlayLibrary {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    pub fn load(scenes_dir: &Path) -> Result<Self, IoError> {
        io::load_scenes(scenes_dir).map(Self::new)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Find a scene by the act and scene numbers in its heading.
    pub fn find_scene(&self, act: u32, scene: u32) -> Result<&Scene, QueryError> {
        let mut act_seen = false;
        for candidate in &self.scenes {
            let Some(heading) = candidate.heading() else {
                continue;
            };
            if heading.act == act {
                act_seen = true;
                if heading.scene == scene {
                    return Ok(candidate);
                }
            }
        }
        if act_seen {
            Err(QueryError::InvalidScene { act, scene })
        } else {
            Err(QueryError::InvalidAct(act))
        }
    }

    /// The dialogue of one scene restricted to an inclusive line range.
    pub fn quote(
        &self,
        act: u32,
        scene: u32,
        lines: RangeInclusive<u32>,
    ) -> Result<Vec<ContentBlock>, QueryError> {
        if lines.end() < lines.start() {
            return Err(QueryError::InvertedRange {
                start: *lines.start(),
                end: *lines.end(),
            });
        }
        let blocks: Vec<_> = self
            .find_scene(act, scene)?
            .blocks()
            .iter()
            .filter_map(|b| b.selection(&lines))
            .collect();
        if blocks.is_empty() {
            return Err(QueryError::InvalidLines {
                act,
                scene,
                start: *lines.start(),
                end: *lines.end(),
            });
        }
        Ok(blocks)
    }

    /// A few consecutive blocks from a random scene that has dialogue.
    pub fn random_passage<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<ContentBlock>, QueryError> {
        let candidates: Vec<&Scene> = self
            .scenes
            .iter()
            .filter(|s| s.dialogues().next().is_some())
            .collect();
        let blocks = candidates
            .choose(rng)
            .ok_or(QueryError::NoScenes)?
            .blocks();

        let upper = blocks.len().min(MAX_PASSAGE);
        let count = rng.gen_range(MIN_PASSAGE.min(upper)..=upper);
        let start = rng.gen_range(0..=blocks.len() - count);
        Ok(blocks[start..start + count].to_vec())
    }
}

impl From<Play> for PlayLibrary {
    fn from(play: Play) -> Self {
        Self::new(play.into_scenes())
    }
}

/// Citation range covered by a passage, e.g. `1.1.1-5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribution {
    pub act: u32,
    pub scene: u32,
    pub start: u32,
    pub end: u32,
}

impl Attribution {
    /// Spans the first to the last dialogue; `None` if there is no dialogue.
    pub fn of(blocks: &[ContentBlock]) -> Option<Self> {
        let mut dialogues = blocks.iter().filter_map(ContentBlock::as_dialogue);
        let first = dialogues.next()?;
        let end = dialogues.last().map_or(first.end, |d| d.end);
        Some(Self {
            act: first.act,
            scene: first.scene,
            start: first.start,
            end,
        })
    }
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}-{}", self.act, self.scene, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dialogue, Line, SceneHeading};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn heading(act: u32, scene: u32) -> ContentBlock {
        ContentBlock::SceneHeading(SceneHeading {
            act,
            scene,
            setting: format!("SCENE {scene}."),
            staging: Line::StageDirection("Enter".into()),
        })
    }

    fn dialogue(act: u32, scene: u32, start: u32, lines: u32) -> ContentBlock {
        ContentBlock::Dialogue(Dialogue {
            character: format!("SPEAKER{start}"),
            act,
            scene,
            start,
            end: start + lines - 1,
            lines: (0..lines)
                .map(|i| Line::SpokenText(format!("line {}", start + i)))
                .collect(),
        })
    }

    fn library() -> PlayLibrary {
        PlayLibrary::new(vec![
            Scene::new(),
            Scene::from_blocks(vec![
                heading(1, 1),
                dialogue(1, 1, 1, 3),
                dialogue(1, 1, 4, 2),
                dialogue(1, 1, 6, 4),
            ]),
            Scene::from_blocks(vec![heading(1, 2), dialogue(1, 2, 1, 2)]),
            Scene::from_blocks(vec![heading(2, 1)]),
        ])
    }

    #[test]
    fn finds_scene_by_heading() {
        let lib = library();

        assert_eq!(lib.find_scene(1, 2).unwrap().heading().unwrap().scene, 2);
        assert!(matches!(
            lib.find_scene(1, 9),
            Err(QueryError::InvalidScene { act: 1, scene: 9 })
        ));
        assert!(matches!(lib.find_scene(7, 1), Err(QueryError::InvalidAct(7))));
    }

    #[test]
    fn quote_trims_to_range() {
        let blocks = library().quote(1, 1, 2..=4).unwrap();

        assert_eq!(blocks.len(), 2);
        let attribution = Attribution::of(&blocks).unwrap();
        assert_eq!(attribution.to_string(), "1.1.2-4");
    }

    #[test]
    fn quote_outside_scene_is_invalid_lines() {
        assert!(matches!(
            library().quote(1, 2, 50..=60),
            Err(QueryError::InvalidLines { .. })
        ));
    }

    #[test]
    fn quote_rejects_inverted_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let range = 5..=2;
        assert!(matches!(
            library().quote(1, 1, range),
            Err(QueryError::InvertedRange { start: 5, end: 2 })
        ));
    }

    #[test]
    fn random_passage_is_a_consecutive_run() {
        let lib = library();
        let mut rng = Xoshiro256StarStar::seed_from_u64(1606);

        for _ in 0..50 {
            let passage = lib.random_passage(&mut rng).unwrap();
            assert!(!passage.is_empty() && passage.len() <= MAX_PASSAGE);

            let found = lib.scenes().iter().any(|scene| {
                scene
                    .blocks()
                    .windows(passage.len())
                    .any(|window| window == passage.as_slice())
            });
            assert!(found, "{passage:?}");
        }
    }

    #[test]
    fn random_passage_needs_dialogue() {
        let lib = PlayLibrary::new(vec![Scene::new(), Scene::from_blocks(vec![heading(1, 1)])]);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);

        assert!(matches!(
            lib.random_passage(&mut rng),
            Err(QueryError::NoScenes)
        ));
    }

    #[test]
    fn attribution_needs_dialogue() {
        assert!(Attribution::of(&[heading(1, 1)]).is_none());
    }
}
