use std::path::Path;

use serde::Serialize;

use crate::io::{self, IoError};
use crate::models::Scene;

/// Summary of one scene file for a table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneMetadata {
    /// Position of the scene in the play (and its file name).
    pub index: usize,
    pub act: Option<u32>,
    pub scene: Option<u32>,
    pub setting: Option<String>,
    /// End citation of the scene's last dialogue, 0 when it has none.
    pub lines: u32,
    pub blocks: usize,
}

impl SceneMetadata {
    pub fn from_scene(index: usize, scene: &Scene) -> Self {
        let heading = scene.heading();
        Self {
            index,
            act: heading.map(|h| h.act),
            scene: heading.map(|h| h.scene),
            setting: heading.map(|h| h.setting.clone()),
            lines: scene.last_dialogue().map_or(0, |d| d.end),
            blocks: scene.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks == 0
    }
}

/// Read every scene file in `scenes_dir` and summarize it.
///
/// Each file is read on its own; the index is the number in its file name,
/// so a missing file leaves a gap rather than renumbering the rest.
pub fn list_metadata(scenes_dir: &Path) -> Result<Vec<SceneMetadata>, IoError> {
    io::scan_scene_files(scenes_dir)?
        .iter()
        .map(|(index, path)| {
            let scene = io::read_scene(path)?;
            Ok(SceneMetadata::from_scene(*index, &scene))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentBlock, Dialogue, Line, Play, SceneHeading};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn heading(act: u32, scene: u32) -> ContentBlock {
        ContentBlock::SceneHeading(SceneHeading {
            act,
            scene,
            setting: format!("SCENE {scene}. Somewhere."),
            staging: Line::StageDirection("Enter".into()),
        })
    }

    fn dialogue(end: u32) -> ContentBlock {
        ContentBlock::Dialogue(Dialogue {
            character: "EDGAR".into(),
            act: 1,
            scene: 1,
            start: end,
            end,
            lines: vec![Line::SpokenText("Poor Tom's a-cold.".into())],
        })
    }

    #[test]
    fn summarizes_heading_and_last_line() {
        let scene = Scene::from_blocks(vec![heading(3, 4), dialogue(20), dialogue(187)]);

        assert_eq!(
            SceneMetadata::from_scene(13, &scene),
            SceneMetadata {
                index: 13,
                act: Some(3),
                scene: Some(4),
                setting: Some("SCENE 4. Somewhere.".into()),
                lines: 187,
                blocks: 3,
            }
        );
    }

    #[test]
    fn empty_scene_has_no_lines() {
        let meta = SceneMetadata::from_scene(0, &Scene::new());

        assert!(meta.is_empty());
        assert_eq!(meta.lines, 0);
        assert_eq!(meta.act, None);
    }

    #[test]
    fn lists_every_scene_file() {
        let dir = TempDir::new().unwrap();
        let play = Play::new(vec![
            Scene::new(),
            Scene::from_blocks(vec![heading(1, 1), dialogue(332)]),
            Scene::from_blocks(vec![heading(1, 2), dialogue(191)]),
        ]);
        io::write_play(&play, dir.path()).unwrap();

        let listing = list_metadata(dir.path()).unwrap();
        let summary: Vec<_> = listing
            .iter()
            .map(|m| (m.index, m.act, m.scene, m.lines))
            .collect();

        assert_eq!(
            summary,
            vec![
                (0, None, None, 0),
                (1, Some(1), Some(1), 332),
                (2, Some(1), Some(2), 191)
            ]
        );
    }

    #[test]
    fn index_comes_from_file_name() {
        let dir = TempDir::new().unwrap();
        let play = Play::new(vec![
            Scene::new(),
            Scene::from_blocks(vec![heading(1, 1), dialogue(332)]),
            Scene::from_blocks(vec![heading(1, 2), dialogue(191)]),
        ]);
        io::write_play(&play, dir.path()).unwrap();
        std::fs::remove_file(dir.path().join("01.json")).unwrap();

        let listing = list_metadata(dir.path()).unwrap();
        let summary: Vec<_> = listing.iter().map(|m| (m.index, m.blocks)).collect();

        assert_eq!(summary, vec![(0, 0), (2, 2)]);
    }
}
