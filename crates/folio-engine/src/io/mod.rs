use crate::models::{Play, Scene};
use glob::Pattern;
use relative_path::RelativePathBuf;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scene JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid scenes directory: {0}")]
    InvalidScenesDir(String),
}

/// Pattern scene files match. Indices past 99 simply grow a digit.
const SCENE_FILE_PATTERN: &str = "[0-9][0-9]*.json";

/// File name of the scene at `index`, zero-padded to two digits.
pub fn scene_file_name(index: usize) -> RelativePathBuf {
    RelativePathBuf::from(format!("{index:02}.json"))
}

/// Read the play document
pub fn read_play_source(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write one file per scene into `scenes_dir`, returning the paths in play order.
pub fn write_play(play: &Play, scenes_dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    fs::create_dir_all(scenes_dir).map_err(IoError::Io)?;

    play.scenes()
        .iter()
        .enumerate()
        .map(|(index, scene)| write_scene(scene, index, scenes_dir))
        .collect()
}

/// Write a single scene as a pretty-printed JSON array of blocks
pub fn write_scene(scene: &Scene, index: usize, scenes_dir: &Path) -> Result<PathBuf, IoError> {
    let path = scene_file_name(index).to_path(scenes_dir);
    let json = serde_json::to_string_pretty(scene).map_err(|source| IoError::Json {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json + "\n").map_err(IoError::Io)?;
    Ok(path)
}

/// Read a scene file
pub fn read_scene(path: &Path) -> Result<Scene, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(IoError::Io)?;
    serde_json::from_str(&content).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Scan for scene files, sorted by the index in their file name
pub fn scan_scene_files(scenes_dir: &Path) -> Result<Vec<(usize, PathBuf)>, IoError> {
    validate_scenes_dir(scenes_dir)?;

    let pattern = Pattern::new(SCENE_FILE_PATTERN)
        .map_err(|e| IoError::InvalidScenesDir(e.to_string()))?;

    let mut files = Vec::new();
    for entry in fs::read_dir(scenes_dir).map_err(IoError::Io)? {
        let path = entry.map_err(IoError::Io)?.path();
        if let Some(index) = scene_index(&path, &pattern) {
            files.push((index, path));
        }
    }
    files.sort();
    Ok(files)
}

/// Load every scene in `scenes_dir`, in index order
pub fn load_scenes(scenes_dir: &Path) -> Result<Vec<Scene>, IoError> {
    scan_scene_files(scenes_dir)?
        .iter()
        .map(|(_, path)| read_scene(path))
        .collect()
}

pub fn validate_scenes_dir(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() {
        return Err(IoError::InvalidScenesDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(())
}

fn scene_index(path: &Path, pattern: &Pattern) -> Option<usize> {
    if !path.is_file() {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    if !pattern.matches(name) {
        return None;
    }
    name.strip_suffix(".json")?.parse().ok()
}
