pub mod play;
pub mod selection;

pub use play::{ContentBlock, Dialogue, Line, Play, Scene, SceneHeading};
pub use selection::ELLIPSIS;
