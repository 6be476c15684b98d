pub mod io;
pub mod library;
pub mod markup;
pub mod metadata;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use io::*;
pub use library::{Attribution, PlayLibrary, QueryError};
pub use metadata::{SceneMetadata, list_metadata};
pub use models::*;
pub use parsing::{MismatchPolicy, ParseError, ParseOptions, parse_html, parse_play};
