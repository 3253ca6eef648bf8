//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

use super::frontmatter::FrontMatterError;

/// Errors raised while reading posts from their store
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("posts directory not found: {0:?}")]
    DirectoryNotFound(PathBuf),

    #[error("post not found: {0}")]
    PostNotFound(String),

    #[error("malformed front-matter in {path:?}: {source}")]
    MalformedFrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to enumerate posts: {0}")]
    Walk(#[from] walkdir::Error),
}

impl ContentError {
    /// Whether this error only concerns a single missing post
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::PostNotFound(_))
    }
}
