//! Content module - loads posts and turns them into displayable output

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod summary;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::{FsPostRepository, PostRepository};
pub use markdown::{render_body, MarkdownRenderer};
pub use post::{is_valid_slug, Post, PostEntry};
pub use summary::{render_summary, PostSummary};
