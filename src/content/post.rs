//! Post models

use serde::Serialize;

use super::FrontMatter;

/// A listing entry: a post's slug and metadata, without its body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostEntry {
    /// Slug (file name without extension)
    pub slug: String,

    /// Parsed front-matter
    pub frontmatter: FrontMatter,
}

/// A fully loaded post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Slug (file name without extension)
    pub slug: String,

    /// Parsed front-matter
    pub frontmatter: FrontMatter,

    /// Raw markdown content following the front-matter
    pub content: String,
}

impl Post {
    /// Drop the body, keeping what the listing needs
    pub fn entry(&self) -> PostEntry {
        PostEntry {
            slug: self.slug.clone(),
            frontmatter: self.frontmatter.clone(),
        }
    }
}

/// Check that a slug names a single file inside the posts directory
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}
