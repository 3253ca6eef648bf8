//! Post summaries for the listing page

use serde::Serialize;

use super::FrontMatter;

/// Display fields of a post on the listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub date: String,
    /// Empty when the post has no `excerpt`
    pub excerpt: String,
}

impl PostSummary {
    pub fn from_frontmatter(frontmatter: &FrontMatter) -> Self {
        Self {
            title: frontmatter.title().unwrap_or_default(),
            date: frontmatter.date().unwrap_or_default(),
            excerpt: frontmatter.excerpt().unwrap_or_default(),
        }
    }
}

/// Extract display fields, falling back to empty strings
pub fn render_summary(frontmatter: &FrontMatter) -> PostSummary {
    PostSummary::from_frontmatter(frontmatter)
}
