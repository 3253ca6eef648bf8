//! List posts

use anyhow::Result;
use serde::Serialize;

use crate::content::{render_summary, PostRepository, PostSummary};
use crate::Blog;

/// Output format of the list command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// Date, title and slug per line
    Table,
    /// One slug per line
    Slugs,
    /// JSON array of summaries
    Json,
}

#[derive(Serialize)]
struct ListedPost {
    slug: String,
    #[serde(flatten)]
    summary: PostSummary,
}

/// List posts in directory order
pub fn run(blog: &Blog, format: ListFormat) -> Result<()> {
    print!("{}", render(blog, format)?);
    Ok(())
}

/// Render the listing as printed by `run`
pub fn render(blog: &Blog, format: ListFormat) -> Result<String> {
    let repository = blog.repository();

    let output = match format {
        ListFormat::Slugs => repository
            .slugs()?
            .into_iter()
            .map(|slug| format!("{}\n", slug))
            .collect::<String>(),
        ListFormat::Table => {
            let entries = repository.list()?;
            let mut out = format!("Posts ({}):\n", entries.len());
            for entry in entries {
                let summary = render_summary(&entry.frontmatter);
                out.push_str(&format!(
                    "  {} - {} [{}]\n",
                    summary.date, summary.title, entry.slug
                ));
            }
            out
        }
        ListFormat::Json => {
            let posts: Vec<ListedPost> = repository
                .list()?
                .into_iter()
                .map(|entry| ListedPost {
                    summary: render_summary(&entry.frontmatter),
                    slug: entry.slug,
                })
                .collect();
            format!("{}\n", serde_json::to_string_pretty(&posts)?)
        }
    };

    Ok(output)
}
