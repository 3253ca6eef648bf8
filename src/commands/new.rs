//! Create a new post

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::{is_valid_slug, FrontMatter};
use crate::Blog;

/// Write a new post file with `title`, today's `date` and an empty `excerpt`
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if !is_valid_slug(&slug) {
        bail!("Cannot derive a file name from {:?}", title);
    }

    fs::create_dir_all(&blog.posts_dir)?;

    let file_path = blog
        .posts_dir
        .join(format!("{}.{}", slug, blog.config.extension()));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let mut frontmatter = FrontMatter::default();
    frontmatter.insert("title", title);
    frontmatter.insert("date", chrono::Local::now().format("%Y-%m-%d").to_string());
    frontmatter.insert("excerpt", "");

    fs::write(&file_path, frontmatter.to_document("")?)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
