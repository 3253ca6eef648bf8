//! Generator module - assembles pages from a post store and writes the static site

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{ListingOrder, SiteConfig};
use crate::content::{
    render_summary, ContentError, MarkdownRenderer, PostEntry, PostRepository, PostSummary,
};
use crate::templates::PageRenderer;

/// Errors raised while producing a single page
#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("failed to render template: {0}")]
    Template(#[from] tera::Error),
}

impl PageError {
    /// Whether the page is missing because its post does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, PageError::Content(e) if e.is_not_found())
    }
}

/// Builds HTML pages from any post repository
pub struct Generator<R> {
    config: SiteConfig,
    repository: R,
    markdown: MarkdownRenderer,
    pages: PageRenderer,
}

impl<R: PostRepository> Generator<R> {
    /// Create a new generator
    pub fn new(config: &SiteConfig, repository: R) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            repository,
            markdown: MarkdownRenderer::with_options(config.markdown.heading_ids),
            pages: PageRenderer::new(config)?,
        })
    }

    /// Posts as they appear on the listing page
    pub fn listing(&self) -> Result<Vec<(String, PostSummary)>, ContentError> {
        let mut entries = self.repository.list()?;
        sort_entries(&mut entries, self.config.listing_order);

        Ok(entries
            .into_iter()
            .map(|entry| {
                let summary = render_summary(&entry.frontmatter);
                (entry.slug, summary)
            })
            .collect())
    }

    /// Render the listing page
    pub fn index_page(&self) -> Result<String, PageError> {
        let listing = self.listing()?;
        Ok(self
            .pages
            .index(listing.iter().map(|(slug, summary)| (slug.as_str(), summary)))?)
    }

    /// Render the page of a single post
    pub fn post_page(&self, slug: &str) -> Result<String, PageError> {
        let post = self.repository.get(slug)?;
        let summary = render_summary(&post.frontmatter);
        let body = self.markdown.render(&post.content);
        Ok(self.pages.post(&summary, &body)?)
    }

    /// Render the page shown for an unknown slug
    pub fn not_found_page(&self, slug: &str) -> Result<String, PageError> {
        Ok(self.pages.not_found(Some(slug))?)
    }

    /// Write every page into `output_dir`, returning the number of posts
    ///
    /// Listing links point at `/{blog_dir}/{slug}` without an extension.
    /// Posts are written as `{blog_dir}/{slug}.html`, which needs a server
    /// that resolves clean URLs, unless `pretty_urls` is set; then each post
    /// is written as `{blog_dir}/{slug}/index.html`.
    pub fn generate(&self, output_dir: &Path) -> Result<usize> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create dir {:?}", output_dir))?;

        write_page(&output_dir.join("index.html"), &self.index_page()?)?;

        let slugs = self.repository.slugs()?;
        for slug in &slugs {
            let html = self.post_page(slug)?;
            write_page(&self.post_path(output_dir, slug), &html)?;
        }

        write_page(&output_dir.join("404.html"), &self.pages.not_found(None)?)?;

        Ok(slugs.len())
    }

    /// Output file of a post page
    fn post_path(&self, output_dir: &Path, slug: &str) -> PathBuf {
        let post_dir = output_dir.join(self.config.blog_dir.trim_matches('/'));
        if self.config.pretty_urls {
            post_dir.join(slug).join("index.html")
        } else {
            post_dir.join(format!("{}.html", slug))
        }
    }
}

/// Order listing entries; sorting is stable so ties keep store order
fn sort_entries(entries: &mut [PostEntry], order: ListingOrder) {
    match order {
        ListingOrder::Directory => {}
        ListingOrder::Newest => entries.sort_by(|a, b| {
            let (a, b) = (a.frontmatter.parse_date(), b.frontmatter.parse_date());
            match (a, b) {
                (Some(a), Some(b)) => b.cmp(&a),
                (a, b) => b.is_some().cmp(&a.is_some()),
            }
        }),
        ListingOrder::Oldest => entries.sort_by(|a, b| {
            let (a, b) = (a.frontmatter.parse_date(), b.frontmatter.parse_date());
            match (a, b) {
                (Some(a), Some(b)) => a.cmp(&b),
                (a, b) => b.is_some().cmp(&a.is_some()),
            }
        }),
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}

/// Copy static assets (images, css) into the output directory
pub fn copy_static_assets(static_dir: &Path, output_dir: &Path) -> Result<usize> {
    if !static_dir.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(static_dir).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(static_dir)?;
        let dest = output_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)
            .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
        copied += 1;
    }

    Ok(copied)
}
