//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub root: String,
    /// Route prefix for post pages (`/blog/{slug}`)
    pub blog_dir: String,
    /// Write posts as `{blog_dir}/{slug}/index.html` instead of `{slug}.html`
    pub pretty_urls: bool,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,
    pub output_dir: String,

    // Writing
    /// Extension (without the dot) that marks a file as a post
    pub post_extension: String,
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Home page
    pub listing_order: ListingOrder,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),

            root: "/".to_string(),
            blog_dir: "blog".to_string(),
            pretty_urls: false,

            posts_dir: "posts".to_string(),
            static_dir: "public".to_string(),
            output_dir: "out".to_string(),

            post_extension: "md".to_string(),
            markdown: MarkdownConfig::default(),

            listing_order: ListingOrder::Directory,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Post extension without a leading dot
    pub fn extension(&self) -> &str {
        self.post_extension.trim_start_matches('.')
    }
}

/// Order of posts on the listing page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Directory enumeration order, unsorted
    #[default]
    Directory,
    /// Newest `date` first
    Newest,
    /// Oldest `date` first
    Oldest,
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Add slugified `id` attributes to headings
    pub heading_ids: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { heading_ids: true }
    }
}
