//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is on, so front-matter
//! text is escaped on output; rendered markdown and URLs built by the url
//! helpers are marked `safe` in the templates.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::{post_url, url_for};

/// Site-wide values available to every page as `site`
#[derive(Debug, Clone, Serialize)]
struct SiteData {
    title: String,
    description: String,
    author: String,
    home: String,
    stylesheet: String,
}

/// One card on the listing page
#[derive(Serialize)]
struct PostCard<'a> {
    url: String,
    #[serde(flatten)]
    summary: &'a PostSummary,
}

/// Renders full HTML documents for the site's pages
#[derive(Debug, Clone)]
pub struct PageRenderer {
    tera: Tera,
    site: SiteData,
    config: SiteConfig,
}

impl PageRenderer {
    /// Create a renderer with all pages loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("pages/layout.html")),
            ("index.html", include_str!("pages/index.html")),
            ("post_card.html", include_str!("pages/post_card.html")),
            ("post.html", include_str!("pages/post.html")),
            ("not_found.html", include_str!("pages/not_found.html")),
        ])?;

        let site = SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            home: url_for(config, ""),
            stylesheet: url_for(config, "css/style.css"),
        };

        Ok(Self {
            tera,
            site,
            config: config.clone(),
        })
    }

    /// Listing page with one card per post, in the given order
    pub fn index<'a, I>(&self, posts: I) -> tera::Result<String>
    where
        I: IntoIterator<Item = (&'a str, &'a PostSummary)>,
    {
        let cards: Vec<PostCard> = posts
            .into_iter()
            .map(|(slug, summary)| PostCard {
                url: post_url(&self.config, slug),
                summary,
            })
            .collect();

        let mut context = self.context();
        context.insert("posts", &cards);
        self.tera.render("index.html", &context)
    }

    /// A single post; `body_html` is inserted as-is
    pub fn post(&self, summary: &PostSummary, body_html: &str) -> tera::Result<String> {
        let mut context = self.context();
        context.insert("post", summary);
        context.insert("body", body_html);
        self.tera.render("post.html", &context)
    }

    /// Page shown for an unknown slug, or any missing page without one
    pub fn not_found(&self, slug: Option<&str>) -> tera::Result<String> {
        let mut context = self.context();
        context.insert("slug", &slug);
        self.tera.render("not_found.html", &context)
    }

    fn context(&self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context
    }
}
