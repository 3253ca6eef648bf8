//! Markdown rendering

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

/// Markdown to HTML renderer
///
/// Output is not sanitized: raw HTML in a post is passed through as-is.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    heading_ids: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self { heading_ids: true }
    }

    /// Create with custom settings
    pub fn with_options(heading_ids: bool) -> Self {
        Self { heading_ids }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off before rendering, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        if self.heading_ids {
            html::push_html(&mut html_output, with_heading_ids(parser).into_iter());
        } else {
            html::push_html(&mut html_output, parser);
        }
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render markdown with the default renderer
pub fn render_body(markdown: &str) -> String {
    MarkdownRenderer::new().render(markdown)
}

/// Give every heading without an explicit id one derived from its text
fn with_heading_ids<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut heading: Option<(Tag<'a>, Vec<Event<'a>>)> = None;
    let mut seen: HashMap<String, usize> = HashMap::new();

    for event in parser {
        match event {
            Event::Start(tag @ Tag::Heading { .. }) => {
                heading = Some((tag, Vec::new()));
            }
            Event::End(TagEnd::Heading(level)) => {
                let Some((tag, inner)) = heading.take() else {
                    events.push(Event::End(TagEnd::Heading(level)));
                    continue;
                };
                let tag = match tag {
                    Tag::Heading {
                        level,
                        id: None,
                        classes,
                        attrs,
                    } => Tag::Heading {
                        level,
                        id: Some(CowStr::from(unique_id(&heading_text(&inner), &mut seen))),
                        classes,
                        attrs,
                    },
                    other => other,
                };
                events.push(Event::Start(tag));
                events.extend(inner);
                events.push(Event::End(TagEnd::Heading(level)));
            }
            other => match heading.as_mut() {
                Some((_, inner)) => inner.push(other),
                None => events.push(other),
            },
        }
    }

    events
}

/// Plain text of a heading's inline events
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        if let Event::Text(t) | Event::Code(t) = event {
            text.push_str(t);
        }
    }
    text
}

/// Slugified id, suffixed until it differs from every id already handed out
///
/// `seen` maps each id to the last suffix used with it as the base.
fn unique_id(text: &str, seen: &mut HashMap<String, usize>) -> String {
    let base = match slug::slugify(text) {
        s if s.is_empty() => "section".to_string(),
        s => s,
    };

    let mut suffix = seen.get(&base).copied().unwrap_or(0);
    let mut id = base.clone();
    while seen.contains_key(&id) {
        suffix += 1;
        id = format!("{}-{}", base, suffix);
    }

    seen.insert(id.clone(), 0);
    seen.insert(base, suffix);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading() {
        let html = render_body("# Title");
        assert!(html.starts_with("<h1"));
        assert!(html.contains(">Title</h1>"));
    }

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::with_options(false);
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_ids() {
        let html = render_body("# Hello World\n\n## Hello World\n\n### `code` span");
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(html.contains(r#"<h2 id="hello-world-1">Hello World</h2>"#));
        assert!(html.contains(r#"<h3 id="code-span">"#));
    }

    #[test]
    fn test_heading_ids_never_collide() {
        let html = render_body("# A\n\n# A\n\n# A 1\n\n# A");
        assert!(html.contains(r#"<h1 id="a">A</h1>"#));
        assert!(html.contains(r#"<h1 id="a-1">A</h1>"#));
        assert!(html.contains(r#"<h1 id="a-1-1">A 1</h1>"#));
        assert!(html.contains(r#"<h1 id="a-2">A</h1>"#));
        assert_eq!(html.matches(r#"id="a-1""#).count(), 1);
    }

    #[test]
    fn test_heading_attribute_syntax_is_text() {
        let html = render_body("# Intro {#custom}");
        assert!(html.contains(r#"<h1 id="intro-custom">Intro {#custom}</h1>"#));
    }

    #[test]
    fn test_gfm_extensions() {
        let html = render_body("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render_body("<div class=\"note\">hi</div>\n");
        assert!(html.contains("<div class=\"note\">hi</div>"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_body(""), "");
    }
}
