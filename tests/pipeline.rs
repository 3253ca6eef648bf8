use std::collections::HashSet;
use std::fs;

use markblog::content::{render_body, render_summary, PostRepository};
use markblog::Blog;

fn write_post(dir: &std::path::Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn site() -> (tempfile::TempDir, Blog) {
    let dir = tempfile::tempdir().unwrap();
    let posts = dir.path().join("posts");
    fs::create_dir(&posts).unwrap();

    write_post(
        &posts,
        "round-trip.md",
        "---\ntitle: \"T\"\ndate: \"2020-01-01\"\n---\nHello",
    );
    write_post(
        &posts,
        "with-excerpt.md",
        "---\ntitle: Excerpted\ndate: 2021-06-01\nexcerpt: A short teaser\ncover_image: /images/posts/img1.jpg\n---\n# Heading\n\nText.\n",
    );
    write_post(&posts, "bare.md", "No front-matter at all.\n");

    let blog = Blog::new(dir.path()).unwrap();
    (dir, blog)
}

#[test]
fn slugs_match_post_files() {
    let (_dir, blog) = site();
    let slugs = blog.repository().slugs().unwrap();

    let unique: HashSet<_> = slugs.iter().map(String::as_str).collect();
    assert_eq!(slugs.len(), 3);
    assert_eq!(
        unique,
        HashSet::from(["round-trip", "with-excerpt", "bare"])
    );
}

#[test]
fn every_slug_loads() {
    let (_dir, blog) = site();
    let repository = blog.repository();
    for slug in repository.slugs().unwrap() {
        let post = repository.get(&slug).unwrap();
        assert_eq!(post.slug, slug);
    }
}

#[test]
fn nonexistent_post_is_not_found() {
    let (_dir, blog) = site();
    let err = blog.repository().get("nonexistent").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn round_trip_keeps_values() {
    let (_dir, blog) = site();
    let post = blog.repository().get("round-trip").unwrap();
    assert_eq!(post.frontmatter.title().as_deref(), Some("T"));
    assert_eq!(post.frontmatter.date().as_deref(), Some("2020-01-01"));
    assert_eq!(post.content, "Hello");
}

#[test]
fn summaries_and_bodies_render() {
    let (_dir, blog) = site();
    let repository = blog.repository();

    let post = repository.get("with-excerpt").unwrap();
    let summary = render_summary(&post.frontmatter);
    assert_eq!(summary.excerpt, "A short teaser");
    assert_eq!(
        post.frontmatter.cover_image().as_deref(),
        Some("/images/posts/img1.jpg")
    );
    assert!(render_body(&post.content).contains(">Heading</h1>"));

    let bare = repository.get("bare").unwrap();
    let summary = render_summary(&bare.frontmatter);
    assert_eq!(summary.title, "");
    assert_eq!(summary.excerpt, "");
    assert_eq!(bare.content, "No front-matter at all.\n");
}

#[test]
fn build_writes_listing_and_posts() {
    let (dir, blog) = site();
    blog.build().unwrap();

    let out = dir.path().join("out");
    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("Published on 2021-06-01"));
    for slug in ["round-trip", "with-excerpt", "bare"] {
        assert!(index.contains(&format!("href=\"/blog/{}\"", slug)));
        assert!(out.join("blog").join(format!("{}.html", slug)).is_file());
    }

    blog.clean().unwrap();
    assert!(!out.exists());
}

#[test]
fn pretty_urls_match_listing_links() {
    let (dir, _) = site();
    fs::write(dir.path().join("_config.yml"), "pretty_urls: true\n").unwrap();
    let blog = Blog::new(dir.path()).unwrap();
    blog.build().unwrap();

    let out = dir.path().join("out");
    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("href=\"/blog/bare\""));
    assert!(out.join("blog/bare/index.html").is_file());
}
