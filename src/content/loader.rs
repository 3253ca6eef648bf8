//! Content loader - reads posts from a directory of markdown files

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::post::is_valid_slug;
use super::{ContentError, FrontMatter, Post, PostEntry};

/// A source of posts
///
/// Rendering code only talks to this trait, so flat files can be swapped
/// for another store without touching it.
pub trait PostRepository {
    /// Every post's slug and front-matter, in store order
    fn list(&self) -> Result<Vec<PostEntry>, ContentError>;

    /// A single post with its markdown body
    fn get(&self, slug: &str) -> Result<Post, ContentError>;

    /// Slugs of every post, used to enumerate routes
    fn slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.list()?.into_iter().map(|entry| entry.slug).collect())
    }
}

/// Posts stored as `<slug>.<extension>` files in one directory
#[derive(Debug, Clone)]
pub struct FsPostRepository {
    dir: PathBuf,
    extension: String,
}

impl FsPostRepository {
    /// Create a repository over `dir` for files ending in `.extension`
    pub fn new<P: AsRef<Path>>(dir: P, extension: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", slug, self.extension))
    }

    /// Slug for a post file, or None if the file is not a post
    fn slug_of(&self, path: &Path) -> Option<String> {
        if path.extension()? != self.extension.as_str() {
            return None;
        }
        match path.file_stem()?.to_str() {
            Some(stem) if is_valid_slug(stem) => Some(stem.to_string()),
            Some(_) => None,
            None => {
                tracing::warn!("Skipping post with non UTF-8 file name: {:?}", path);
                None
            }
        }
    }

    fn read(&self, path: &Path) -> Result<String, ContentError> {
        fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse<'c>(path: &Path, content: &'c str) -> Result<(FrontMatter, &'c str), ContentError> {
        FrontMatter::parse(content).map_err(|source| ContentError::MalformedFrontMatter {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl PostRepository for FsPostRepository {
    fn list(&self) -> Result<Vec<PostEntry>, ContentError> {
        if !self.dir.is_dir() {
            return Err(ContentError::DirectoryNotFound(self.dir.clone()));
        }

        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(slug) = self.slug_of(path) else {
                tracing::debug!("Ignoring non-post file {:?}", path);
                continue;
            };

            let content = self.read(path)?;
            let (frontmatter, _) = Self::parse(path, &content)?;
            tracing::debug!("Loaded post metadata: {}", slug);

            entries.push(PostEntry { slug, frontmatter });
        }

        Ok(entries)
    }

    fn get(&self, slug: &str) -> Result<Post, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::PostNotFound(slug.to_string()));
        }

        let path = self.path_for(slug);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ContentError::PostNotFound(slug.to_string()));
            }
            Err(source) => return Err(ContentError::Io { path, source }),
        };

        let (frontmatter, body) = Self::parse(&path, &content)?;
        tracing::debug!("Loaded post: {}", slug);

        Ok(Post {
            slug: slug.to_string(),
            frontmatter,
            content: body.to_string(),
        })
    }
}
