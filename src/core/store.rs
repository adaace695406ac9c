//! Document stores: slug → raw markdown text

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use super::error::{BlogError, Result};

/// A read-only mapping from slug to the raw text of one document
pub trait DocumentStore: Send + Sync {
    /// All known slugs, in store order, without duplicates
    fn slugs(&self) -> Vec<String>;

    /// Load the raw text of one document
    ///
    /// Returns [`BlogError::NotFound`] for an unknown slug and
    /// [`BlogError::LoadFailure`] when the document cannot be read.
    fn load(&self, slug: &str) -> impl Future<Output = Result<String>> + Send;

    /// Check whether a slug is known
    fn contains(&self, slug: &str) -> bool {
        self.slugs().iter().any(|s| s == slug)
    }
}

type Loader = Arc<dyn Fn() -> Result<String> + Send + Sync>;

/// In-memory store backed by loader closures
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Vec<(String, Loader)>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("slugs", &self.slugs())
            .finish()
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document with fixed text
    pub fn with_document(self, slug: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with_loader(slug, move || Ok(text.clone()))
    }

    /// Register a loader; an existing slug keeps its position and gets the new loader
    pub fn with_loader<F>(mut self, slug: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<String> + Send + Sync + 'static,
    {
        let slug = slug.into();
        let loader: Loader = Arc::new(loader);
        match self.entries.iter_mut().find(|(s, _)| *s == slug) {
            Some(entry) => entry.1 = loader,
            None => self.entries.push((slug, loader)),
        }
        self
    }

    fn loader(&self, slug: &str) -> Option<Loader> {
        self.entries
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, loader)| Arc::clone(loader))
    }
}

impl DocumentStore for MemoryStore {
    fn slugs(&self) -> Vec<String> {
        self.entries.iter().map(|(s, _)| s.clone()).collect()
    }

    fn load(&self, slug: &str) -> impl Future<Output = Result<String>> + Send {
        let loader = self.loader(slug);
        let slug = slug.to_string();
        async move {
            let loader = loader.ok_or_else(|| BlogError::not_found(&slug))?;
            let text = loader().map_err(|e| match e {
                BlogError::LoadFailure { .. } => e,
                other => BlogError::load_failure(&slug, other),
            })?;
            check_well_formed(&slug, text)
        }
    }
}

/// Store reading `<slug>.md` files from a directory tree
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    entries: Vec<(String, PathBuf)>,
}

impl DirectoryStore {
    /// Scan a directory for markdown documents
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(BlogError::config(format!(
                "Content directory does not exist: {}",
                root.display()
            )));
        }

        let mut entries: Vec<(String, PathBuf)> = Vec::new();
        for path in get_markdown_files(root) {
            let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            if let Some((_, existing)) = entries.iter().find(|(s, _)| *s == slug) {
                tracing::warn!(
                    "Duplicate slug {} at {}, keeping {}",
                    slug,
                    path.display(),
                    existing.display()
                );
                continue;
            }
            entries.push((slug, path));
        }

        tracing::debug!("Found {} article(s) in {}", entries.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing a slug
    pub fn path_of(&self, slug: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, p)| p.as_path())
    }
}

impl DocumentStore for DirectoryStore {
    fn slugs(&self) -> Vec<String> {
        self.entries.iter().map(|(s, _)| s.clone()).collect()
    }

    fn load(&self, slug: &str) -> impl Future<Output = Result<String>> + Send {
        let path = self.path_of(slug).map(Path::to_path_buf);
        let slug = slug.to_string();
        async move {
            let path = path.ok_or_else(|| BlogError::not_found(&slug))?;
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| BlogError::load_failure(&slug, format!("{}: {}", path.display(), e)))?;
            check_well_formed(&slug, text)
        }
    }
}

/// A document must at least have a non-blank first line to carry a title
fn check_well_formed(slug: &str, text: String) -> Result<String> {
    match text.lines().next() {
        Some(first) if !first.trim().is_empty() => Ok(text),
        _ => Err(BlogError::load_failure(slug, "document has no title line")),
    }
}

/// Get all markdown files in a directory recursively, sorted, hidden entries skipped
fn get_markdown_files(path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "md" || ext == "markdown")
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[test]
    fn test_memory_store_keeps_insertion_order() {
        let store = MemoryStore::new()
            .with_document("b", "# B")
            .with_document("a", "# A")
            .with_document("b", "# B2");
        assert_eq!(store.slugs(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(block_on(store.load("b")).unwrap(), "# B2");
    }

    #[test]
    fn test_memory_store_unknown_slug() {
        let store = MemoryStore::new().with_document("a", "# A");
        let err = block_on(store.load("zzz")).unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.contains("zzz"));
    }

    #[test]
    fn test_failing_loader_is_load_failure() {
        let store = MemoryStore::new()
            .with_loader("broken", || Err(BlogError::Io(std::io::Error::other("gone"))));
        let err = block_on(store.load("broken")).unwrap_err();
        assert!(matches!(err, BlogError::LoadFailure { ref slug, .. } if slug == "broken"));
    }

    #[test]
    fn test_blank_document_is_malformed() {
        let store = MemoryStore::new().with_document("empty", "  \n\nbody");
        let err = block_on(store.load("empty")).unwrap_err();
        assert!(matches!(err, BlogError::LoadFailure { .. }));
    }

    #[test]
    fn test_directory_store_scans_markdown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("guide-seo.md"), "# Guide SEO\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("archive")).unwrap();
        std::fs::write(dir.path().join("archive/vieux.markdown"), "# Vieux\n").unwrap();
        std::fs::write(dir.path().join(".brouillon.md"), "# Hidden\n").unwrap();

        let store = DirectoryStore::open(dir.path()).unwrap();
        let mut slugs = store.slugs();
        slugs.sort();
        assert_eq!(slugs, vec!["guide-seo".to_string(), "vieux".to_string()]);
        assert_eq!(block_on(store.load("guide-seo")).unwrap(), "# Guide SEO\n");
        assert!(block_on(store.load("notes")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_directory_store_missing_root() {
        let err = DirectoryStore::open(Path::new("/no/such/articles")).unwrap_err();
        assert!(matches!(err, BlogError::Config(_)));
    }
}
