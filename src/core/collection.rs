//! Building the article collection and fetching single articles

use futures::future::join_all;
use serde::Serialize;

use super::article::Article;
use super::config::ArticleDefaults;
use super::date::cmp_newest_first;
use super::error::{BlogError, Result};
use super::store::DocumentStore;
use crate::render::{self, DisplayNode};

/// Maximum number of related articles shown under an article
pub const RELATED_LIMIT: usize = 3;

/// A document that could not be turned into an article
#[derive(Debug)]
pub struct DocumentFailure {
    pub slug: String,
    pub error: BlogError,
}

/// Articles sorted newest first, plus the documents that failed to load
#[derive(Debug, Default)]
pub struct ArticleCollection {
    pub articles: Vec<Article>,
    pub failures: Vec<DocumentFailure>,
}

impl ArticleCollection {
    /// Number of loaded articles
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether no article loaded
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Whether every document of the store loaded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Find an article by slug
    pub fn find(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    /// Articles in listing order
    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }

    /// Keep only fully successful batches
    pub fn into_complete(self) -> Result<Vec<Article>> {
        if self.failures.is_empty() {
            Ok(self.articles)
        } else {
            Err(BlogError::PartialCollection {
                failed: self.failures.len(),
                loaded: self.articles.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a ArticleCollection {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}

/// Everything a detail view shows for one article
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    pub article: Article,
    pub related: Vec<Article>,
    pub body: Vec<DisplayNode>,
}

/// Load and assemble every document of the store
///
/// Loads run concurrently and are all joined before sorting. A failing
/// document is logged and reported in `failures`; it never aborts the batch.
/// Ids are assigned in store order, then articles are sorted newest first
/// with unparseable dates last.
pub async fn load_all_articles<S: DocumentStore>(
    store: &S,
    defaults: &ArticleDefaults,
) -> ArticleCollection {
    let slugs = store.slugs();
    let loads = slugs.iter().map(|slug| store.load(slug));
    let results = join_all(loads).await;

    let mut collection = ArticleCollection::default();
    for (slug, result) in slugs.into_iter().zip(results) {
        match result {
            Ok(raw) => {
                let mut article = Article::from_document(&slug, &raw, defaults);
                article.id = collection.articles.len() + 1;
                collection.articles.push(article);
            }
            Err(error) => {
                tracing::error!("Error loading article {}: {}", slug, error);
                collection.failures.push(DocumentFailure { slug, error });
            }
        }
    }

    collection
        .articles
        .sort_by(|a, b| cmp_newest_first(&a.date, &b.date));

    tracing::debug!(
        "Loaded {} article(s), {} failure(s)",
        collection.articles.len(),
        collection.failures.len()
    );
    collection
}

/// Load the raw text of one article
pub async fn load_article<S: DocumentStore>(store: &S, slug: &str) -> Result<String> {
    if !store.contains(slug) {
        tracing::warn!("Article not found: {}", slug);
        return Err(BlogError::not_found(slug));
    }
    store.load(slug).await
}

/// Fetch one article with its content populated
///
/// The collection is built first so the article carries the same id as in
/// the listing.
pub async fn fetch_article_detail<S: DocumentStore>(
    store: &S,
    defaults: &ArticleDefaults,
    slug: &str,
) -> Result<Article> {
    let collection = load_all_articles(store, defaults).await;
    fetch_from_collection(store, &collection, slug).await
}

async fn fetch_from_collection<S: DocumentStore>(
    store: &S,
    collection: &ArticleCollection,
    slug: &str,
) -> Result<Article> {
    let Some(article) = collection.find(slug) else {
        if let Some(failure) = collection.failures.iter().find(|f| f.slug == slug) {
            return Err(match &failure.error {
                BlogError::LoadFailure { reason, .. } => BlogError::load_failure(slug, reason),
                other => BlogError::load_failure(slug, other),
            });
        }
        tracing::warn!("Article not found: {}", slug);
        return Err(BlogError::not_found(slug));
    };

    let content = load_article(store, slug).await?;
    Ok(article.clone().with_content(content))
}

/// Fetch an article, its related articles and its rendered body
pub async fn fetch_article_page<S: DocumentStore>(
    store: &S,
    defaults: &ArticleDefaults,
    slug: &str,
) -> Result<ArticlePage> {
    let collection = load_all_articles(store, defaults).await;
    let article = fetch_from_collection(store, &collection, slug).await?;
    let related = related_articles(&collection.articles, &article);
    let body = render::render(article.content.as_deref().unwrap_or_default());

    Ok(ArticlePage {
        article,
        related,
        body,
    })
}

/// Up to [`RELATED_LIMIT`] articles of the same category, in collection order
pub fn related_articles(collection: &[Article], current: &Article) -> Vec<Article> {
    collection
        .iter()
        .filter(|a| a.category == current.category && a.slug != current.slug)
        .take(RELATED_LIMIT)
        .cloned()
        .collect()
}
