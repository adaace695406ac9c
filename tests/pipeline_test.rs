//! End-to-end tests of the article pipeline

use agence_blog::core::date::parse_article_date;
use agence_blog::render::ElementKind;
use agence_blog::{
    fetch_article_detail, fetch_article_page, load_all_articles, load_article, ArticleDefaults,
    BlogError, DirectoryStore, DocumentStore, Icon, MemoryStore,
};

const GUIDE_SEO: &str = "# Guide SEO\n\n**Catégorie:** SEO\n**Auteur:** Jane\n\n## Introduction\nCeci est un guide complet sur le SEO technique pour WordPress.\n\n## Suite\n...";

fn article(title: &str, category: &str, date: &str) -> String {
    format!(
        "# {}\n\n**Catégorie:** {}\n**Date:** {}\n**Tags:** {}, WordPress\n\n## Introduction\nRésumé de {}.\n\n## Détails\n\n- un\n- deux\n",
        title, category, date, category, title
    )
}

#[tokio::test]
async fn test_failing_loader_is_isolated() {
    let store = MemoryStore::new()
        .with_document("premier", article("Premier", "SEO", "1 Mars 2024"))
        .with_loader("second", || {
            Err(BlogError::Io(std::io::Error::other("asset missing")))
        })
        .with_document("troisieme", article("Troisième", "SEO", "2 Mars 2024"));

    let collection = load_all_articles(&store, &ArticleDefaults::default()).await;

    let mut slugs: Vec<&str> = collection.iter().map(|a| a.slug.as_str()).collect();
    slugs.sort();
    assert_eq!(slugs, vec!["premier", "troisieme"]);
    assert_eq!(collection.failures.len(), 1);
    assert_eq!(collection.failures[0].slug, "second");
    assert!(matches!(
        collection.failures[0].error,
        BlogError::LoadFailure { .. }
    ));
}

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let store = MemoryStore::new().with_document("guide-seo", GUIDE_SEO);
    let err = load_article(&store, "unknown-slug").await.unwrap_err();
    assert!(matches!(err, BlogError::NotFound(ref slug) if slug == "unknown-slug"));
}

#[tokio::test]
async fn test_listing_is_sorted_and_detail_has_content() {
    let store = MemoryStore::new()
        .with_document("a", article("A", "SEO", "5 Janvier 2024"))
        .with_document("b", article("B", "Performance", "20 Février 2024"))
        .with_document("c", article("C", "Sécurité", "1er Avril 2024"))
        .with_document("guide-seo", GUIDE_SEO);
    let defaults = ArticleDefaults::default();

    let collection = load_all_articles(&store, &defaults).await;
    assert_eq!(collection.len(), 4);
    let dates: Vec<_> = collection
        .iter()
        .map(|a| parse_article_date(&a.date).unwrap())
        .collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    assert!(collection.iter().all(|a| a.content.is_none()));
    assert!(collection.iter().all(|a| !a.tags.is_empty()));

    let ids: Vec<usize> = {
        let mut ids: Vec<usize> = collection.iter().map(|a| a.id).collect();
        ids.sort();
        ids
    };
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let detail = fetch_article_detail(&store, &defaults, "guide-seo").await.unwrap();
    assert_eq!(detail.title, "Guide SEO");
    assert_eq!(detail.icon, Icon::Search);
    assert_eq!(detail.date, "1 Mars 2024");
    assert_eq!(detail.content.as_deref(), Some(GUIDE_SEO));
    assert_eq!(detail.id, collection.find("guide-seo").unwrap().id);
}

#[tokio::test]
async fn test_article_page() {
    let store = MemoryStore::new()
        .with_document("s1", article("S1", "SEO", "1 Mai 2024"))
        .with_document("s2", article("S2", "SEO", "2 Mai 2024"))
        .with_document("perf", article("Perf", "Performance", "3 Mai 2024"))
        .with_document("guide-seo", GUIDE_SEO);

    let page = fetch_article_page(&store, &ArticleDefaults::default(), "s1")
        .await
        .unwrap();
    let related: Vec<&str> = page.related.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(related, vec!["s2", "guide-seo"]);
    assert!(page.related.iter().all(|a| a.category == "SEO"));
    assert_eq!(page.body[0].kind(), Some(ElementKind::Heading1));
    assert!(page
        .body
        .iter()
        .any(|n| n.kind() == Some(ElementKind::UnorderedList)));

    let err = fetch_article_page(&store, &ArticleDefaults::default(), "absent")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_directory_store_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("optimiser-vitesse.md"),
        article("Optimiser la vitesse", "Performance", "12 Mars 2024"),
    )
    .unwrap();
    std::fs::write(dir.path().join("vide.md"), "").unwrap();

    let store = DirectoryStore::open(dir.path()).unwrap();
    assert!(store.contains("vide"));

    let collection = load_all_articles(&store, &ArticleDefaults::default()).await;
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.articles[0].icon, Icon::TrendingUp);
    assert_eq!(
        collection.articles[0].tags,
        vec!["Performance".to_string(), "WordPress".to_string()]
    );
    assert_eq!(collection.failures.len(), 1);
    assert_eq!(collection.failures[0].slug, "vide");
    assert!(collection.into_complete().is_err());
}
