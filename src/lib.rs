//! Agence Blog - article pipeline for a web-agency blog
//!
//! Turns loosely structured markdown documents into article records:
//! header metadata, excerpts, date ordering, related articles, and a
//! sanitized rendering of the body.

pub mod core;
pub mod render;

pub use crate::core::article::{Article, Icon};
pub use crate::core::collection::{
    fetch_article_detail, fetch_article_page, load_all_articles, load_article, related_articles,
    ArticleCollection, ArticlePage, DocumentFailure,
};
pub use crate::core::config::{ArticleDefaults, BlogConfig};
pub use crate::core::error::{BlogError, Result};
pub use crate::core::store::{DirectoryStore, DocumentStore, MemoryStore};
pub use crate::render::{render, render_html, DisplayNode};
