//! Article records and their assembly from raw documents

use serde::{Deserialize, Serialize};

use super::config::ArticleDefaults;
use super::excerpt::extract_excerpt;
use super::metadata::{extract_metadata, Metadata};

/// Separator between tags in the `Tags` declaration
pub const TAG_SEPARATOR: &str = ", ";

/// Symbolic icon shown next to an article, chosen by category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Icon {
    #[default]
    Code,
    Search,
    TrendingUp,
    Shield,
}

impl Icon {
    /// Icon for a category; unknown categories get the WordPress icon
    pub fn for_category(category: &str) -> Self {
        match category {
            "WordPress" => Icon::Code,
            "SEO" => Icon::Search,
            "Performance" => Icon::TrendingUp,
            "Sécurité" => Icon::Shield,
            _ => Icon::Code,
        }
    }

    /// Icon name as used by the presentation layer
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Code => "Code",
            Icon::Search => "Search",
            Icon::TrendingUp => "TrendingUp",
            Icon::Shield => "Shield",
        }
    }
}

/// A blog article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Position in the collection it was built in; not an identity
    pub id: usize,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub image: String,
    /// Never empty
    pub tags: Vec<String>,
    pub icon: Icon,
    /// Full raw body; only set on single-article fetches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Title of a raw document: its first line without the `# ` marker
pub fn extract_title(content: &str) -> String {
    let first = content.lines().next().unwrap_or_default().trim_end();
    first.strip_prefix("# ").unwrap_or(first).to_string()
}

/// Split a `Tags` value into an ordered tag list
pub fn split_tags(value: &str) -> Vec<String> {
    value.split(TAG_SEPARATOR).map(str::to_string).collect()
}

impl Article {
    /// Assemble an article from its raw text, header metadata and excerpt
    ///
    /// Missing or empty metadata fields fall back to `defaults`. `content` is left
    /// unset; `id` starts at 0 and is assigned by the collection builder.
    pub fn assemble(
        slug: &str,
        raw: &str,
        metadata: &Metadata,
        excerpt: String,
        defaults: &ArticleDefaults,
    ) -> Self {
        let field = |label: &str, default: &str| {
            metadata
                .get(label)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| default.to_string())
        };

        let category = field("catégorie", &defaults.category);
        let tags = match metadata.get("tags") {
            Some(value) if !value.is_empty() => split_tags(value),
            _ if defaults.tags.is_empty() => vec![defaults.category.clone()],
            _ => defaults.tags.clone(),
        };

        Self {
            id: 0,
            slug: slug.to_string(),
            title: extract_title(raw),
            excerpt,
            icon: Icon::for_category(&category),
            category,
            author: field("auteur", &defaults.author),
            date: field("date", &defaults.date),
            read_time: field("temps de lecture", &defaults.read_time),
            image: field("image", &defaults.image),
            tags,
            content: None,
        }
    }

    /// Run the whole extraction pipeline on one raw document
    pub fn from_document(slug: &str, raw: &str, defaults: &ArticleDefaults) -> Self {
        let metadata = extract_metadata(raw);
        let excerpt = extract_excerpt(raw, &defaults.excerpt);
        tracing::debug!(
            "Assembled article {} ({} metadata field(s))",
            slug,
            metadata.len()
        );
        Self::assemble(slug, raw, &metadata, excerpt, defaults)
    }

    /// Attach the full body
    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDE_SEO: &str = "# Guide SEO\n\n**Catégorie:** SEO\n**Auteur:** Jane\n\n## Introduction\nCeci est un guide complet sur le SEO technique pour WordPress.\n\n## Suite\n...";

    #[test]
    fn test_guide_seo_scenario() {
        let article = Article::from_document("guide-seo", GUIDE_SEO, &ArticleDefaults::default());
        assert_eq!(article.title, "Guide SEO");
        assert_eq!(article.category, "SEO");
        assert_eq!(article.author, "Jane");
        assert_eq!(
            article.excerpt,
            "Ceci est un guide complet sur le SEO technique pour WordPress."
        );
        assert_eq!(article.icon, Icon::Search);
        assert_eq!(article.content, None);
    }

    #[test]
    fn test_defaults_apply_per_field() {
        let defaults = ArticleDefaults::default();
        let article = Article::from_document("vide", "# Vide\n\nRien.", &defaults);
        assert_eq!(article.category, "WordPress");
        assert_eq!(article.author, defaults.author);
        assert_eq!(article.date, "1 Mars 2024");
        assert_eq!(article.read_time, "5 min");
        assert_eq!(article.image, defaults.image);
        assert_eq!(article.tags, vec!["WordPress".to_string()]);
        assert_eq!(article.icon, Icon::Code);
        assert_eq!(article.excerpt, defaults.excerpt);
    }

    #[test]
    fn test_empty_declarations_use_defaults() {
        let defaults = ArticleDefaults::default();
        let article = Article::from_document(
            "t",
            "# T\n\n**Catégorie:**\n**Auteur:**\n**Date:**\n**Image:**  \n**Tags:**\n",
            &defaults,
        );
        assert_eq!(article.category, "WordPress");
        assert_eq!(article.author, defaults.author);
        assert_eq!(article.date, "1 Mars 2024");
        assert_eq!(article.image, defaults.image);
        assert_eq!(article.tags, defaults.tags);
        assert_eq!(article.icon, Icon::Code);
    }

    #[test]
    fn test_overridden_defaults() {
        let defaults = ArticleDefaults {
            author: "Studio Nord".to_string(),
            ..ArticleDefaults::default()
        };
        let article = Article::from_document("a", "# A", &defaults);
        assert_eq!(article.author, "Studio Nord");
    }

    #[test]
    fn test_tags_roundtrip() {
        let value = "SEO, WordPress, Core Web Vitals";
        let doc = format!("# T\n**Tags:** {}\n", value);
        let article = Article::from_document("t", &doc, &ArticleDefaults::default());
        assert_eq!(article.tags, split_tags(value));
        assert_eq!(article.tags.join(TAG_SEPARATOR), value);
    }

    #[test]
    fn test_unknown_category_uses_wordpress_icon() {
        let article = Article::from_document(
            "t",
            "# T\n**Catégorie:** Design\n",
            &ArticleDefaults::default(),
        );
        assert_eq!(article.category, "Design");
        assert_eq!(article.icon, Icon::Code);
        assert_eq!(Icon::for_category("Sécurité"), Icon::Shield);
        assert_eq!(Icon::for_category("Performance").name(), "TrendingUp");
    }

    #[test]
    fn test_title_strips_only_leading_marker() {
        assert_eq!(extract_title("# Le # du titre\nsuite"), "Le # du titre");
        assert_eq!(extract_title("Sans marqueur"), "Sans marqueur");
    }

    #[test]
    fn test_serializes_camel_case_without_content() {
        let article = Article::from_document("guide-seo", GUIDE_SEO, &ArticleDefaults::default());
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["readTime"], "5 min");
        assert_eq!(json["icon"], "Search");
        assert!(json.get("content").is_none());
    }
}
