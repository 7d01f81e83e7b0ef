//! Headline view model and normalizer.

use crate::core::error::{FetchError, FetchResult, ProviderPayload};
use serde::Deserialize;
use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

pub const MAX_ITEMS: usize = 5;
pub const DESCRIPTION_LIMIT: usize = 100;

/// Headline category. Categories are free text, so anything outside the known
/// set is kept as [`NewsCategory::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NewsCategory {
    Technology,
    Business,
    Sports,
    Health,
    Entertainment,
    Science,
    Other(String),
}

impl NewsCategory {
    pub const KNOWN: [NewsCategory; 6] = [
        NewsCategory::Technology,
        NewsCategory::Business,
        NewsCategory::Sports,
        NewsCategory::Health,
        NewsCategory::Entertainment,
        NewsCategory::Science,
    ];

    /// Value sent to the provider.
    pub fn as_str(&self) -> &str {
        match self {
            NewsCategory::Technology => "technology",
            NewsCategory::Business => "business",
            NewsCategory::Sports => "sports",
            NewsCategory::Health => "health",
            NewsCategory::Entertainment => "entertainment",
            NewsCategory::Science => "science",
            NewsCategory::Other(s) => s,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NewsCategory::Technology => "💻",
            NewsCategory::Business => "💼",
            NewsCategory::Sports => "⚽",
            NewsCategory::Health => "⚕",
            NewsCategory::Entertainment => "🎬",
            NewsCategory::Science => "🔬",
            NewsCategory::Other(_) => "📰",
        }
    }

    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        Self::KNOWN
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| NewsCategory::Other(trimmed.to_string()))
    }

    /// "Technology", "Business", ...
    pub fn title(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for NewsCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

impl Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct HeadlinesPayload {
    pub status: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub articles: Option<Vec<ArticlePayload>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ArticlePayload {
    pub source: Option<SourcePayload>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SourcePayload {
    pub name: Option<String>,
}

impl ProviderPayload for HeadlinesPayload {
    fn provider_error(&self) -> Option<String> {
        if self.status.as_deref() != Some("error") {
            return None;
        }
        Some(
            self.message
                .clone()
                .or_else(|| self.code.clone())
                .unwrap_or_else(|| "News provider returned an error".to_string()),
        )
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Takes up to [`MAX_ITEMS`] articles, truncating descriptions.
pub fn normalize(payload: &HeadlinesPayload) -> FetchResult<Vec<NewsItem>> {
    if let Some(message) = payload.provider_error() {
        return Err(FetchError::provider(message));
    }

    let articles = payload
        .articles
        .as_ref()
        .ok_or_else(|| FetchError::empty("No articles available"))?;

    Ok(articles
        .iter()
        .take(MAX_ITEMS)
        .map(|article| NewsItem {
            title: article.title.clone().unwrap_or_default(),
            source: article
                .source
                .as_ref()
                .and_then(|s| s.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            description: truncate_chars(
                article.description.as_deref().unwrap_or_default(),
                DESCRIPTION_LIMIT,
            ),
            url: article.url.clone().unwrap_or_default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(i: usize, description: &str) -> String {
        format!(
            r#"{{"source": {{"id": null, "name": "Source {i}"}}, "author": null, "title": "Headline {i}",
                "description": "{description}", "url": "https://example.com/{i}"}}"#
        )
    }

    fn parse(json: &str) -> HeadlinesPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_takes_at_most_five_items() {
        let articles: Vec<String> = (0..8).map(|i| article(i, "short")).collect();
        let payload = parse(&format!(
            r#"{{"status": "ok", "totalResults": 8, "articles": [{}]}}"#,
            articles.join(",")
        ));
        let items = normalize(&payload).unwrap();
        assert_eq!(items.len(), MAX_ITEMS);
        assert_eq!(items[0].title, "Headline 0");
        assert_eq!(items[0].source, "Source 0");
        assert_eq!(items[4].url, "https://example.com/4");
    }

    #[test]
    fn test_description_is_truncated_by_characters() {
        let long = "é".repeat(150);
        let payload = parse(&format!(r#"{{"status": "ok", "articles": [{}]}}"#, article(1, &long)));
        let items = normalize(&payload).unwrap();
        assert_eq!(items[0].description.chars().count(), DESCRIPTION_LIMIT);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let payload = parse(r#"{"status": "ok", "articles": [{"title": "Bare"}]}"#);
        let items = normalize(&payload).unwrap();
        assert_eq!(items[0].source, "Unknown");
        assert_eq!(items[0].description, "");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let long = "word ".repeat(40);
        let articles: Vec<String> = (0..7).map(|i| article(i, &long)).collect();
        let payload = parse(&format!(
            r#"{{"status": "ok", "articles": [{}, {{"title": "Bare"}}]}}"#,
            articles.join(",")
        ));
        assert_eq!(normalize(&payload), normalize(&payload));
    }

    #[test]
    fn test_provider_error() {
        let payload = parse(
            r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid or incorrect."}"#,
        );
        assert_eq!(
            normalize(&payload),
            Err(FetchError::provider("Your API key is invalid or incorrect."))
        );
    }

    #[test]
    fn test_missing_articles_is_empty_result() {
        assert_eq!(
            normalize(&parse(r#"{"status": "ok"}"#)),
            Err(FetchError::empty("No articles available"))
        );
        assert_eq!(normalize(&parse(r#"{"status": "ok", "articles": []}"#)), Ok(vec![]));
    }

    #[test]
    fn test_category_parsing_and_icons() {
        assert_eq!("Sports".parse::<NewsCategory>().unwrap(), NewsCategory::Sports);
        assert_eq!(NewsCategory::Science.icon(), "🔬");

        let custom: NewsCategory = "crypto".parse().unwrap();
        assert_eq!(custom, NewsCategory::Other("crypto".to_string()));
        assert_eq!(custom.icon(), "📰");
        assert_eq!(custom.as_str(), "crypto");
        assert_eq!(custom.title(), "Crypto");
        assert_eq!(NewsCategory::Technology.title(), "Technology");
    }
}
