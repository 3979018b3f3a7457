//! NewsAPI `everything` search.
//!
//! Asks for English-language articles matching the claim, sorted by
//! publication time, and returns them in the order NewsAPI gives them.

use crate::config::Config;
use crate::error::{Result, SourceError};
use crate::models::NewsArticle;
use serde::Deserialize;
use tracing::{debug, info, instrument};

#[derive(Debug, Default, Deserialize)]
pub struct NewsSearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
}

impl NewsSearchResponse {
    /// The articles, or the upstream error when NewsAPI reports `"status": "error"`.
    pub fn into_articles(self, http_status: u16) -> Result<Vec<NewsArticle>> {
        if self.status.as_deref() == Some("error") {
            return Err(SourceError::Upstream {
                status: http_status,
                message: self
                    .message
                    .unwrap_or_else(|| "NewsAPI reported an error".to_string()),
            });
        }
        Ok(self.articles)
    }
}

/// Search recent news for `claim`, newest first, up to `max_articles`.
#[instrument(level = "info", skip_all, fields(max_articles = max_articles))]
pub async fn search_news(
    client: &reqwest::Client,
    config: &Config,
    claim: &str,
    max_articles: usize,
) -> Result<Vec<NewsArticle>> {
    let page_size = max_articles.to_string();
    let response = client
        .get(&config.news_search_url)
        .query(&[
            ("q", claim),
            ("apiKey", config.news_api_key.as_str()),
            ("sortBy", "publishedAt"),
            ("language", "en"),
            ("pageSize", page_size.as_str()),
        ])
        .send()
        .await?;

    let http_status = response.status().as_u16();
    let body = response.text().await?;
    let mut articles =
        serde_json::from_str::<NewsSearchResponse>(&body)?.into_articles(http_status)?;
    articles.truncate(max_articles);

    info!(count = articles.len(), "News search finished");
    debug!(titles = ?articles.iter().map(|a| a.title.as_str()).collect::<Vec<_>>(), "News articles");
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_articles_are_returned_unmodified() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": "bbc-news", "name": "BBC News"},
                    "author": null,
                    "title": "Newest",
                    "description": "d",
                    "url": "https://bbc.co.uk/1",
                    "publishedAt": "2025-05-06T10:00:00Z",
                    "content": "c"
                },
                {
                    "source": {"id": null, "name": "Reuters"},
                    "title": "Older",
                    "url": "https://reuters.com/2",
                    "publishedAt": "2025-05-05T10:00:00Z"
                }
            ]
        }"#;
        let response: NewsSearchResponse = serde_json::from_str(json).unwrap();
        let articles = response.into_articles(200).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Newest");
        assert_eq!(articles[0].source.name, "BBC News");
        assert_eq!(articles[0].published_at, "2025-05-06T10:00:00Z");
        assert_eq!(articles[0].url, "https://bbc.co.uk/1");
        assert_eq!(articles[1].title, "Older");
        assert_eq!(articles[1].source.name, "Reuters");
    }

    #[test]
    fn test_missing_articles_is_empty() {
        let response: NewsSearchResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(response.into_articles(200).unwrap().is_empty());
    }

    #[test]
    fn test_error_status_is_an_error() {
        let json = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#;
        let response: NewsSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.into_articles(401),
            Err(SourceError::Upstream {
                status: 401,
                message: "Your API key is invalid.".to_string(),
            })
        );
    }
}
