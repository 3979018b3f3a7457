//! Upstream information sources consulted during a fact-check.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Google Fact Check Tools | [`factcheck`] | JSON API | Existing claim reviews |
//! | NewsAPI | [`newsapi`] | JSON API | Most recent English articles first |
//! | Arbitrary article page | [`extractor`] | HTML scraping | Readability-style paragraph extraction |
//! | WHO news room | [`who`] | HTML scraping | Listing page, then each release page |
//!
//! All of them sit behind the [`Sources`] trait so the pipeline can be driven
//! by canned responses in tests. Every call is awaited to completion before
//! the next one starts; none of them retry.

pub mod extractor;
pub mod factcheck;
pub mod newsapi;
pub mod who;

use crate::config::Config;
use crate::error::Result;
use crate::models::{ClaimReview, InstitutionalArticle, NewsArticle};

/// The four retrieval operations used by the fallback chain.
pub trait Sources {
    /// Search the claim-review database for existing fact-checks.
    async fn search_claims(&self, claim: &str) -> Result<Vec<ClaimReview>>;

    /// Search recent English-language news, newest first, up to `max_articles`.
    async fn search_news(&self, claim: &str, max_articles: usize) -> Result<Vec<NewsArticle>>;

    /// Fetch an article page and extract its readable body text.
    async fn extract_article(&self, url: &str) -> Result<String>;

    /// Scrape up to `max_articles` official releases.
    ///
    /// An empty list means the listing had no matching links.
    async fn fetch_releases(&self, max_articles: usize) -> Result<Vec<InstitutionalArticle>>;
}

/// [`Sources`] backed by real HTTP calls.
#[derive(Debug, Clone)]
pub struct HttpSources {
    client: reqwest::Client,
    config: Config,
}

impl HttpSources {
    pub fn new(client: reqwest::Client, config: Config) -> Self {
        Self { client, config }
    }
}

impl Sources for HttpSources {
    async fn search_claims(&self, claim: &str) -> Result<Vec<ClaimReview>> {
        factcheck::search_claims(&self.client, &self.config, claim).await
    }

    async fn search_news(&self, claim: &str, max_articles: usize) -> Result<Vec<NewsArticle>> {
        newsapi::search_news(&self.client, &self.config, claim, max_articles).await
    }

    async fn extract_article(&self, url: &str) -> Result<String> {
        extractor::extract_article(&self.client, url).await
    }

    async fn fetch_releases(&self, max_articles: usize) -> Result<Vec<InstitutionalArticle>> {
        who::fetch_releases(&self.client, &self.config, max_articles).await
    }
}
