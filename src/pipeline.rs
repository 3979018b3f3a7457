//! Three-tier fallback orchestration.
//!
//! A [`Checker`] runs one claim through the sources in a fixed order, moving on
//! only when the current tier produced nothing usable:
//!
//! 1. **Fact check**: existing claim reviews are shown as-is; nothing else runs
//! 2. **News**: recent articles are fetched one by one, then judged by the model
//! 3. **WHO releases**: official releases are scraped, then judged by the model
//!
//! Every call is awaited before the next one starts. Upstream failures never
//! abort a check; they become [`Report::warnings`] and, where the tier has
//! nothing else to offer, a fallback to the next tier.

use crate::api::AskAsync;
use crate::config::Config;
use crate::error::Result;
use crate::models::{ClaimReview, ExtractedText, InstitutionalArticle, NewsContext, Verdict};
use crate::reasoner::{reason_with_news, reason_with_releases};
use crate::sources::Sources;
use crate::sources::who::releases_or_placeholder;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument, warn};

/// The source tier a report was ultimately built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    FactCheck,
    News,
    WhoReleases,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::FactCheck => "Google Fact Check API",
            Tier::News => "NewsAPI",
            Tier::WhoReleases => "WHO Website",
        })
    }
}

/// Outcome of a model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reasoning {
    Answered { response: String, verdict: Verdict },
    Failed { reason: String },
}

impl Reasoning {
    /// `None` when the model call failed or the response named no category.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Reasoning::Answered { verdict, .. } if *verdict != Verdict::Unknown => Some(*verdict),
            _ => None,
        }
    }
}

impl From<Result<String>> for Reasoning {
    fn from(outcome: Result<String>) -> Self {
        match outcome {
            Ok(response) => Reasoning::Answered {
                verdict: Verdict::classify(&response),
                response,
            },
            Err(e) => Reasoning::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// What the deciding tier found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    FactChecks {
        reviews: Vec<ClaimReview>,
    },
    News {
        articles: Vec<NewsContext>,
        reasoning: Reasoning,
    },
    WhoReleases {
        releases: Vec<InstitutionalArticle>,
        reasoning: Reasoning,
    },
}

/// Result of checking one claim.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub claim: String,
    pub checked_at: DateTime<Local>,
    /// Upstream failures hit along the way, in the order they happened.
    pub warnings: Vec<String>,
    pub evidence: Evidence,
}

impl Report {
    pub fn tier(&self) -> Tier {
        match self.evidence {
            Evidence::FactChecks { .. } => Tier::FactCheck,
            Evidence::News { .. } => Tier::News,
            Evidence::WhoReleases { .. } => Tier::WhoReleases,
        }
    }

    pub fn reasoning(&self) -> Option<&Reasoning> {
        match &self.evidence {
            Evidence::FactChecks { .. } => None,
            Evidence::News { reasoning, .. } | Evidence::WhoReleases { reasoning, .. } => {
                Some(reasoning)
            }
        }
    }
}

/// Runs claims through the fallback chain.
#[derive(Debug)]
pub struct Checker<S, L> {
    sources: S,
    llm: L,
    max_news_articles: usize,
    max_releases: usize,
}

impl<S, L> Checker<S, L>
where
    S: Sources,
    L: AskAsync<Response = String>,
{
    pub fn new(sources: S, llm: L, config: &Config) -> Self {
        Self {
            sources,
            llm,
            max_news_articles: config.max_news_articles,
            max_releases: config.max_releases,
        }
    }

    /// Check `claim` and report what the first productive tier found.
    ///
    /// The claim is passed upstream exactly as given.
    #[instrument(level = "info", skip_all, fields(claim_bytes = claim.len()))]
    pub async fn check(&self, claim: &str) -> Report {
        let mut warnings = Vec::new();

        match self.sources.search_claims(claim).await {
            Ok(reviews) if !reviews.is_empty() => {
                info!(count = reviews.len(), "Fact-check data found");
                return Self::report(claim, warnings, Evidence::FactChecks { reviews });
            }
            Ok(_) => info!("No fact-check found; searching news"),
            Err(e) => {
                warn!(error = %e, "Fact check search failed; searching news");
                warnings.push(format!("Fact check search failed: {e}"));
            }
        }

        let articles = match self.sources.search_news(claim, self.max_news_articles).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!(error = %e, "News search failed; treating as no results");
                warnings.push(format!("News search failed: {e}"));
                Vec::new()
            }
        };

        if !articles.is_empty() {
            let mut contexts = Vec::with_capacity(articles.len());
            for article in articles {
                let text = match self.sources.extract_article(&article.url).await {
                    Ok(text) => ExtractedText::Extracted { text },
                    Err(e) => {
                        warn!(url = %article.url, error = %e, "Article extraction failed");
                        ExtractedText::Failed {
                            reason: e.to_string(),
                        }
                    }
                };
                contexts.push(NewsContext { article, text });
            }

            let reasoning = Reasoning::from(reason_with_news(&self.llm, claim, &contexts).await);
            info!(verdict = ?reasoning.verdict(), "News reasoning finished");
            return Self::report(
                claim,
                warnings,
                Evidence::News {
                    articles: contexts,
                    reasoning,
                },
            );
        }

        info!("No news found; checking WHO releases");
        let releases = releases_or_placeholder(self.sources.fetch_releases(self.max_releases).await);
        let reasoning = Reasoning::from(reason_with_releases(&self.llm, claim, &releases).await);
        info!(verdict = ?reasoning.verdict(), "WHO reasoning finished");
        Self::report(
            claim,
            warnings,
            Evidence::WhoReleases {
                releases,
                reasoning,
            },
        )
    }

    fn report(claim: &str, warnings: Vec<String>, evidence: Evidence) -> Report {
        Report {
            claim: claim.to_string(),
            checked_at: Local::now(),
            warnings,
            evidence,
        }
    }
}
