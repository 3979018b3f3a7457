//! Verdict reasoning over retrieved context.
//!
//! Two entry points build a prompt from the claim plus the retrieved texts and
//! make one model call:
//! - [`reason_with_news`] for news articles and their extracted bodies
//! - [`reason_with_releases`] for scraped WHO releases
//!
//! The raw response is returned; classification into a
//! [`Verdict`](crate::models::Verdict) is left to the pipeline.

use crate::api::AskAsync;
use crate::error::Result;
use crate::models::{InstitutionalArticle, NewsContext};
use itertools::Itertools;
use tracing::{info, instrument};

/// Returned without calling the model when there are no news articles to reason over.
pub const NO_NEWS_CONTEXT: &str = "No news context available.";

const VERDICT_INSTRUCTIONS: &str = r#"determine if the claim is:
- "Likely Real"
- "Likely Fake"
- "Unclear"

Then explain your reasoning in 1–2 lines."#;

pub fn news_prompt(claim: &str, contexts: &[NewsContext]) -> String {
    let article_texts = contexts
        .iter()
        .map(|c| {
            format!(
                "Title: {}\nFull Text: {}",
                c.article.title,
                c.text.as_prompt_text()
            )
        })
        .join("\n\n");

    format!(
        "You are a fact-checking assistant.\n\n\
         Claim: \"{claim}\"\n\n\
         Below are full texts of recent related news articles:\n\n\
         {article_texts}\n\n\
         Based on the above sources, {VERDICT_INSTRUCTIONS}\n"
    )
}

pub fn release_prompt(claim: &str, releases: &[InstitutionalArticle]) -> String {
    let context = releases
        .iter()
        .map(|r| format!("Title: {}\nContent: {}", r.title, r.content))
        .join("\n\n");

    format!(
        "You are a fact-checking assistant with access to verified public health releases from WHO.\n\n\
         Claim: \"{claim}\"\n\n\
         Below are recent official releases from the World Health Organization:\n\n\
         {context}\n\n\
         Based on this information, {VERDICT_INSTRUCTIONS}\n"
    )
}

/// Ask the model to judge `claim` against recent news.
///
/// With no contexts the model is not called and [`NO_NEWS_CONTEXT`] is returned.
#[instrument(level = "info", skip_all, fields(contexts = contexts.len()))]
pub async fn reason_with_news<L>(llm: &L, claim: &str, contexts: &[NewsContext]) -> Result<String>
where
    L: AskAsync<Response = String>,
{
    if contexts.is_empty() {
        info!("No news context; skipping model call");
        return Ok(NO_NEWS_CONTEXT.to_string());
    }
    llm.ask(&news_prompt(claim, contexts)).await
}

/// Ask the model to judge `claim` against official WHO releases.
///
/// There is no empty-context guard here: an empty slice still produces a
/// model call with an empty context block.
#[instrument(level = "info", skip_all, fields(releases = releases.len()))]
pub async fn reason_with_releases<L>(
    llm: &L,
    claim: &str,
    releases: &[InstitutionalArticle],
) -> Result<String>
where
    L: AskAsync<Response = String>,
{
    llm.ask(&release_prompt(claim, releases)).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::models::{ExtractedText, NewsArticle, NewsSource};
    use std::sync::Mutex;

    /// Model double that records prompts and answers with a fixed reply.
    #[derive(Debug)]
    pub(crate) struct CannedModel {
        pub reply: Result<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl CannedModel {
        pub fn answering(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(err: SourceError) -> Self {
            Self {
                reply: Err(err),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl AskAsync for CannedModel {
        type Response = String;

        async fn ask(&self, text: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(text.to_string());
            self.reply.clone()
        }
    }

    fn context(title: &str, text: ExtractedText) -> NewsContext {
        NewsContext {
            article: NewsArticle {
                title: title.to_string(),
                source: NewsSource {
                    name: "Wire".to_string(),
                },
                published_at: "2025-05-06T10:00:00Z".to_string(),
                url: format!("https://example.com/{title}"),
            },
            text,
        }
    }

    #[test]
    fn test_news_prompt_embeds_claim_and_articles() {
        let contexts = vec![
            context(
                "X",
                ExtractedText::Extracted {
                    text: "Body of X".to_string(),
                },
            ),
            context(
                "Y",
                ExtractedText::Failed {
                    reason: "Network error: timed out".to_string(),
                },
            ),
        ];
        let prompt = news_prompt("Cats can fly", &contexts);

        assert!(prompt.starts_with("You are a fact-checking assistant.\n\nClaim: \"Cats can fly\""));
        assert!(prompt.contains("recent related news articles"));
        assert!(prompt.contains(
            "Title: X\nFull Text: Body of X\n\nTitle: Y\nFull Text: Could not extract article text: Network error: timed out"
        ));
        assert!(prompt.contains("- \"Likely Real\"\n- \"Likely Fake\"\n- \"Unclear\""));
        assert!(prompt.ends_with("Then explain your reasoning in 1–2 lines.\n"));
        assert!(!prompt.contains("WHO"));
    }

    #[test]
    fn test_release_prompt_mentions_who() {
        let releases = vec![InstitutionalArticle {
            title: "Malaria update".to_string(),
            url: "https://www.who.int/news/item/1".to_string(),
            content: "Cases fell.".to_string(),
        }];
        let prompt = release_prompt("Malaria is gone", &releases);

        assert!(prompt.contains("verified public health releases from WHO"));
        assert!(prompt.contains("official releases from the World Health Organization"));
        assert!(prompt.contains("Title: Malaria update\nContent: Cases fell."));
        assert!(prompt.contains("Claim: \"Malaria is gone\""));
    }

    #[tokio::test]
    async fn test_reason_with_news_empty_skips_model() {
        let model = CannedModel::answering("Likely Fake");
        let response = reason_with_news(&model, "claim", &[]).await.unwrap();
        assert_eq!(response, NO_NEWS_CONTEXT);
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_reason_with_releases_empty_still_calls_model() {
        let model = CannedModel::answering("Unclear");
        let response = reason_with_releases(&model, "claim", &[]).await.unwrap();
        assert_eq!(response, "Unclear");
        assert_eq!(model.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_is_returned() {
        let model = CannedModel::failing(SourceError::EmptyResponse);
        let contexts = vec![context(
            "X",
            ExtractedText::Extracted {
                text: "t".to_string(),
            },
        )];
        let err = reason_with_news(&model, "claim", &contexts).await.unwrap_err();
        assert_eq!(err, SourceError::EmptyResponse);
    }
}
