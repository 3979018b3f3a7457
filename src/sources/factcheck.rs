//! Google Fact Check Tools claim search.
//!
//! Queries `claims:search` for reviews that already cover the claim. A response
//! without a `claims` key (including most error payloads) simply means nothing
//! was found.

use crate::config::Config;
use crate::error::Result;
use crate::models::ClaimReview;
use crate::utils::truncate_for_log;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default, Deserialize)]
pub struct ClaimSearchResponse {
    #[serde(default)]
    pub claims: Option<Vec<RawClaim>>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClaim {
    pub text: Option<String>,
    #[serde(default)]
    pub claim_review: Vec<RawReview>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    pub publisher: Option<RawPublisher>,
    pub textual_rating: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPublisher {
    pub name: Option<String>,
}

impl ClaimSearchResponse {
    /// Flatten into one [`ClaimReview`] per claim, using each claim's first review.
    ///
    /// Missing fields fall back to `"No claim text available"`, `"Unknown"`,
    /// `"Unrated"` and an empty URL.
    pub fn into_reviews(self) -> Vec<ClaimReview> {
        let Some(claims) = self.claims else {
            return Vec::new();
        };

        claims
            .into_iter()
            .map(|claim| {
                let review = claim.claim_review.into_iter().next().unwrap_or_default();
                ClaimReview {
                    claim: claim
                        .text
                        .unwrap_or_else(|| "No claim text available".to_string()),
                    rating: review.textual_rating.unwrap_or_else(|| "Unrated".to_string()),
                    publisher: review
                        .publisher
                        .and_then(|p| p.name)
                        .unwrap_or_else(|| "Unknown".to_string()),
                    url: review.url.unwrap_or_default(),
                }
            })
            .collect()
    }
}

/// Search the claim-review database for `claim`.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not JSON.
#[instrument(level = "info", skip_all, fields(claim_bytes = claim.len()))]
pub async fn search_claims(
    client: &reqwest::Client,
    config: &Config,
    claim: &str,
) -> Result<Vec<ClaimReview>> {
    let body = client
        .get(&config.fact_check_url)
        .query(&[("query", claim), ("key", config.fact_check_api_key.as_str())])
        .send()
        .await?
        .text()
        .await?;

    let response: ClaimSearchResponse = serde_json::from_str(&body)?;
    if let Some(error) = &response.error {
        warn!(error = %truncate_for_log(&error.to_string(), 300), "Fact check API returned an error payload");
    }

    let reviews = response.into_reviews();
    info!(count = reviews.len(), "Claim search finished");
    debug!(reviews = ?reviews, "Claim reviews");
    Ok(reviews)
}
