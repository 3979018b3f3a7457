//! Data models for claims, retrieved evidence, and verdicts.
//!
//! This module defines the structures that flow through a single fact-check:
//! - [`ClaimReview`]: An existing fact-check found by the claim-review search
//! - [`NewsArticle`]: A recent article returned by the news search
//! - [`NewsContext`]: A news article paired with its extracted body text
//! - [`InstitutionalArticle`]: An official release scraped from the WHO site
//! - [`Verdict`]: The category assigned to a model response
//!
//! Nothing here outlives a single query.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder content for a release page whose body did not match the expected layout.
pub const CONTENT_NOT_EXTRACTED: &str = "Content could not be extracted.";

/// An existing fact-check returned by the claim-review search.
///
/// Duplicates from upstream are passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReview {
    /// The claim as worded by the reviewer.
    pub claim: String,
    /// The reviewer's textual rating, e.g. `"False"` or `"Misleading"`.
    pub rating: String,
    /// Name of the publishing organization.
    pub publisher: String,
    /// Link to the published review; may be empty.
    pub url: String,
}

/// A news article returned by the news search, in upstream order (most recent first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: NewsSource,
    #[serde(rename = "publishedAt", default, deserialize_with = "null_as_default")]
    pub published_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

impl NewsArticle {
    /// The publication date as `YYYY-MM-DD`.
    ///
    /// Falls back to the first ten characters when the timestamp is not RFC 3339.
    pub fn published_date(&self) -> String {
        match chrono::DateTime::parse_from_rfc3339(&self.published_at) {
            Ok(ts) => ts.date_naive().to_string(),
            Err(_) => self.published_at.chars().take(10).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSource {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Body text pulled from a news article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractedText {
    Extracted { text: String },
    Failed { reason: String },
}

impl ExtractedText {
    /// The text handed to the model: the article body, or a note saying why there is none.
    pub fn as_prompt_text(&self) -> String {
        match self {
            ExtractedText::Extracted { text } => text.clone(),
            ExtractedText::Failed { reason } => {
                format!("Could not extract article text: {reason}")
            }
        }
    }
}

/// A news article together with whatever could be extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsContext {
    pub article: NewsArticle,
    pub text: ExtractedText,
}

/// An official release scraped from the WHO news room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionalArticle {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Category assigned to a model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Real,
    Fake,
    Unclear,
    /// None of the expected keywords appeared in the response.
    Unknown,
}

impl Verdict {
    /// Classify a free-text model response.
    ///
    /// The response is lowercased and searched for `"fake"`, then `"real"`, then
    /// `"unclear"`. The first hit wins, so `"not fake, it's real"` is [`Verdict::Fake`].
    /// This precedence is part of the contract and must not be reordered.
    pub fn classify(response: &str) -> Verdict {
        let lowered = response.to_lowercase();
        if lowered.contains("fake") {
            Verdict::Fake
        } else if lowered.contains("real") {
            Verdict::Real
        } else if lowered.contains("unclear") {
            Verdict::Unclear
        } else {
            Verdict::Unknown
        }
    }

    /// Human-readable label, `None` when no category was assigned.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Verdict::Real => Some("Likely Real"),
            Verdict::Fake => Some("Likely Fake"),
            Verdict::Unclear => Some("Unclear"),
            Verdict::Unknown => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("Unknown"))
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
