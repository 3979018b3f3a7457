//! Language-model interaction.
//!
//! # Architecture
//!
//! - [`AskAsync`]: Core trait defining a single prompt-in, text-out model call
//! - [`GeminiClient`]: Sends the prompt to Gemini's `generateContent` endpoint
//!
//! Each call is made exactly once. There is no retry or backoff; a failed call
//! surfaces as a [`SourceError`] and the caller decides how to present it.

use crate::config::Config;
use crate::error::{Result, SourceError};
use crate::utils::truncate_for_log;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Trait for async LLM interaction.
///
/// Implementors of this trait can send text to an LLM and receive a response.
/// The reasoner is generic over it so tests can substitute a canned model.
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send text to the LLM and receive a response.
    async fn ask(&self, text: &str) -> Result<Self::Response>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub(crate) fn into_text(self) -> Result<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            Err(SourceError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

/// Gemini text-generation client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl AskAsync for GeminiClient {
    type Response = String;

    #[instrument(level = "info", skip_all, fields(model = %self.model, prompt_bytes = text.len()))]
    async fn ask(&self, text: &str) -> Result<Self::Response> {
        let t0 = Instant::now();
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            warn!(
                elapsed_ms = dt.as_millis() as u64,
                status = status.as_u16(),
                body = %truncate_for_log(&body, 300),
                "Gemini call failed"
            );
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = serde_json::from_str::<GenerateResponse>(&body)?.into_text()?;
        info!(elapsed_ms = dt.as_millis() as u64, "Gemini call succeeded");
        debug!(response = %truncate_for_log(&text, 300), "Gemini response");
        Ok(text)
    }
}
