//! Readability-style article text extraction.
//!
//! Fetches an arbitrary news page and keeps the paragraphs of its main body.
//! Paragraphs are looked for under the most specific container first
//! (`article`, then `main`, then schema.org `articleBody`), falling back to
//! every `<p>` on the page.

use crate::error::Result;
use crate::utils::{collapse_whitespace, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

static BODY_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article p", "main p", "[itemprop=articleBody] p", "p"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

/// Extract readable body text from an HTML document.
///
/// Returns an empty string when the page has no paragraphs.
pub fn extract_readable_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector in BODY_SELECTORS.iter() {
        let paragraphs: Vec<String> = document
            .select(selector)
            .map(|p| collapse_whitespace(&p.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect();

        if !paragraphs.is_empty() {
            return paragraphs.join("\n\n");
        }
    }

    String::new()
}

/// Fetch `url` and extract its body text.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched or answers with a
/// non-success status.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn extract_article(client: &reqwest::Client, url: &str) -> Result<String> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let text = extract_readable_text(&html);
    info!(bytes = text.len(), "Extracted article text");
    debug!(preview = %truncate_for_log(&text, 200), "Article text");
    Ok(text)
}
