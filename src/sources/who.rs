//! WHO news room release scraper.
//!
//! This module scrapes the [WHO news room](https://www.who.int/news-room/releases)
//! as the last-resort evidence source. The listing page is fetched first, then
//! each linked release page in turn.
//!
//! # Failure Semantics
//!
//! Release pages are fetched one after another. Any failure aborts the whole
//! scrape; releases already fetched are discarded. [`releases_or_placeholder`]
//! turns the outcome into the entries handed to the model.

use crate::config::Config;
use crate::error::{Result, SourceError};
use crate::models::{CONTENT_NOT_EXTRACTED, InstitutionalArticle};
use crate::utils::collapse_whitespace;
use futures::stream::{self, StreamExt, TryStreamExt};
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::header::USER_AGENT;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static LISTING_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a.link-container").unwrap());
static DETAIL_PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.sf-detail-body-wrapper p").unwrap());

pub const NO_ARTICLES_TITLE: &str = "No articles found.";
pub const FETCH_ERROR_TITLE: &str = "Error fetching WHO news";

/// A release link found on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLink {
    pub title: String,
    pub url: String,
}

/// Extract the first `max` release links from the listing page.
///
/// Relative hrefs are resolved against `base`. A link without an href is an
/// error.
pub fn parse_release_links(html: &str, base: &Url, max: usize) -> Result<Vec<ReleaseLink>> {
    let document = Html::parse_document(html);

    document
        .select(&LISTING_LINK)
        .take(max)
        .map(|link| {
            let title = link
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .join(" ");
            let href = link.value().attr("href").unwrap_or_default().trim();
            if href.is_empty() {
                return Err(SourceError::Url {
                    url: href.to_string(),
                    message: format!("release link {title:?} has no href"),
                });
            }
            let url = base.join(href).map_err(|e| SourceError::Url {
                url: href.to_string(),
                message: e.to_string(),
            })?;
            Ok::<_, SourceError>(ReleaseLink {
                title,
                url: url.to_string(),
            })
        })
        .collect()
}

/// Join the body paragraphs of a release page, one per line.
///
/// Pages whose body does not match the expected layout yield
/// [`CONTENT_NOT_EXTRACTED`].
pub fn parse_release_body(html: &str) -> String {
    let document = Html::parse_document(html);
    let content = document
        .select(&DETAIL_PARAGRAPH)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .join("\n");

    if content.is_empty() {
        CONTENT_NOT_EXTRACTED.to_string()
    } else {
        content
    }
}

async fn fetch_page(client: &reqwest::Client, user_agent: &str, url: &str) -> Result<String> {
    Ok(client
        .get(url)
        .header(USER_AGENT, user_agent)
        .send()
        .await?
        .text()
        .await?)
}

/// Scrape up to `max_articles` releases from the WHO news room.
///
/// # Returns
///
/// The releases in listing order. An empty list means the listing page had no
/// matching links.
///
/// # Errors
///
/// Returns the first error encountered; no partial results are kept.
#[instrument(level = "info", skip_all, fields(max_articles = max_articles))]
pub async fn fetch_releases(
    client: &reqwest::Client,
    config: &Config,
    max_articles: usize,
) -> Result<Vec<InstitutionalArticle>> {
    let listing_url = config.who_releases_url.as_str();
    let base = Url::parse(listing_url).map_err(|e| SourceError::Url {
        url: listing_url.to_string(),
        message: e.to_string(),
    })?;
    let user_agent = config.user_agent.as_str();

    let html = fetch_page(client, user_agent, listing_url).await?;
    let links = parse_release_links(&html, &base, max_articles)?;
    info!(count = links.len(), source = listing_url, "Indexed WHO release links");
    debug!(links = ?links, "WHO links");

    let releases: Vec<InstitutionalArticle> = stream::iter(links)
        .then(|link| async move {
            let page = fetch_page(client, user_agent, &link.url).await?;
            let content = parse_release_body(&page);
            debug!(url = %link.url, bytes = content.len(), "Fetched WHO release");
            Ok::<_, SourceError>(InstitutionalArticle {
                title: link.title,
                url: link.url,
                content,
            })
        })
        .try_collect()
        .await?;

    info!(count = releases.len(), "Fetched WHO release contents");
    Ok(releases)
}

/// Turn a scrape outcome into the entries handed to the model.
///
/// - No links: a single `"No articles found."` entry with empty URL and content.
/// - Failure: a single `"Error fetching WHO news"` entry carrying the error text.
pub fn releases_or_placeholder(outcome: Result<Vec<InstitutionalArticle>>) -> Vec<InstitutionalArticle> {
    match outcome {
        Ok(releases) if !releases.is_empty() => releases,
        Ok(_) => vec![InstitutionalArticle {
            title: NO_ARTICLES_TITLE.to_string(),
            url: String::new(),
            content: String::new(),
        }],
        Err(e) => {
            warn!(error = %e, "WHO scrape failed");
            vec![InstitutionalArticle {
                title: FETCH_ERROR_TITLE.to_string(),
                url: String::new(),
                content: e.to_string(),
            }]
        }
    }
}
