//! # Awful Fact Check
//!
//! An interactive fact-checking assistant. Given a claim or headline, it
//! looks for evidence in three places, in order, and stops at the first one
//! that has something to say:
//!
//! 1. **Google Fact Check Tools**: existing reviews of the claim are shown as-is
//! 2. **NewsAPI**: recent articles are fetched and judged by Gemini
//! 3. **WHO news room**: official releases are scraped and judged by Gemini
//!
//! Gemini's answer is classified as "Likely Fake", "Likely Real" or "Unclear"
//! by keyword, checked in that order.
//!
//! ## Usage
//!
//! ```sh
//! export FACT_CHECK_API_KEY=... NEWS_API_KEY=... GEMINI_API_KEY=...
//! awful_fact_check                         # prompt for claims until EOF
//! awful_fact_check --claim "Garlic cures COVID-19"
//! ```

use clap::Parser;
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod reasoner;
mod sources;
mod utils;

use api::{AskAsync, GeminiClient};
use cli::Cli;
use config::Config;
use outputs::{json, markdown};
use pipeline::{Checker, Reasoning};
use sources::{HttpSources, Sources};
use utils::ensure_writable_dir;

const EMPTY_CLAIM_WARNING: &str = "⚠️ Please enter some text first.";

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("fact_check starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.json_output_dir, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref()).await?.apply_cli(&args);
    config.validate()?;
    info!(?config, "Configuration ready");

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let http = reqwest::Client::builder().build()?;
    let sources = HttpSources::new(http.clone(), config.clone());
    let llm = GeminiClient::new(http, &config);
    let checker = Checker::new(sources, llm, &config);

    match &args.claim {
        Some(claim) => run_claim(&checker, claim, args.json_output_dir.as_deref()).await,
        None => interactive(&checker, args.json_output_dir.as_deref()).await?,
    }

    info!("fact_check shutting down");
    Ok(())
}

/// Check one claim and print the report. Blank claims only print a warning.
async fn run_claim<S, L>(checker: &Checker<S, L>, claim: &str, json_output_dir: Option<&str>)
where
    S: Sources,
    L: AskAsync<Response = String>,
{
    if claim.trim().is_empty() {
        println!("{EMPTY_CLAIM_WARNING}\n");
        return;
    }

    let start_time = std::time::Instant::now();
    let report = checker.check(claim).await;
    println!("{}", markdown::report_to_markdown(&report));

    if let Some(dir) = json_output_dir {
        if let Err(e) = json::write_report(&report, dir).await {
            error!(error = %e, "Failed to write JSON report");
            println!("> **Error:** could not save JSON report: {e}\n");
        }
    }

    let elapsed = start_time.elapsed();
    let verdict = report.reasoning().and_then(Reasoning::verdict);
    info!(?elapsed, tier = %report.tier(), ?verdict, "Claim checked");
}

/// Prompt for claims, one per line, until end of input.
async fn interactive<S, L>(
    checker: &Checker<S, L>,
    json_output_dir: Option<&str>,
) -> Result<(), Box<dyn Error>>
where
    S: Sources,
    L: AskAsync<Response = String>,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("# Fake News Detector\n");
    println!(
        "Enter a news headline or short claim. It will be checked against Google's fact-check \
         database, NewsAPI, and official WHO sources. End input (Ctrl-D) to quit.\n"
    );

    loop {
        print!("📰 Claim> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        run_claim(checker, &line, json_output_dir).await;
    }

    Ok(())
}
