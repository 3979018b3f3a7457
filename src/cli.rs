//! Command-line interface definitions for Awful Fact Check.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials can be provided via command-line flags, environment variables,
//! or the optional YAML config file (flags and environment win).

use clap::Parser;

/// Command-line arguments for the Awful Fact Check application.
///
/// Without `--claim` the application starts an interactive prompt that checks
/// one claim per line until end of input.
///
/// # Examples
///
/// ```sh
/// # Interactive session, keys taken from the environment
/// awful_fact_check
///
/// # Check a single claim and exit
/// awful_fact_check --claim "Drinking bleach cures COVID-19"
///
/// # Keep a JSON copy of every report
/// awful_fact_check -j ./reports -c ./config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Check a single claim and exit instead of prompting
    #[arg(long)]
    pub claim: Option<String>,

    /// Output directory for JSON copies of each report
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Google Fact Check Tools API key
    #[arg(long, env = "FACT_CHECK_API_KEY", hide_env_values = true)]
    pub fact_check_api_key: Option<String>,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model used for reasoning
    #[arg(long, env = "GEMINI_MODEL")]
    pub gemini_model: Option<String>,

    /// Maximum number of news articles to reason over
    #[arg(long)]
    pub max_news_articles: Option<usize>,

    /// Maximum number of WHO releases to scrape
    #[arg(long)]
    pub max_releases: Option<usize>,
}
