//! JSON copies of fact-check reports.
//!
//! Each report is written to its own file under a directory named for the
//! local date it was checked:
//! `{json_output_dir}/{YYYY-MM-DD}/{HHMMSSmmm}_{claim-slug}.json`.

use crate::pipeline::Report;
use crate::utils::slugify_title;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

const SLUG_LEN: usize = 60;

/// Path the report will be written to, relative to `json_output_dir`.
pub fn report_path(report: &Report, json_output_dir: &str) -> PathBuf {
    let date = report.checked_at.format("%Y-%m-%d").to_string();
    let mut slug = slugify_title(&report.claim, SLUG_LEN);
    if slug.is_empty() {
        slug = "claim".to_string();
    }
    let file = format!("{}_{}.json", report.checked_at.format("%H%M%S%3f"), slug);
    Path::new(json_output_dir).join(date).join(file)
}

/// Serialize `report` and write it under `json_output_dir`.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(report: &Report, json_output_dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let path = report_path(report, json_output_dir);

    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON report");
    Ok(path)
}
