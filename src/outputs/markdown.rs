//! Markdown rendering of a [`Report`].
//!
//! The layout follows the order the tiers were tried: a line per tier that came
//! up empty, the evidence of the deciding tier, the verdict with the model's
//! raw reasoning, and a footer naming the source that was used.

use crate::models::Verdict;
use crate::pipeline::{Evidence, Reasoning, Report, Tier};
use std::fmt::{self, Write};

/// Render `report` as Markdown.
pub fn report_to_markdown(report: &Report) -> String {
    let mut md = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut md, report);
    md
}

fn write_report(md: &mut String, report: &Report) -> fmt::Result {
    writeln!(md, "## Fact check: \"{}\"\n", report.claim)?;
    writeln!(
        md,
        "_Checked at {}_\n",
        report.checked_at.format("%Y-%m-%d %H:%M:%S")
    )?;

    for warning in &report.warnings {
        writeln!(md, "> **Warning:** {warning}\n")?;
    }

    let tier = report.tier();
    if tier != Tier::FactCheck {
        writeln!(md, "No fact-check found. Searching NewsAPI...\n")?;
    }
    if tier == Tier::WhoReleases {
        writeln!(
            md,
            "No news found in NewsAPI. Checking WHO's official website...\n"
        )?;
    }

    match &report.evidence {
        Evidence::FactChecks { reviews } => {
            writeln!(md, "Fact-check data found:\n")?;
            for review in reviews {
                writeln!(md, "**Claim:** {}", review.claim)?;
                writeln!(md, "- **Rating:** {}", review.rating)?;
                writeln!(md, "- **Publisher:** {}", review.publisher)?;
                if !review.url.is_empty() {
                    writeln!(md, "- [View Source]({})", review.url)?;
                }
                writeln!(md, "\n---\n")?;
            }
        }
        Evidence::News {
            articles,
            reasoning,
        } => {
            writeln!(md, "Found related recent news articles:\n")?;
            for context in articles {
                let article = &context.article;
                writeln!(md, "**{}**", article.title)?;
                writeln!(md, "- **Source:** {}", article.source.name)?;
                writeln!(md, "- **Published At:** {}", article.published_date())?;
                writeln!(md, "- [Read more]({})", article.url)?;
                writeln!(md, "\n---\n")?;
            }
            writeln!(md, "Reasoning with Gemini AI using full article content...\n")?;
            write_reasoning(md, reasoning, "Gemini Verdict")?;
        }
        Evidence::WhoReleases {
            releases,
            reasoning,
        } => {
            writeln!(md, "Found recent WHO articles. Verifying with Gemini AI...\n")?;
            for release in releases {
                if release.url.is_empty() {
                    writeln!(md, "- {}", release.title)?;
                } else {
                    writeln!(md, "- [{}]({})", release.title, release.url)?;
                }
            }
            writeln!(md)?;
            write_reasoning(md, reasoning, "Gemini Verdict (from WHO)")?;
        }
    }

    writeln!(md, "---\n")?;
    writeln!(md, "**Last Verified Using**: `{tier}`")?;
    Ok(())
}

fn write_reasoning(md: &mut String, reasoning: &Reasoning, heading: &str) -> fmt::Result {
    match reasoning {
        Reasoning::Answered { response, verdict } => {
            match verdict {
                Verdict::Fake => writeln!(md, "**🚨 {heading}: {verdict}**\n")?,
                Verdict::Real => writeln!(md, "**✅ {heading}: {verdict}**\n")?,
                Verdict::Unclear => writeln!(md, "**⚠️ {heading}: {verdict}**\n")?,
                Verdict::Unknown => writeln!(md, "**Gemini AI Response:**\n")?,
            }
            writeln!(md, "{}\n", response.trim_end())?;
        }
        Reasoning::Failed { reason } => {
            writeln!(md, "**Error calling Gemini:** {reason}\n")?;
        }
    }
    Ok(())
}
