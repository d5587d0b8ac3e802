// Static HTML dashboard output.
//
// The page is a fixed template with `{{KEY}}` placeholders. Report data is
// embedded as one JSON object that the page's scripts turn into charts.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, TimeZone};
use hoopcast_stats::report::LeagueReport;
use tracing::{info, warn};

const TEMPLATE: &str = include_str!("../assets/dashboard.html");

/// Format a timestamp the way the page header shows it,
/// e.g. "March 02, 2026 at 09:15 PM -0800".
pub fn timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%B %d, %Y at %I:%M %p %z").to_string()
}

/// Render the full dashboard document for `report`.
pub fn render_html(report: &LeagueReport, generated_at: &str) -> anyhow::Result<String> {
    let json = script_safe_json(report)?;
    let title = escape_html(&report.league_name);
    let season = escape_html(&report.season_label);
    let week = report.current_week.to_string();
    let generated_at = escape_html(generated_at);

    Ok(fill(TEMPLATE, |key| match key {
        "LEAGUE_NAME" => Some(title.as_str()),
        "SEASON_LABEL" => Some(season.as_str()),
        "CURRENT_WEEK" => Some(week.as_str()),
        "GENERATED_AT" => Some(generated_at.as_str()),
        "REPORT_JSON" => Some(json.as_str()),
        _ => None,
    }))
}

/// Write `html` to `dir/filename`, creating `dir` if needed.
pub fn write_report(dir: &Path, filename: &str, html: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    info!("Wrote dashboard to {} ({} bytes)", path.display(), html.len());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serialize for embedding inside a `<script>` element.
fn script_safe_json(report: &LeagueReport) -> anyhow::Result<String> {
    let json = serde_json::to_string(report).context("failed to serialize report")?;
    Ok(json.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Single-pass placeholder substitution. Substituted values are never
/// rescanned; unknown keys are left in place.
fn fill<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match lookup(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        warn!(key, "unknown template placeholder");
                        out.push_str(&rest[start..start + end + 4]);
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
