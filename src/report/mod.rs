pub mod json;
pub mod junit;
pub mod text;

use crate::compare::{DivergenceSummary, FailureAnalysis, ScenarioDetail};
use crate::utils::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Render a batch summary in the requested format (text, json, junit)
pub fn render_summary(summary: &DivergenceSummary, config: &Config, format: &str) -> Result<String> {
    match format {
        "text" => Ok(text::render_summary(summary, config)?),
        "json" => json::generate(
            summary,
            &config.reports_dir.display().to_string(),
            config.scenario_limit,
        ),
        "junit" => junit::generate_junit_xml(summary, &chrono::Local::now().to_rfc3339()),
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

/// Render a single-scenario detail (text, json)
pub fn render_detail(detail: &ScenarioDetail, config: &Config, format: &str) -> Result<String> {
    match format {
        "text" => Ok(text::render_detail(detail)?),
        "json" => json::generate(detail, &config.reports_dir.display().to_string(), None),
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

/// Render a failure-pattern analysis (text, json)
pub fn render_failures(analysis: &FailureAnalysis, config: &Config, format: &str) -> Result<String> {
    match format {
        "text" => Ok(text::render_failures(analysis)?),
        "json" => json::generate(analysis, &config.reports_dir.display().to_string(), None),
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

/// Write rendered output to a file, or stdout when no file is given
pub fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!("Report saved to: {}", path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}
