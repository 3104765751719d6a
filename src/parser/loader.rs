use super::types::Report;
use crate::error::{ReportError, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A parsed report together with the scenario it belongs to
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub path: PathBuf,
    /// Human-readable scenario label derived from the file name
    pub label: String,
    /// Run time encoded in the file name prefix, when present
    pub recorded_at: Option<NaiveDateTime>,
    pub report: Report,
}

/// List `*.json` files directly inside `dir`, sorted by file name.
/// Symlinks are resolved, so a linked report counts like a regular file.
pub fn list_report_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            ReportError::from_io(&path, source)
        })?;

        let is_json = entry.file_name().to_string_lossy().ends_with(".json");
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Load the first `limit` reports of `dir` (all of them when `None`)
pub fn load_reports(dir: &Path, limit: Option<usize>) -> Result<Vec<ScenarioReport>> {
    let files = list_report_files(dir)?;
    log::info!("Found {} report files in {}", files.len(), dir.display());

    let take = limit.unwrap_or(files.len());
    files.iter().take(take).map(|p| load_scenario(p)).collect()
}

/// Load one report and derive its scenario label
pub fn load_scenario(path: &Path) -> Result<ScenarioReport> {
    let report = load_report(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ScenarioReport {
        path: path.to_path_buf(),
        label: scenario_label(&file_name),
        recorded_at: recorded_at(&file_name),
        report,
    })
}

/// Parse a report file
pub fn load_report(path: &Path) -> Result<Report> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::from_io(path, e))?;
    log::debug!("Loaded {} ({} bytes)", path.display(), content.len());

    parse_report(&content, path)
}

pub fn parse_report(content: &str, source_path: &Path) -> Result<Report> {
    serde_json::from_str(content).map_err(|source| ReportError::Json {
        path: source_path.to_path_buf(),
        source,
    })
}

/// Resolve a report name given on the command line.
///
/// Existing paths are used as-is, anything else is looked up inside the
/// reports directory.
pub fn resolve_report_path(reports_dir: &Path, name: &Path) -> PathBuf {
    if name.is_file() {
        name.to_path_buf()
    } else {
        reports_dir.join(name)
    }
}

/// Scenario label for a report file name.
///
/// `20251027_182628_頭痛.json` becomes `182628_頭痛`: the `.json` suffix is
/// removed and everything up to the first `_` is dropped. Names without a
/// `_` keep their full stem.
pub fn scenario_label(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
    match stem.split_once('_') {
        Some((_, rest)) => rest.to_string(),
        None => stem.to_string(),
    }
}

/// Timestamp prefix written by the harness (`YYYYMMDD_HHMMSS_...`)
pub fn recorded_at(file_name: &str) -> Option<NaiveDateTime> {
    let prefix = file_name.get(..15)?;
    NaiveDateTime::parse_from_str(prefix, "%Y%m%d_%H%M%S").ok()
}
