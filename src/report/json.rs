use anyhow::Result;
use serde::Serialize;

/// Analysis result wrapped with generation metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDocument<'a, T: Serialize> {
    pub generated_at: String,
    pub reports_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario_limit: Option<usize>,
    pub result: &'a T,
}

/// Render any analysis result as pretty JSON
pub fn generate<T: Serialize>(
    result: &T,
    reports_dir: &str,
    scenario_limit: Option<usize>,
) -> Result<String> {
    let doc = JsonDocument {
        generated_at: chrono::Local::now().to_rfc3339(),
        reports_dir: reports_dir.to_string(),
        scenario_limit,
        result,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
