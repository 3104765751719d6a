use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the two questionnaire engines under comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Engine {
    #[serde(rename = "cDiagnosis")]
    CDiagnosis,
    #[serde(rename = "askman")]
    Askman,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::CDiagnosis => write!(f, "c-diagnosis"),
            Engine::Askman => write!(f, "askman"),
        }
    }
}

/// A saved comparison report for one scenario run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Missing or null means failed
    #[serde(default, deserialize_with = "null_as_false")]
    pub passed: bool,

    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub scenario_name: Option<String>,

    #[serde(default)]
    pub summary: Option<RunSummary>,

    #[serde(default)]
    pub diseases: EnginePair<Vec<DiseaseResult>>,

    #[serde(default)]
    pub question_logs: EnginePair<Vec<QuestionEvent>>,

    #[serde(default)]
    pub differences: Differences,

    #[serde(default)]
    pub c_diagnosis_result: Option<EngineRun>,

    #[serde(default)]
    pub askman_result: Option<EngineRun>,
}

impl Report {
    /// Question log for an engine; an absent key reads as an empty log
    pub fn question_log(&self, engine: Engine) -> &[QuestionEvent] {
        self.question_logs.get(engine)
    }

    /// Execution error recorded for an engine, if any
    pub fn execution_error(&self, engine: Engine) -> Option<&str> {
        let run = match engine {
            Engine::CDiagnosis => self.c_diagnosis_result.as_ref(),
            Engine::Askman => self.askman_result.as_ref(),
        };
        run.and_then(|r| r.error.as_deref())
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A value recorded once per engine
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnginePair<T> {
    #[serde(rename = "cDiagnosis", default)]
    pub c_diagnosis: T,

    #[serde(default)]
    pub askman: T,
}

impl<T> EnginePair<T> {
    pub fn get(&self, engine: Engine) -> &T {
        match engine {
            Engine::CDiagnosis => &self.c_diagnosis,
            Engine::Askman => &self.askman,
        }
    }
}

/// One question presented and answered during a run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEvent {
    #[serde(default)]
    pub question_number: Option<u32>,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub question_text: String,

    #[serde(default)]
    pub available_options: Vec<String>,

    #[serde(default)]
    pub selected_option: String,

    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl QuestionEvent {
    pub fn new(question_text: &str, selected_option: &str) -> Self {
        Self {
            question_text: question_text.to_string(),
            selected_option: selected_option.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    #[serde(default)]
    pub c_diagnosis: EngineStats,
    #[serde(default)]
    pub askman: EngineStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStats {
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub disease_count: u32,
    #[serde(default)]
    pub execution_time_ms: u64,
}

/// Disease shown on an engine's result page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    /// "related" or "easily-missed"
    #[serde(default)]
    pub section: Option<String>,
}

/// Differences recorded by the harness at report time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Differences {
    #[serde(default)]
    pub disease_mismatch: Option<DiseaseMismatch>,

    #[serde(default)]
    pub question_count_mismatch: Option<EnginePair<u32>>,

    #[serde(default)]
    pub result_page_elements_mismatch: Option<ResultPageMismatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseMismatch {
    #[serde(default)]
    pub c_diagnosis_only: Vec<DiseaseResult>,
    #[serde(default)]
    pub askman_only: Vec<DiseaseResult>,
    #[serde(default)]
    pub order_mismatch: Option<bool>,
}

/// Result page element differences; the shapes are harness-defined
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultPageMismatch {
    #[serde(default)]
    pub banners: Option<serde_json::Value>,
    #[serde(default)]
    pub buttons: Option<serde_json::Value>,
    #[serde(default)]
    pub sections: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineRun {
    #[serde(default)]
    pub error: Option<String>,
}
