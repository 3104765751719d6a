use super::classify::{first_divergence, question_id, DivergenceKind};
use crate::parser::types::{DiseaseResult, Engine, QuestionEvent, Report};
use serde::Serialize;

/// One engine's side of a divergent question
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuestionSide {
    pub question_id: String,
    pub question_text: String,
    pub selected_option: String,
}

impl QuestionSide {
    fn from_event(event: &QuestionEvent) -> Self {
        Self {
            question_id: question_id(&event.url).to_string(),
            question_text: event.question_text.clone(),
            selected_option: event.selected_option.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetailOutcome {
    /// First divergence inside the overlapping prefix
    Diverged {
        q_num: usize,
        same_question: bool,
        c_diagnosis: QuestionSide,
        askman: QuestionSide,
    },
    /// Overlap matches but one engine asked more questions
    CountOnly { c_count: usize, a_count: usize },
    /// Every question and answer matches
    Identical { count: usize },
}

/// Full comparison of one scenario's question flows
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioDetail {
    pub name: String,
    pub c_count: usize,
    pub a_count: usize,
    pub outcome: DetailOutcome,
    /// Diseases reported by only one engine, when the harness recorded it
    pub c_diagnosis_only: Vec<DiseaseResult>,
    pub askman_only: Vec<DiseaseResult>,
}

impl ScenarioDetail {
    pub fn has_disease_mismatch(&self) -> bool {
        !self.c_diagnosis_only.is_empty() || !self.askman_only.is_empty()
    }
}

/// Compare one report in detail, including question IDs for the first
/// divergence.
pub fn compare_detail(name: &str, report: &Report) -> ScenarioDetail {
    let c = report.question_log(Engine::CDiagnosis);
    let a = report.question_log(Engine::Askman);

    let outcome = match first_divergence(c, a) {
        Some(div) => DetailOutcome::Diverged {
            q_num: div.q_num(),
            same_question: div.kind == DivergenceKind::Answer,
            c_diagnosis: QuestionSide::from_event(&c[div.index]),
            askman: QuestionSide::from_event(&a[div.index]),
        },
        None if c.len() != a.len() => DetailOutcome::CountOnly {
            c_count: c.len(),
            a_count: a.len(),
        },
        None => DetailOutcome::Identical { count: c.len() },
    };

    let (c_diagnosis_only, askman_only) = match &report.differences.disease_mismatch {
        Some(dm) => (dm.c_diagnosis_only.clone(), dm.askman_only.clone()),
        None => (Vec::new(), Vec::new()),
    };

    ScenarioDetail {
        name: name.to_string(),
        c_count: c.len(),
        a_count: a.len(),
        outcome,
        c_diagnosis_only,
        askman_only,
    }
}
