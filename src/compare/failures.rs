use crate::parser::loader::ScenarioReport;
use crate::parser::types::{DiseaseResult, Engine, Report};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kinds of failure recorded by the harness in a report's `differences`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    DiseaseOnlyInCDiagnosis,
    DiseaseOnlyInAskman,
    QuestionCountMismatch,
    ResultPageBannersMismatch,
    ResultPageButtonsMismatch,
    ResultPageSectionsMismatch,
    ExecutionError,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::DiseaseOnlyInCDiagnosis => "疾患がc-diagnosisにのみ存在 (disease only in c-diagnosis)",
            FailureKind::DiseaseOnlyInAskman => "疾患がaskmanにのみ存在 (disease only in askman)",
            FailureKind::QuestionCountMismatch => "質問数の不一致 (question count mismatch)",
            FailureKind::ResultPageBannersMismatch => "結果ページバナーの不一致 (result page banners mismatch)",
            FailureKind::ResultPageButtonsMismatch => "結果ページボタンの不一致 (result page buttons mismatch)",
            FailureKind::ResultPageSectionsMismatch => "結果ページセクションの不一致 (result page sections mismatch)",
            FailureKind::ExecutionError => "実行エラー (execution error)",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailurePattern {
    pub kind: FailureKind,
    pub count: usize,
    pub examples: Vec<String>,
}

/// Failure patterns across all failed scenarios
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureAnalysis {
    /// Sorted by count, most frequent first
    pub patterns: Vec<FailurePattern>,
    pub failed_scenarios: usize,
}

impl FailureAnalysis {
    /// Sum of all pattern counts
    pub fn total_issues(&self) -> usize {
        self.patterns.iter().map(|p| p.count).sum()
    }
}

/// Every failure found in one report, with a short detail string each
pub fn detect_failures(report: &Report) -> Vec<(FailureKind, String)> {
    let mut found = Vec::new();
    let diff = &report.differences;

    if let Some(dm) = &diff.disease_mismatch {
        if !dm.c_diagnosis_only.is_empty() {
            found.push((FailureKind::DiseaseOnlyInCDiagnosis, disease_names(&dm.c_diagnosis_only)));
        }
        if !dm.askman_only.is_empty() {
            found.push((FailureKind::DiseaseOnlyInAskman, disease_names(&dm.askman_only)));
        }
    }

    if let Some(qcm) = &diff.question_count_mismatch {
        found.push((
            FailureKind::QuestionCountMismatch,
            format!("c-diagnosis={}, askman={}", qcm.c_diagnosis, qcm.askman),
        ));
    }

    if let Some(rpm) = &diff.result_page_elements_mismatch {
        let elements = [
            (FailureKind::ResultPageBannersMismatch, &rpm.banners),
            (FailureKind::ResultPageButtonsMismatch, &rpm.buttons),
            (FailureKind::ResultPageSectionsMismatch, &rpm.sections),
        ];
        for (kind, value) in elements {
            if let Some(value) = value.as_ref().filter(|v| !v.is_null()) {
                found.push((kind, value.to_string()));
            }
        }
    }

    let errors: Vec<String> = [Engine::CDiagnosis, Engine::Askman]
        .iter()
        .filter_map(|engine| {
            report
                .execution_error(*engine)
                .filter(|e| !e.is_empty())
                .map(|e| format!("{}: {}", engine, e))
        })
        .collect();
    if !errors.is_empty() {
        found.push((FailureKind::ExecutionError, errors.join("; ")));
    }

    found
}

fn disease_names(diseases: &[DiseaseResult]) -> String {
    diseases
        .iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Count failure patterns over every failed scenario, keeping up to
/// `max_examples` examples per pattern.
pub fn analyze_failures(scenarios: &[ScenarioReport], max_examples: usize) -> FailureAnalysis {
    let mut order: Vec<FailureKind> = Vec::new();
    let mut patterns: HashMap<FailureKind, FailurePattern> = HashMap::new();
    let mut failed_scenarios = 0;

    for scenario in scenarios.iter().filter(|s| !s.report.passed) {
        failed_scenarios += 1;

        for (kind, detail) in detect_failures(&scenario.report) {
            let pattern = patterns.entry(kind).or_insert_with(|| {
                order.push(kind);
                FailurePattern {
                    kind,
                    count: 0,
                    examples: Vec::new(),
                }
            });
            pattern.count += 1;
            if pattern.examples.len() < max_examples {
                pattern.examples.push(format!("{}: {}", scenario.label, detail));
            }
        }
    }

    // First-seen order breaks ties
    let mut patterns: Vec<FailurePattern> = order
        .into_iter()
        .filter_map(|kind| patterns.remove(&kind))
        .collect();
    patterns.sort_by(|a, b| b.count.cmp(&a.count));

    FailureAnalysis {
        patterns,
        failed_scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(label: &str, json: &str) -> ScenarioReport {
        ScenarioReport {
            path: format!("{}.json", label).into(),
            label: label.to_string(),
            recorded_at: None,
            report: serde_json::from_str(json).unwrap(),
        }
    }

    #[test]
    fn test_detect_failures() {
        let report: Report = serde_json::from_str(
            r#"{
              "passed": false,
              "differences": {
                "diseaseMismatch": {
                  "cDiagnosisOnly": [{ "id": "1", "name": "片頭痛" }, { "id": "2", "name": "緊張型頭痛" }],
                  "askmanOnly": []
                },
                "questionCountMismatch": { "cDiagnosis": 12, "askman": 10 },
                "resultPageElementsMismatch": { "banners": ["emergency"], "buttons": null }
              },
              "askmanResult": { "error": "timeout" }
            }"#,
        )
        .unwrap();

        let found = detect_failures(&report);
        let kinds: Vec<_> = found.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                FailureKind::DiseaseOnlyInCDiagnosis,
                FailureKind::QuestionCountMismatch,
                FailureKind::ResultPageBannersMismatch,
                FailureKind::ExecutionError,
            ]
        );
        assert_eq!(found[0].1, "片頭痛, 緊張型頭痛");
        assert_eq!(found[1].1, "c-diagnosis=12, askman=10");
        assert_eq!(found[2].1, r#"["emergency"]"#);
        assert_eq!(found[3].1, "askman: timeout");
    }

    #[test]
    fn test_empty_execution_error_is_ignored() {
        let report: Report = serde_json::from_str(
            r#"{ "passed": false, "cDiagnosisResult": { "error": "" }, "askmanResult": { "error": null } }"#,
        )
        .unwrap();
        assert!(detect_failures(&report).is_empty());

        let report: Report = serde_json::from_str(
            r#"{ "passed": false, "cDiagnosisResult": { "error": "" }, "askmanResult": { "error": "crash" } }"#,
        )
        .unwrap();
        let found = detect_failures(&report);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0], (FailureKind::ExecutionError, "askman: crash".to_string()));
    }

    #[test]
    fn test_analyze_failures_counts_and_sorts() {
        let count_mismatch = r#"{ "passed": false, "differences": { "questionCountMismatch": { "cDiagnosis": 3, "askman": 2 } } }"#;
        let scenarios = vec![
            scenario(
                "a",
                r#"{ "passed": false, "differences": { "diseaseMismatch": { "askmanOnly": [{ "name": "風邪" }] } } }"#,
            ),
            scenario("b", count_mismatch),
            scenario("c", count_mismatch),
            scenario("d", count_mismatch),
            scenario("ok", r#"{ "passed": true, "differences": { "questionCountMismatch": { "cDiagnosis": 1, "askman": 2 } } }"#),
        ];

        let analysis = analyze_failures(&scenarios, 2);
        assert_eq!(analysis.failed_scenarios, 4);
        assert_eq!(analysis.patterns.len(), 2);
        assert_eq!(analysis.patterns[0].kind, FailureKind::QuestionCountMismatch);
        assert_eq!(analysis.patterns[0].count, 3);
        assert_eq!(analysis.patterns[0].examples.len(), 2);
        assert_eq!(analysis.patterns[0].examples[0], "b: c-diagnosis=3, askman=2");
        assert_eq!(analysis.patterns[1].examples[0], "a: 風邪");
        assert_eq!(analysis.total_issues(), 4);
    }
}
