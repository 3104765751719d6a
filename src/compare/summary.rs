use super::classify::{classify, Category, Classification};
use crate::parser::loader::ScenarioReport;
use crate::parser::types::{Engine, QuestionEvent, Report};
use serde::{Deserialize, Serialize};

/// Classification of one failed scenario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub classification: Classification,
}

/// Why a scenario was left out of every category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Passed,
    /// One engine's question log is absent or empty
    MissingLog,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedScenario {
    pub name: String,
    pub reason: SkipReason,
}

/// Failed scenarios grouped by how their question flows diverge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DivergenceSummary {
    pub diff_count: Vec<ScenarioOutcome>,
    pub diff_answer: Vec<ScenarioOutcome>,
    pub diff_question: Vec<ScenarioOutcome>,
    pub same_all: Vec<ScenarioOutcome>,
    pub skipped: Vec<SkippedScenario>,
    /// Number of report files examined
    pub total: usize,
}

impl DivergenceSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one scenario and file it under its category
    pub fn add(&mut self, name: &str, report: &Report) {
        self.total += 1;

        if report.passed {
            self.skip(name, SkipReason::Passed);
            return;
        }

        let Some((c, a)) = comparable_logs(report) else {
            self.skip(name, SkipReason::MissingLog);
            return;
        };

        let classification = classify(c, a);
        log::debug!("{}: {}", name, classification.category());

        let outcome = ScenarioOutcome {
            name: name.to_string(),
            classification,
        };
        match outcome.classification.category() {
            Category::DiffCount => self.diff_count.push(outcome),
            Category::DiffAnswer => self.diff_answer.push(outcome),
            Category::DiffQuestion => self.diff_question.push(outcome),
            Category::SameAll => self.same_all.push(outcome),
        }
    }

    fn skip(&mut self, name: &str, reason: SkipReason) {
        log::debug!("Skipping {} ({:?})", name, reason);
        self.skipped.push(SkippedScenario {
            name: name.to_string(),
            reason,
        });
    }

    pub fn outcomes(&self, category: Category) -> &[ScenarioOutcome] {
        match category {
            Category::DiffCount => &self.diff_count,
            Category::DiffAnswer => &self.diff_answer,
            Category::DiffQuestion => &self.diff_question,
            Category::SameAll => &self.same_all,
        }
    }

    /// Number of scenarios placed in any category
    pub fn classified(&self) -> usize {
        Category::ALL.iter().map(|c| self.outcomes(*c).len()).sum()
    }
}

/// Both engines' logs, or `None` when either is absent or empty.
///
/// Scenarios without a log on both sides cannot be compared and are
/// excluded from every category.
pub fn comparable_logs(report: &Report) -> Option<(&[QuestionEvent], &[QuestionEvent])> {
    let c = report.question_log(Engine::CDiagnosis);
    let a = report.question_log(Engine::Askman);
    if c.is_empty() || a.is_empty() {
        None
    } else {
        Some((c, a))
    }
}

/// Build a summary over already-loaded scenarios, in the given order
pub fn summarize(scenarios: &[ScenarioReport]) -> DivergenceSummary {
    let mut summary = DivergenceSummary::new();
    for scenario in scenarios {
        summary.add(&scenario.label, &scenario.report);
    }
    log::info!(
        "Classified {} of {} scenarios ({} skipped)",
        summary.classified(),
        summary.total,
        summary.skipped.len()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::EnginePair;

    fn report(passed: bool, c: &[(&str, &str)], a: &[(&str, &str)]) -> Report {
        let events_of = |events: &[(&str, &str)]| {
            events
                .iter()
                .map(|(q, ans)| QuestionEvent::new(q, ans))
                .collect::<Vec<_>>()
        };
        Report {
            passed,
            question_logs: EnginePair {
                c_diagnosis: events_of(c),
                askman: events_of(a),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_scenarios_are_bucketed() {
        let mut summary = DivergenceSummary::new();
        summary.add("same", &report(false, &[("Q1", "Yes")], &[("Q1", "Yes")]));
        summary.add("answer", &report(false, &[("Q1", "Yes")], &[("Q1", "No")]));
        summary.add("question", &report(false, &[("Q1", "Yes")], &[("Q2", "Yes")]));
        summary.add(
            "count",
            &report(false, &[("Q1", "Yes"), ("Q2", "No")], &[("Q1", "Yes")]),
        );

        assert_eq!(summary.total, 4);
        assert_eq!(summary.classified(), 4);
        assert_eq!(summary.same_all[0].name, "same");
        assert_eq!(summary.diff_answer[0].name, "answer");
        assert_eq!(summary.diff_question[0].name, "question");
        assert_eq!(
            summary.diff_count[0].classification,
            Classification::DiffCount {
                c_count: 2,
                a_count: 1
            }
        );
    }

    #[test]
    fn test_passed_scenarios_are_skipped() {
        let mut summary = DivergenceSummary::new();
        summary.add("ok", &report(true, &[("Q1", "Yes")], &[("Q1", "No")]));

        assert_eq!(summary.classified(), 0);
        assert_eq!(summary.skipped[0].reason, SkipReason::Passed);
    }

    #[test]
    fn test_missing_logs_are_excluded_from_every_category() {
        let mut summary = DivergenceSummary::new();
        summary.add("no-askman", &report(false, &[("Q1", "Yes")], &[]));
        summary.add("no-c", &report(false, &[], &[("Q1", "Yes")]));
        summary.add("neither", &report(false, &[], &[]));

        let absent: Report = serde_json::from_str(r#"{ "passed": false }"#).unwrap();
        summary.add("absent", &absent);

        assert_eq!(summary.classified(), 0);
        assert_eq!(summary.total, 4);
        assert!(summary
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::MissingLog));
    }

    #[test]
    fn test_summarize_keeps_input_order() {
        let scenarios: Vec<ScenarioReport> = ["b", "a"]
            .iter()
            .map(|name| ScenarioReport {
                path: format!("{}.json", name).into(),
                label: name.to_string(),
                recorded_at: None,
                report: report(false, &[("Q1", "Yes")], &[("Q1", "Yes")]),
            })
            .collect();

        let summary = summarize(&scenarios);
        let names: Vec<_> = summary.same_all.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_summary_over_loaded_reports_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = r#""questionLogs": {
            "cDiagnosis": [{ "questionText": "Q1", "selectedOption": "Yes" }],
            "askman": [{ "questionText": "Q1", "selectedOption": "No" }]
        }"#;
        let files = [
            ("20251025_ok.json", format!(r#"{{ "passed": true, {} }}"#, logs)),
            ("20251026_answer.json", format!(r#"{{ "passed": false, {} }}"#, logs)),
            ("20251027_late.json", format!(r#"{{ "passed": false, {} }}"#, logs)),
        ];
        for (name, body) in &files {
            std::fs::write(dir.path().join(name), body).unwrap();
        }

        let scenarios = crate::parser::loader::load_reports(dir.path(), Some(2)).unwrap();
        let summary = summarize(&scenarios);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.classified(), 1);
        assert_eq!(summary.skipped[0].reason, SkipReason::Passed);
        assert_eq!(summary.diff_answer[0].name, "answer");
    }
}
