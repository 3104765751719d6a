use crate::parser::types::QuestionEvent;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Outcome of comparing two engines' question logs for one scenario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Classification {
    /// Logs have different lengths
    DiffCount { c_count: usize, a_count: usize },
    /// First divergence is a different question (1-based `q_num`)
    DiffQuestion {
        q_num: usize,
        c_text: String,
        a_text: String,
    },
    /// First divergence is the same question answered differently
    DiffAnswer {
        q_num: usize,
        question: String,
        c_ans: String,
        a_ans: String,
    },
    /// Every question and answer matches
    SameAll,
}

impl Classification {
    pub fn category(&self) -> Category {
        match self {
            Classification::DiffCount { .. } => Category::DiffCount,
            Classification::DiffQuestion { .. } => Category::DiffQuestion,
            Classification::DiffAnswer { .. } => Category::DiffAnswer,
            Classification::SameAll => Category::SameAll,
        }
    }
}

/// The four mutually exclusive buckets a scenario can fall into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DiffCount,
    DiffAnswer,
    DiffQuestion,
    SameAll,
}

impl Category {
    /// Display order used by every report
    pub const ALL: [Category; 4] = [
        Category::DiffCount,
        Category::DiffAnswer,
        Category::DiffQuestion,
        Category::SameAll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DiffCount => "diff_count",
            Category::DiffAnswer => "diff_answer",
            Category::DiffQuestion => "diff_question",
            Category::SameAll => "same_all",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What differs at the first divergent position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceKind {
    Question,
    Answer,
}

/// First position (0-based) where the two logs disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divergence {
    pub index: usize,
    pub kind: DivergenceKind,
}

impl Divergence {
    /// 1-based question number for display
    pub fn q_num(&self) -> usize {
        self.index + 1
    }
}

/// Scan the overlapping prefix of two logs and stop at the first mismatch.
///
/// Question text is compared before the selected option, so a position
/// where both differ counts as a different question.
pub fn first_divergence(c: &[QuestionEvent], a: &[QuestionEvent]) -> Option<Divergence> {
    c.iter().zip(a).enumerate().find_map(|(index, (ce, ae))| {
        if ce.question_text != ae.question_text {
            Some(Divergence {
                index,
                kind: DivergenceKind::Question,
            })
        } else if ce.selected_option != ae.selected_option {
            Some(Divergence {
                index,
                kind: DivergenceKind::Answer,
            })
        } else {
            None
        }
    })
}

/// Classify a scenario from the c-diagnosis log `c` and the askman log `a`.
///
/// A length mismatch wins over any content difference; otherwise only the
/// first divergence is reported.
pub fn classify(c: &[QuestionEvent], a: &[QuestionEvent]) -> Classification {
    if c.len() != a.len() {
        return Classification::DiffCount {
            c_count: c.len(),
            a_count: a.len(),
        };
    }

    match first_divergence(c, a) {
        Some(div) => {
            let (ce, ae) = (&c[div.index], &a[div.index]);
            match div.kind {
                DivergenceKind::Question => Classification::DiffQuestion {
                    q_num: div.q_num(),
                    c_text: ce.question_text.clone(),
                    a_text: ae.question_text.clone(),
                },
                DivergenceKind::Answer => Classification::DiffAnswer {
                    q_num: div.q_num(),
                    question: ce.question_text.clone(),
                    c_ans: ce.selected_option.clone(),
                    a_ans: ae.selected_option.clone(),
                },
            }
        }
        None => Classification::SameAll,
    }
}

pub const UNKNOWN_QUESTION_ID: &str = "unknown";

fn question_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Last path segment, optionally after /qa/ or /question/, ending at `?` or end of string
    PATTERN.get_or_init(|| {
        Regex::new(r"/(?:qa/)?(?:question/)?([a-z0-9\-_]+)(?:\?|$)")
            .expect("question id pattern is valid")
    })
}

/// Question identifier from a question page URL, e.g. `question-16123`
/// or `person`. Falls back to `"unknown"`.
pub fn question_id(url: &str) -> &str {
    question_id_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(UNKNOWN_QUESTION_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(text: &str, answer: &str) -> QuestionEvent {
        QuestionEvent::new(text, answer)
    }

    #[test]
    fn test_identical_logs_are_same_all() {
        let c = vec![ev("Do you have fever?", "Yes")];
        let a = c.clone();
        assert_eq!(classify(&c, &a), Classification::SameAll);
        // Deterministic on repeat
        assert_eq!(classify(&c, &a), classify(&c, &a));
    }

    #[test]
    fn test_empty_logs_are_same_all() {
        assert_eq!(classify(&[], &[]), Classification::SameAll);
    }

    #[test]
    fn test_length_mismatch_wins() {
        let c = vec![ev("Q1", "Yes"), ev("Q2", "No"), ev("Q3", "Yes")];
        let a = vec![ev("Q1", "Yes"), ev("Q2", "No")];
        assert_eq!(
            classify(&c, &a),
            Classification::DiffCount {
                c_count: 3,
                a_count: 2
            }
        );

        // Content differences do not matter once lengths differ
        let a = vec![ev("Other", "Maybe")];
        assert_eq!(classify(&c, &a).category(), Category::DiffCount);
    }

    #[test]
    fn test_different_question() {
        let c = vec![ev("Do you have fever?", "Yes"), ev("Any nausea?", "No")];
        let a = vec![ev("Do you have fever?", "Yes"), ev("Any dizziness?", "No")];
        assert_eq!(
            classify(&c, &a),
            Classification::DiffQuestion {
                q_num: 2,
                c_text: "Any nausea?".into(),
                a_text: "Any dizziness?".into(),
            }
        );
    }

    #[test]
    fn test_different_answer() {
        let c = vec![ev("Do you have fever?", "Yes")];
        let a = vec![ev("Do you have fever?", "No")];
        assert_eq!(
            classify(&c, &a),
            Classification::DiffAnswer {
                q_num: 1,
                question: "Do you have fever?".into(),
                c_ans: "Yes".into(),
                a_ans: "No".into(),
            }
        );
    }

    #[test]
    fn test_question_checked_before_answer() {
        let c = vec![ev("Any nausea?", "Yes")];
        let a = vec![ev("Any dizziness?", "No")];
        assert_eq!(classify(&c, &a).category(), Category::DiffQuestion);
    }

    #[test]
    fn test_only_first_divergence_is_reported() {
        let c = vec![ev("Q1", "Yes"), ev("Q2", "Yes"), ev("Q3", "Yes")];
        let a = vec![ev("Q1", "Yes"), ev("Q2", "No"), ev("Other", "Yes")];

        let div = first_divergence(&c, &a).unwrap();
        assert_eq!(div.index, 1);
        assert_eq!(div.kind, DivergenceKind::Answer);
        assert!(matches!(
            classify(&c, &a),
            Classification::DiffAnswer { q_num: 2, .. }
        ));
    }

    #[test]
    fn test_first_divergence_scans_overlap_only() {
        let c = vec![ev("Q1", "Yes")];
        let a = vec![ev("Q1", "Yes"), ev("Q2", "No")];
        assert!(first_divergence(&c, &a).is_none());
    }

    #[test]
    fn test_url_is_ignored_for_classification() {
        let mut c = ev("Q1", "Yes");
        c.url = "https://c.example/qa/question-1".into();
        let mut a = ev("Q1", "Yes");
        a.url = "https://askman.example/question/person".into();
        assert_eq!(classify(&[c], &[a]), Classification::SameAll);
    }

    #[test]
    fn test_question_id() {
        assert_eq!(
            question_id("https://example.test/qa/question-16123"),
            "question-16123"
        );
        assert_eq!(
            question_id("https://example.test/question/person?step=2"),
            "person"
        );
        assert_eq!(question_id("https://example.test/flow/chief_complaint"), "chief_complaint");
        assert_eq!(question_id("https://example.test/Question/UPPER"), "unknown");
        assert_eq!(question_id(""), "unknown");
    }

    #[test]
    fn test_classification_serializes_with_type_tag() {
        let json = serde_json::to_value(Classification::DiffCount {
            c_count: 3,
            a_count: 2,
        })
        .unwrap();
        assert_eq!(json["type"], "diff_count");
        assert_eq!(json["c_count"], 3);
    }
}
