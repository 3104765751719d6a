use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the saved `*.json` reports
    pub reports_dir: PathBuf,

    /// Number of report files (in name order) examined by the summary.
    /// `None` examines all of them.
    pub scenario_limit: Option<usize>,

    /// Examples shown per category in the text summary
    pub examples_per_category: usize,

    /// Characters of question text shown for answer divergences
    pub question_preview_chars: usize,

    /// Characters of question text shown for question divergences
    pub text_preview_chars: usize,

    /// Examples kept per failure pattern
    pub failure_examples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            scenario_limit: Some(10),
            examples_per_category: 3,
            question_preview_chars: 60,
            text_preview_chars: 50,
            failure_examples: 5,
        }
    }
}
