//! Question-flow comparison between the c-diagnosis and askman engines.

pub mod classify;
pub mod detail;
pub mod failures;
pub mod summary;

pub use classify::{classify, first_divergence, question_id, Category, Classification};
pub use detail::{compare_detail, ScenarioDetail};
pub use failures::{analyze_failures, FailureAnalysis};
pub use summary::{summarize, DivergenceSummary};
