pub mod loader;
pub mod types;

pub use loader::{load_report, load_reports, load_scenario, ScenarioReport};
pub use types::{Engine, QuestionEvent, Report};
