pub mod compare;
pub mod error;
pub mod parser;
pub mod report;
pub mod utils;

// Re-export common items
pub use compare::{analyze_failures, classify, compare_detail, summarize};
pub use error::ReportError;
pub use parser::{load_reports, Report};
