//! Workflow Module
//!
//! Runs the analysis pipeline over a sample log and packages the result as
//! an exportable test report.

pub mod analyzer;
pub mod report;

pub use analyzer::{AnalysisInput, AnalysisResult, StrokeAnalyzer};
pub use report::TestReport;
