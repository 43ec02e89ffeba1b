//! Test Report Export
//!
//! Defines the JSON artifact written when a tracing test is exported. The
//! layout matches the browser tool's download so existing files load as-is:
//! `{originalText, timestamp, drawingData, analysis}`.

use crate::capture::types::Sample;
use crate::workflow::analyzer::{AnalysisInput, AnalysisResult};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name prefix for exported reports
pub const REPORT_FILE_PREFIX: &str = "dyslexia-test";

/// An exported tracing test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    /// Reference text that was traced
    pub original_text: String,
    /// Export time (ISO-8601, millisecond precision)
    pub timestamp: DateTime<Utc>,
    /// Raw sample log
    pub drawing_data: Vec<Sample>,
    /// Analysis of the sample log
    pub analysis: AnalysisResult,
}

impl TestReport {
    /// Create a report stamped with the current time
    pub fn new(input: &AnalysisInput, analysis: AnalysisResult) -> Self {
        Self::with_timestamp(input, analysis, Utc::now())
    }

    pub fn with_timestamp(input: &AnalysisInput, analysis: AnalysisResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            original_text: input.reference_text.clone(),
            timestamp: timestamp.trunc_subsecs(3),
            drawing_data: input.samples.clone(),
            analysis,
        }
    }

    /// Default download name, e.g. `dyslexia-test-2026-10-18.json`
    pub fn default_file_name(&self) -> String {
        format!("{}-{}.json", REPORT_FILE_PREFIX, self.timestamp.format("%Y-%m-%d"))
    }

    /// Default path for this report inside `dir`
    pub fn default_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.default_file_name())
    }

    pub fn to_json(&self, pretty: bool) -> crate::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save report to a file, creating parent directories
    pub fn save(&self, path: &Path, pretty: bool) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json(pretty)?)?;
        tracing::info!(path = %path.display(), samples = self.drawing_data.len(), "saved test report");
        Ok(())
    }

    /// Load report from a file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let report = Self::from_json(&content)?;
        if report.drawing_data.is_empty() {
            tracing::warn!(path = %path.display(), "report has an empty sample log");
        }
        Ok(report)
    }

    /// Number of samples in the report
    pub fn len(&self) -> usize {
        self.drawing_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawing_data.is_empty()
    }

    /// Rebuild the analysis input, given the canvas the test was drawn on
    pub fn to_input(&self, canvas_width: f64, canvas_height: f64) -> AnalysisInput {
        AnalysisInput {
            reference_text: self.original_text.clone(),
            samples: self.drawing_data.clone(),
            canvas_width,
            canvas_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::types::CanvasSize;
    use crate::workflow::analyzer::StrokeAnalyzer;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn make_report() -> TestReport {
        let samples = vec![
            Sample::start(10.0, 10.0, 1_000),
            Sample::draw(30.0, 12.5, 1_016),
            Sample::draw(52.25, 11.0, 1_033),
            Sample::end(1_050),
        ];
        let input = AnalysisInput::new("on", samples, CanvasSize::new(400.0, 100.0).unwrap());
        let analysis = StrokeAnalyzer::new().analyze(&input).unwrap();
        let stamp = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        TestReport::with_timestamp(&input, analysis, stamp)
    }

    #[test]
    fn test_top_level_keys() {
        let value = serde_json::to_value(make_report()).unwrap();
        let mut keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["analysis", "drawingData", "originalText", "timestamp"]);
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let value = serde_json::to_value(make_report()).unwrap();
        assert_eq!(value["timestamp"], "2026-03-14T09:26:53Z");
    }

    #[test]
    fn test_timestamp_truncated_to_millis() {
        let report = make_report();
        let stamp = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let report = TestReport::with_timestamp(&report.to_input(400.0, 100.0), report.analysis, stamp);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["timestamp"], "2026-03-14T09:26:53.123Z");
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(make_report().default_file_name(), "dyslexia-test-2026-03-14.json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let report = make_report();
        let path = report.default_path(&dir.path().join("exports"));

        report.save(&path, true).unwrap();
        let loaded = TestReport::load(&path).unwrap();

        assert_eq!(loaded, report);
        assert_eq!(loaded.len(), 4);
    }

    #[test]
    fn test_analysis_survives_round_trip_byte_for_byte() {
        let report = make_report();
        let json = report.to_json(false).unwrap();
        let loaded = TestReport::from_json(&json).unwrap();

        assert_eq!(
            serde_json::to_string(&report.analysis).unwrap(),
            serde_json::to_string(&loaded.analysis).unwrap()
        );
    }

    #[test]
    fn test_load_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ invalid json }").unwrap();
        temp_file.flush().unwrap();

        let result = TestReport::load(temp_file.path());
        assert!(matches!(result, Err(crate::Error::Serialization(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = TestReport::load(Path::new("/nonexistent/report.json"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_to_input_reanalyses_identically() {
        let report = make_report();
        let input = report.to_input(400.0, 100.0);
        let again = StrokeAnalyzer::new().analyze(&input).unwrap();
        assert_eq!(again, report.analysis);
    }
}
