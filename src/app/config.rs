//! Configuration Management

use crate::analysis::scoring::DEFAULT_GRID_CELL_PX;
use crate::analysis::spacing::{
    SpacingThresholds, DEFAULT_LETTER_GAP_MIN_POINTS, DEFAULT_LETTER_GAP_PX,
    DEFAULT_LINE_THRESHOLD_PX,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis thresholds
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Report export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Coverage grid cell size (pixels)
    pub grid_cell_px: f64,
    /// Maximum centre distance for strokes on the same line (pixels)
    pub line_threshold_px: f64,
    /// Intra-stroke jump that counts as a letter gap (pixels)
    pub letter_gap_px: f64,
    /// Minimum points before a stroke is scanned for letter gaps
    pub letter_gap_min_points: usize,
    /// Minimum samples before pattern signals are computed
    pub min_pattern_samples: usize,
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory for exported reports
    pub output_dir: PathBuf,
    /// Pretty-print exported JSON
    pub pretty: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_cell_px: DEFAULT_GRID_CELL_PX,
            line_threshold_px: DEFAULT_LINE_THRESHOLD_PX,
            letter_gap_px: DEFAULT_LETTER_GAP_PX,
            letter_gap_min_points: DEFAULT_LETTER_GAP_MIN_POINTS,
            min_pattern_samples: 10,
        }
    }
}

impl AnalysisConfig {
    pub fn spacing_thresholds(&self) -> SpacingThresholds {
        SpacingThresholds {
            letter_gap_px: self.letter_gap_px,
            letter_gap_min_points: self.letter_gap_min_points,
            line_threshold_px: self.line_threshold_px,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: Config::base_dir().join("reports"),
            pretty: true,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let analysis = &self.analysis;
        if !(analysis.grid_cell_px > 0.0 && analysis.grid_cell_px <= 1000.0) {
            return Err(crate::Error::Config(format!(
                "grid_cell_px must be in (0, 1000], got {}",
                analysis.grid_cell_px
            )));
        }
        if !(analysis.line_threshold_px > 0.0 && analysis.line_threshold_px.is_finite()) {
            return Err(crate::Error::Config(format!(
                "line_threshold_px must be positive, got {}",
                analysis.line_threshold_px
            )));
        }
        if !(analysis.letter_gap_px >= 0.0 && analysis.letter_gap_px.is_finite()) {
            return Err(crate::Error::Config(format!(
                "letter_gap_px must be non-negative, got {}",
                analysis.letter_gap_px
            )));
        }
        if analysis.letter_gap_min_points < 2 {
            return Err(crate::Error::Config(format!(
                "letter_gap_min_points must be >= 2, got {}",
                analysis.letter_gap_min_points
            )));
        }
        if self.export.output_dir.as_os_str().is_empty() {
            return Err(crate::Error::Config("output_dir must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory holding the config file and default report output
    pub fn base_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".stroke_analyzer"))
            .unwrap_or_else(|| PathBuf::from(".stroke_analyzer"))
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        Self::base_dir().join("config.toml")
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
