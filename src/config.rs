//! Configuration structures for the strip_colors analysis pipeline.
//!
//! This module defines all tunable parameters for strip analysis,
//! organized into logical groups for sampling and calibration.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use strip_colors::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The defaults reproduce the reference pipeline exactly; the thresholds are
//! exposed because their optimal values depend on sensor and lighting
//! conditions that the pipeline does not model.

use serde::{Deserialize, Serialize};

use crate::constants::thresholds;

/// Complete configuration for one analysis run.
///
/// Can be serialized to/from JSON for reproducible measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Region sampling configuration
    pub sampling: SamplingConfig,

    /// White balance calibration configuration
    pub calibration: CalibrationConfig,

    /// Control-patch saturation above which results carry a
    /// calibration-quality warning
    pub control_saturation_warning: f32,
}

/// Pixel filtering parameters for region sampling.
///
/// Pixels whose HSV value falls at or outside these cutoffs are treated as
/// shadow or glare and excluded from the robust statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Exclude pixels with HSV value <= this cutoff (near-black shadow)
    pub shadow_cutoff: f32,

    /// Exclude pixels with HSV value >= this cutoff (near-white glare)
    pub glare_cutoff: f32,
}

/// White balance calibration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Brightness (of 255) each control channel is scaled to
    pub target_white_level: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            calibration: CalibrationConfig::default(),
            control_saturation_warning: thresholds::CONTROL_SATURATION_WARNING,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            shadow_cutoff: thresholds::SHADOW_VALUE_CUTOFF,
            glare_cutoff: thresholds::GLARE_VALUE_CUTOFF,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            target_white_level: thresholds::TARGET_WHITE_LEVEL,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_thresholds() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sampling.shadow_cutoff, 0.05);
        assert_eq!(config.sampling.glare_cutoff, 0.95);
        assert_eq!(config.calibration.target_white_level, 240.0);
        assert_eq!(config.control_saturation_warning, 0.15);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = AnalysisConfig {
            sampling: SamplingConfig {
                shadow_cutoff: 0.1,
                glare_cutoff: 0.9,
            },
            calibration: CalibrationConfig {
                target_white_level: 235.0,
            },
            control_saturation_warning: 0.2,
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
