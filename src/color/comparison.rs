//! Perceptual-distance classification
//!
//! Compares the test sample against both references in Lab space and
//! derives the winner plus complementary confidence percentages.

use palette::Lab;
use serde::{Deserialize, Serialize};

use crate::color::conversion::ColorConverter;
use crate::constants::thresholds;

/// Which reference the test sample matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "A")]
    ReferenceA,
    #[serde(rename = "B")]
    ReferenceB,
}

/// Outcome of one comparison run
///
/// Produced once per analysis; a new run fully replaces the prior result.
/// The percentages are complementary: the reference with the *smaller*
/// distance receives the *larger* share, and they sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Closer reference (ties classify as B)
    pub winner: Winner,
    /// Confidence percentage for reference A
    pub pct_a: f64,
    /// Confidence percentage for reference B
    pub pct_b: f64,
    /// ΔE between the test sample and reference A
    pub delta_e_a: f32,
    /// ΔE between the test sample and reference B
    pub delta_e_b: f32,
    /// Mean saturation of the control patch (calibration quality proxy)
    pub control_saturation: f32,
}

impl ComparisonResult {
    /// Whether the control patch looks tinted enough to distrust calibration
    ///
    /// A saturated "white" reference usually means a colored ambient light
    /// contaminated the patch; the consumer should flag the result.
    pub fn saturation_warning(&self, threshold: f32) -> bool {
        self.control_saturation > threshold
    }

    /// [`saturation_warning`](Self::saturation_warning) at the default 0.15 threshold
    pub fn default_saturation_warning(&self) -> bool {
        self.saturation_warning(thresholds::CONTROL_SATURATION_WARNING)
    }

    /// Confidence percentage of the winning reference
    pub fn winning_pct(&self) -> f64 {
        match self.winner {
            Winner::ReferenceA => self.pct_a,
            Winner::ReferenceB => self.pct_b,
        }
    }
}

/// Comparator deriving the winner and percentages from Lab distances
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorComparator {
    converter: ColorConverter,
}

impl ColorComparator {
    pub fn new() -> Self {
        Self {
            converter: ColorConverter::new(),
        }
    }

    /// Classify the test color against references A and B
    ///
    /// Percentages are computed in f64 from the two distances. When both
    /// distances are zero there is no signal to apportion, and the split is
    /// an explicit 50/50 rather than an arithmetic fallback; this is what
    /// keeps a fully degenerate analysis (all regions zeroed) well-defined.
    pub fn classify(
        &self,
        test: Lab,
        reference_a: Lab,
        reference_b: Lab,
        control_saturation: f32,
    ) -> ComparisonResult {
        let delta_e_a = self.converter.delta_e(test, reference_a);
        let delta_e_b = self.converter.delta_e(test, reference_b);

        let winner = if delta_e_a < delta_e_b {
            Winner::ReferenceA
        } else {
            Winner::ReferenceB
        };

        let da = delta_e_a as f64;
        let db = delta_e_b as f64;
        let total = da + db;
        let (pct_a, pct_b) = if total > 0.0 {
            (db / total * 100.0, da / total * 100.0)
        } else {
            (50.0, 50.0)
        };

        ComparisonResult {
            winner,
            pct_a,
            pct_b,
            delta_e_a,
            delta_e_b,
            control_saturation,
        }
    }
}
