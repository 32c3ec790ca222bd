//! White balance gain derivation and correction
//!
//! Implements the diagonal (per-channel multiplicative) white-balance model:
//! the control patch is assumed near-white under ideal light, so each channel
//! is scaled toward a fixed target brightness. This is intentionally not a
//! full chromatic-adaptation transform.

use serde::{Deserialize, Serialize};

use crate::config::CalibrationConfig;
use crate::constants::thresholds;
use crate::sampling::Sample;

/// Per-channel white balance gains derived from the control sample
///
/// Derived once per analysis run and then applied to every other sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhiteBalance {
    pub scale_r: f32,
    pub scale_g: f32,
    pub scale_b: f32,
}

impl WhiteBalance {
    /// Derive gains from the control sample using the default target (240)
    pub fn from_control(control: &Sample) -> Self {
        Self::from_control_with_target(control, CalibrationConfig::default().target_white_level)
    }

    /// Derive gains from the control sample toward an explicit target level
    ///
    /// `scale = target / max(channel, 1)` per channel. The floor keeps a
    /// near-black or misplaced control patch from blowing the gains up to
    /// infinity; whether the patch held any usable pixels at all is visible
    /// separately via [`Sample::is_degenerate`].
    pub fn from_control_with_target(control: &Sample, target: f32) -> Self {
        let gain = |channel: f32| target / channel.max(thresholds::CONTROL_CHANNEL_FLOOR);
        Self {
            scale_r: gain(control.rgb[0]),
            scale_g: gain(control.rgb[1]),
            scale_b: gain(control.rgb[2]),
        }
    }

    /// Apply the gains to a sample's RGB, clamped to the valid [0, 255] range
    pub fn apply(&self, sample: &Sample) -> [f32; 3] {
        [
            (sample.rgb[0] * self.scale_r).min(255.0),
            (sample.rgb[1] * self.scale_g).min(255.0),
            (sample.rgb[2] * self.scale_b).min(255.0),
        ]
    }
}
