//! Error types for the strip_colors library

use thiserror::Error;

use crate::region::RegionRole;

/// Result type alias for strip_colors operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for test-strip color analysis
///
/// Degenerate samples (every pixel rejected by the shadow/glare filter) are
/// deliberately *not* errors: the sampler returns a zeroed [`Sample`] with
/// `pixel_count == 0` and the pipeline completes. See [`Sample::is_degenerate`].
///
/// [`Sample`]: crate::sampling::Sample
/// [`Sample::is_degenerate`]: crate::sampling::Sample::is_degenerate
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Analysis was invoked before all four regions were defined
    #[error("Region for {role} has not been selected")]
    MissingRegion { role: RegionRole },

    /// A region is empty or extends past the source image bounds
    #[error("Region for {role} ({x},{y} {w}x{h}) is invalid for a {image_w}x{image_h} image")]
    RegionOutOfBounds {
        role: RegionRole,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        image_w: u32,
        image_h: u32,
    },

    /// The external narrative service failed or returned nothing
    ///
    /// Never fails an analysis: the numeric result stands and a fixed
    /// fallback string is substituted for the narrative text.
    #[error("Narrative generation failed: {message}")]
    NarrativeUnavailable { message: String },
}

impl AnalysisError {
    /// Create a narrative error with context
    pub fn narrative(message: impl Into<String>) -> Self {
        Self::NarrativeUnavailable {
            message: message.into(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Narrative failures are always recoverable (the numeric result is
    /// already complete); region errors require the user to re-select.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalysisError::NarrativeUnavailable { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::MissingRegion { role } => {
                format!("Please select the {} area before running the analysis.", role)
            }
            AnalysisError::RegionOutOfBounds { role, .. } => {
                format!("The {} selection falls outside the photo. Please redraw it.", role)
            }
            AnalysisError::NarrativeUnavailable { .. } => {
                "The written summary could not be generated. Numeric results are still valid."
                    .to_string()
            }
        }
    }
}
