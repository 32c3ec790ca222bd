//! # Strip Colors
//!
//! A Rust crate for classifying chemical test-strip colors from digital
//! photographs.
//!
//! This library decides which of two known reference colors an unknown
//! sample more closely matches by:
//! - Reducing each pixel region to a robust color (shadow/glare rejection,
//!   per-channel medians)
//! - Correcting ambient color cast via an in-frame white-reference patch
//! - Converting corrected colors to CIE L*a*b*
//! - Classifying by perceptual distance with complementary confidence
//!   percentages
//!
//! Image decoding, interactive region selection and narrative text
//! generation are collaborator responsibilities; the pipeline is a pure
//! function of (pixel source, four regions, config) and holds no state
//! between runs.
//!
//! ## Example
//!
//! ```rust
//! use strip_colors::{analyze, AnalysisConfig, Region, RegionSet, RgbaBuffer, Winner};
//!
//! let mut photo = RgbaBuffer::new(8, 8);
//! photo.fill_region(Region::new(0, 0, 2, 2), [180, 40, 40]);   // reference A
//! photo.fill_region(Region::new(2, 0, 2, 2), [40, 40, 180]);   // reference B
//! photo.fill_region(Region::new(4, 0, 2, 2), [170, 50, 45]);   // test sample
//! photo.fill_region(Region::new(6, 0, 2, 2), [230, 230, 230]); // control patch
//!
//! let regions = RegionSet::new(
//!     Region::new(0, 0, 2, 2),
//!     Region::new(2, 0, 2, 2),
//!     Region::new(4, 0, 2, 2),
//!     Region::new(6, 0, 2, 2),
//! );
//!
//! let analysis = analyze(&photo, &regions, &AnalysisConfig::default())?;
//! assert_eq!(analysis.comparison.winner, Winner::ReferenceA);
//! # Ok::<(), strip_colors::AnalysisError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod calibration;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod narrative;
pub mod region;
pub mod sampling;

pub use calibration::WhiteBalance;
pub use color::{ColorComparator, ColorConverter, ComparisonResult, Winner};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use narrative::{narrate, AnalysisSummary, NarrativeGenerator, FALLBACK_NARRATIVE};
pub use region::{PixelSource, Region, RegionRole, RegionSelection, RegionSet, RgbaBuffer};
pub use sampling::{RegionSampler, Sample};

/// Complete output of one analysis run
///
/// A new run fully replaces any prior result; nothing is merged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StripAnalysis {
    /// Winner, percentages, distances and control saturation
    pub comparison: ComparisonResult,
    /// Structured numeric summary for the narrative collaborator
    pub summary: AnalysisSummary,
}

impl StripAnalysis {
    /// Render the numeric verdict plus external narrative as display text
    ///
    /// The generator's response is appended verbatim; if it fails or returns
    /// an empty string, [`FALLBACK_NARRATIVE`] is appended instead. The
    /// numeric portion is already final either way.
    pub fn narrated_report(&self, generator: &dyn NarrativeGenerator) -> String {
        let c = &self.comparison;
        let winner = match c.winner {
            Winner::ReferenceA => "A",
            Winner::ReferenceB => "B",
        };
        let mut report = format!(
            "Match: reference {} ({:.1}% vs {:.1}%)\nDeltaE to A: {:.2}  DeltaE to B: {:.2}\n",
            winner,
            c.winning_pct(),
            100.0 - c.winning_pct(),
            c.delta_e_a,
            c.delta_e_b,
        );
        if c.default_saturation_warning() {
            report.push_str(&format!(
                "Warning: control patch saturation {:.2} suggests tinted lighting; \
                 calibration may be unreliable.\n",
                c.control_saturation
            ));
        }
        report.push('\n');
        report.push_str(&narrate(generator, &self.summary));
        report
    }
}

/// Analyze a photographed test strip
///
/// This is the main entry point. It samples the four regions, derives white
/// balance gains from the control patch, converts the corrected colors to
/// CIE L*a*b* and classifies the test sample against the two references.
///
/// Deterministic and synchronous: identical inputs produce identical
/// results, and the numeric outcome is complete before any external
/// narrative call is made.
///
/// # Arguments
///
/// * `source` - Pixel accessor over the decoded photograph
/// * `regions` - The four analysis regions keyed by role
/// * `config` - Sampling and calibration parameters
///
/// # Errors
///
/// Returns [`AnalysisError::RegionOutOfBounds`] if any region is empty or
/// extends past the source dimensions. Regions in which every pixel is
/// rejected as shadow or glare do *not* error; they degrade to zero samples
/// (see [`Sample::is_degenerate`]).
pub fn analyze(
    source: &impl PixelSource,
    regions: &RegionSet,
    config: &AnalysisConfig,
) -> Result<StripAnalysis> {
    let (image_w, image_h) = source.dimensions();
    regions.validate(image_w, image_h)?;

    let sampler = RegionSampler::from_config(&config.sampling);
    let control = sampler.sample(source, regions.control);
    let sample_a = sampler.sample(source, regions.reference_a);
    let sample_b = sampler.sample(source, regions.reference_b);
    let sample_test = sampler.sample(source, regions.test);

    let white_balance =
        WhiteBalance::from_control_with_target(&control, config.calibration.target_white_level);

    let converter = ColorConverter::new();
    let lab_reference_a = converter.rgb_to_lab(white_balance.apply(&sample_a));
    let lab_reference_b = converter.rgb_to_lab(white_balance.apply(&sample_b));
    let lab_test = converter.rgb_to_lab(white_balance.apply(&sample_test));

    let comparison = ColorComparator::new().classify(
        lab_test,
        lab_reference_a,
        lab_reference_b,
        control.saturation,
    );

    Ok(StripAnalysis {
        comparison,
        summary: AnalysisSummary {
            white_balance,
            lab_reference_a,
            lab_reference_b,
            lab_test,
            comparison,
        },
    })
}

/// Analyze from an in-progress region selection
///
/// Precondition gate for interactive callers: fails with
/// [`AnalysisError::MissingRegion`] before touching any pixels if a role has
/// not been selected yet.
pub fn analyze_selection(
    source: &impl PixelSource,
    selection: &RegionSelection,
    config: &AnalysisConfig,
) -> Result<StripAnalysis> {
    let regions = selection.complete()?;
    analyze(source, &regions, config)
}
