//! Structured numeric summary and the narrative-service seam
//!
//! The core finishes every numeric computation before the narrative call;
//! whatever the external service does with the prompt cannot invalidate the
//! already-computed result. Its response is opaque text, appended verbatim
//! and never parsed. On failure (or an empty response) a fixed fallback
//! line stands in.

use palette::Lab;
use serde::{Deserialize, Serialize};

use crate::calibration::WhiteBalance;
use crate::color::comparison::{ComparisonResult, Winner};
use crate::error::Result;

/// Fallback narrative used when the external service fails or returns nothing
pub const FALLBACK_NARRATIVE: &str =
    "Narrative unavailable. Refer to the numeric comparison above.";

/// Structured numeric summary of one analysis run
///
/// Everything the narrative collaborator needs: white-balance gains, control
/// saturation, the three Lab triples, both distances and the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Gains applied during white balance correction
    pub white_balance: WhiteBalance,
    /// Lab triple of reference A after correction
    pub lab_reference_a: Lab,
    /// Lab triple of reference B after correction
    pub lab_reference_b: Lab,
    /// Lab triple of the test sample after correction
    pub lab_test: Lab,
    /// Winner, percentages, distances and control saturation
    pub comparison: ComparisonResult,
}

impl AnalysisSummary {
    /// Render the summary as a natural-language prompt for the narrative service
    pub fn to_prompt(&self) -> String {
        let c = &self.comparison;
        let winner = match c.winner {
            Winner::ReferenceA => "A",
            Winner::ReferenceB => "B",
        };
        let mut prompt = String::with_capacity(640);

        prompt.push_str(
            "You are writing a short plain-language report of a colorimetric \
             test-strip comparison. Use only the numbers given.\n",
        );
        prompt.push_str(&format!(
            "White balance gains from the control patch: R x{:.3}, G x{:.3}, B x{:.3}.\n",
            self.white_balance.scale_r, self.white_balance.scale_g, self.white_balance.scale_b
        ));
        prompt.push_str(&format!(
            "Control patch saturation: {:.3}{}.\n",
            c.control_saturation,
            if c.default_saturation_warning() {
                " (warning: the white reference appears tinted)"
            } else {
                ""
            }
        ));
        prompt.push_str(&format!(
            "Reference A in CIE Lab: L*={:.2}, a*={:.2}, b*={:.2}.\n",
            self.lab_reference_a.l, self.lab_reference_a.a, self.lab_reference_a.b
        ));
        prompt.push_str(&format!(
            "Reference B in CIE Lab: L*={:.2}, a*={:.2}, b*={:.2}.\n",
            self.lab_reference_b.l, self.lab_reference_b.a, self.lab_reference_b.b
        ));
        prompt.push_str(&format!(
            "Test sample in CIE Lab: L*={:.2}, a*={:.2}, b*={:.2}.\n",
            self.lab_test.l, self.lab_test.a, self.lab_test.b
        ));
        prompt.push_str(&format!(
            "Distance to A: deltaE {:.2}. Distance to B: deltaE {:.2}.\n",
            c.delta_e_a, c.delta_e_b
        ));
        prompt.push_str(&format!(
            "The test sample matches reference {} with {:.1}% confidence.",
            winner,
            c.winning_pct()
        ));
        prompt
    }
}

/// External narrative-generation collaborator
///
/// The sole suspension point of the wider system sits behind this trait;
/// implementations may block, retry, or talk to a remote service as they
/// see fit. The core only consumes the final text.
pub trait NarrativeGenerator {
    /// Produce narrative text for the given prompt
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Run the generator over the summary, substituting the fallback on failure
///
/// Errors and empty responses both degrade to [`FALLBACK_NARRATIVE`]; the
/// analysis itself never fails on account of the narrative.
pub fn narrate(generator: &dyn NarrativeGenerator, summary: &AnalysisSummary) -> String {
    match generator.generate(&summary.to_prompt()) {
        Ok(text) if !text.trim().is_empty() => text,
        _ => FALLBACK_NARRATIVE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::comparison::ColorComparator;
    use crate::error::AnalysisError;
    use crate::sampling::Sample;

    fn summary() -> AnalysisSummary {
        let control = Sample {
            rgb: [200.0, 195.0, 190.0],
            saturation: 0.05,
            pixel_count: 64,
        };
        let wb = WhiteBalance::from_control(&control);
        let lab_a = Lab::new(60.0, 20.0, 10.0);
        let lab_b = Lab::new(40.0, -15.0, 5.0);
        let lab_test = Lab::new(58.0, 18.0, 9.0);
        let comparison = ColorComparator::new().classify(lab_test, lab_a, lab_b, 0.05);

        AnalysisSummary {
            white_balance: wb,
            lab_reference_a: lab_a,
            lab_reference_b: lab_b,
            lab_test,
            comparison,
        }
    }

    struct CannedGenerator(&'static str);

    impl NarrativeGenerator for CannedGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    impl NarrativeGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(AnalysisError::narrative("service unreachable"))
        }
    }

    #[test]
    fn test_prompt_carries_all_figures() {
        let prompt = summary().to_prompt();

        assert!(prompt.contains("White balance gains"));
        assert!(prompt.contains("Reference A in CIE Lab"));
        assert!(prompt.contains("Reference B in CIE Lab"));
        assert!(prompt.contains("Test sample in CIE Lab"));
        assert!(prompt.contains("deltaE"));
        assert!(prompt.contains("matches reference A"));
    }

    #[test]
    fn test_prompt_flags_tinted_control() {
        let mut s = summary();
        s.comparison.control_saturation = 0.3;
        assert!(s.to_prompt().contains("appears tinted"));
    }

    #[test]
    fn test_generated_text_passed_through_verbatim() {
        let text = narrate(&CannedGenerator("  Strip matched reference A.  "), &summary());
        assert_eq!(text, "  Strip matched reference A.  ");
    }

    #[test]
    fn test_failure_substitutes_fallback() {
        let text = narrate(&FailingGenerator, &summary());
        assert_eq!(text, FALLBACK_NARRATIVE);
    }

    #[test]
    fn test_empty_response_substitutes_fallback() {
        let text = narrate(&CannedGenerator("   "), &summary());
        assert_eq!(text, FALLBACK_NARRATIVE);
    }
}
