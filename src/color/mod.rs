//! Color conversion and comparison module
//!
//! This module handles the corrected-RGB to CIE L*a*b* transform and the
//! perceptual-distance classification of the test sample against the two
//! references.

pub mod comparison;
pub mod conversion;

pub use comparison::{ColorComparator, ComparisonResult, Winner};
pub use conversion::ColorConverter;
