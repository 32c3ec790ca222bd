//! Reference values and default thresholds for strip analysis
//!
//! This module contains the standard-colorimetry constants the conversion
//! pipeline must reproduce exactly, plus the default filtering and
//! calibration thresholds (overridable via [`AnalysisConfig`]).
//!
//! [`AnalysisConfig`]: crate::config::AnalysisConfig

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. This is the standard reference for digital
/// images and computer displays.
pub mod d65 {
    /// D65 reference white in CIE XYZ, scaled to Y = 100
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_X: f32 = 95.047;
    pub const WHITE_Y: f32 = 100.0;
    pub const WHITE_Z: f32 = 108.883;
}

/// sRGB to CIE XYZ conversion (D65, 2 degree observer)
///
/// Four-digit matrix as published in IEC 61966-2-1; downstream results are
/// pinned to these exact coefficients, so do not substitute a
/// higher-precision variant.
pub mod srgb {
    pub const XYZ_ROW_X: [f32; 3] = [0.4124, 0.3576, 0.1805];
    pub const XYZ_ROW_Y: [f32; 3] = [0.2126, 0.7152, 0.0722];
    pub const XYZ_ROW_Z: [f32; 3] = [0.0193, 0.1192, 0.9505];

    /// Gamma expansion breakpoint for the sRGB transfer function
    pub const GAMMA_BREAKPOINT: f32 = 0.04045;
    /// Divisor for the linear segment of the transfer function
    pub const GAMMA_LINEAR_DIVISOR: f32 = 12.92;
}

/// CIE L*a*b* nonlinearity
pub mod cie {
    /// Breakpoint (6/29)^3 between the cube-root and linear segments
    pub const F_BREAKPOINT: f32 = 0.008856;
    /// Slope of the linear segment, (1/3)(29/6)^2
    pub const F_LINEAR_SLOPE: f32 = 7.787;
    /// Offset of the linear segment, 16/116
    pub const F_LINEAR_OFFSET: f32 = 16.0 / 116.0;
}

/// Default sampling and calibration thresholds
///
/// The clipping cutoffs and the saturation warning level are empirical;
/// optimal values depend on sensor and lighting conditions, which is why
/// they are surfaced in the config rather than hardcoded in the pipeline.
pub mod thresholds {
    /// HSV value at or below which a pixel counts as shadow and is excluded
    pub const SHADOW_VALUE_CUTOFF: f32 = 0.05;

    /// HSV value at or above which a pixel counts as glare and is excluded
    pub const GLARE_VALUE_CUTOFF: f32 = 0.95;

    /// Brightness (of 255) the control patch is scaled to during calibration
    pub const TARGET_WHITE_LEVEL: f32 = 240.0;

    /// Floor applied to control channels before computing gains
    pub const CONTROL_CHANNEL_FLOOR: f32 = 1.0;

    /// Control-patch saturation above which the white reference is likely
    /// contaminated by a tinted ambient light
    pub const CONTROL_SATURATION_WARNING: f32 = 0.15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d65_reference_white() {
        assert!((d65::WHITE_X - 95.047).abs() < 1e-5);
        assert!((d65::WHITE_Y - 100.0).abs() < 1e-5);
        assert!((d65::WHITE_Z - 108.883).abs() < 1e-5);
    }

    #[test]
    fn test_srgb_matrix_rows_sum_near_white() {
        // Each row applied to (1,1,1) should land on the D65 white point / 100
        let x: f32 = srgb::XYZ_ROW_X.iter().sum();
        let y: f32 = srgb::XYZ_ROW_Y.iter().sum();
        let z: f32 = srgb::XYZ_ROW_Z.iter().sum();
        assert!((x * 100.0 - d65::WHITE_X).abs() < 0.05);
        assert!((y * 100.0 - d65::WHITE_Y).abs() < 0.05);
        assert!((z * 100.0 - d65::WHITE_Z).abs() < 0.05);
    }

    #[test]
    fn test_threshold_ranges() {
        assert!(thresholds::SHADOW_VALUE_CUTOFF < thresholds::GLARE_VALUE_CUTOFF);
        assert!(thresholds::TARGET_WHITE_LEVEL <= 255.0);
        assert!(thresholds::CONTROL_SATURATION_WARNING > 0.0);
        assert!(thresholds::CONTROL_SATURATION_WARNING < 1.0);
    }
}
