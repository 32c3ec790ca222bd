//! Color space conversion
//!
//! Converts white-balanced RGB into CIE L*a*b* via the standard
//! sRGB → linear RGB → XYZ → Lab pipeline under D65.
//!
//! The transform is implemented here rather than delegated to `palette`'s
//! conversion traits because measurements must reproduce the published
//! four-digit sRGB matrix and the 7.787/0.008856 CIE breakpoint
//! coefficients exactly; `palette` carries higher-precision variants that
//! produce slightly different values.

use palette::Lab;

use crate::constants::{cie, d65, srgb};

/// Converter from corrected RGB (each channel in [0, 255]) to CIE L*a*b*
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert a corrected RGB triple to Lab (D65)
    pub fn rgb_to_lab(&self, rgb: [f32; 3]) -> Lab {
        let r = gamma_expand(rgb[0] / 255.0) * 100.0;
        let g = gamma_expand(rgb[1] / 255.0) * 100.0;
        let b = gamma_expand(rgb[2] / 255.0) * 100.0;

        let x = srgb::XYZ_ROW_X[0] * r + srgb::XYZ_ROW_X[1] * g + srgb::XYZ_ROW_X[2] * b;
        let y = srgb::XYZ_ROW_Y[0] * r + srgb::XYZ_ROW_Y[1] * g + srgb::XYZ_ROW_Y[2] * b;
        let z = srgb::XYZ_ROW_Z[0] * r + srgb::XYZ_ROW_Z[1] * g + srgb::XYZ_ROW_Z[2] * b;

        let fx = cie_f(x / d65::WHITE_X);
        let fy = cie_f(y / d65::WHITE_Y);
        let fz = cie_f(z / d65::WHITE_Z);

        Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }

    /// Euclidean distance between two Lab colors (ΔE76)
    ///
    /// Plain distance, not CIE94/CIEDE2000; the simplification is part of
    /// the measurement contract.
    pub fn delta_e(&self, lab1: Lab, lab2: Lab) -> f32 {
        let dl = lab1.l - lab2.l;
        let da = lab1.a - lab2.a;
        let db = lab1.b - lab2.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

/// sRGB transfer function (gamma expansion), input and output in [0, 1]
fn gamma_expand(v: f32) -> f32 {
    if v > srgb::GAMMA_BREAKPOINT {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / srgb::GAMMA_LINEAR_DIVISOR
    }
}

/// CIE Lab nonlinearity f(t)
fn cie_f(t: f32) -> f32 {
    if t > cie::F_BREAKPOINT {
        t.cbrt()
    } else {
        cie::F_LINEAR_SLOPE * t + cie::F_LINEAR_OFFSET
    }
}
