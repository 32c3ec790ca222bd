//! Regions of interest and the pixel-buffer boundary
//!
//! The image-decoding and ROI-drawing collaborators hand this crate four
//! rectangular regions and per-pixel RGBA access. [`PixelSource`] is the
//! seam between them: any decoded frame that can answer `dimensions` and
//! `rgba_at` can be analyzed. [`RgbaBuffer`] is an owned implementation
//! used by tests, benches and the demo CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalysisError, Result};

/// Fixed roles of the four analysis regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionRole {
    /// First known reference color
    #[serde(rename = "A")]
    ReferenceA,
    /// Second known reference color
    #[serde(rename = "B")]
    ReferenceB,
    /// Unknown sample under test
    #[serde(rename = "TEST")]
    Test,
    /// Expected-white patch used for calibration
    #[serde(rename = "CONTROL")]
    Control,
}

impl fmt::Display for RegionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegionRole::ReferenceA => "reference A",
            RegionRole::ReferenceB => "reference B",
            RegionRole::Test => "test strip",
            RegionRole::Control => "control patch",
        };
        f.write_str(name)
    }
}

/// Rectangular area of interest in source-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Check the region invariant: non-empty and fully inside `image_w` x `image_h`
    pub fn fits_within(&self, image_w: u32, image_h: u32) -> bool {
        self.w > 0
            && self.h > 0
            && self.x.checked_add(self.w).is_some_and(|right| right <= image_w)
            && self.y.checked_add(self.h).is_some_and(|bottom| bottom <= image_h)
    }
}

/// A complete set of the four analysis regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSet {
    pub reference_a: Region,
    pub reference_b: Region,
    pub test: Region,
    pub control: Region,
}

impl RegionSet {
    pub fn new(reference_a: Region, reference_b: Region, test: Region, control: Region) -> Self {
        Self {
            reference_a,
            reference_b,
            test,
            control,
        }
    }

    /// Look up the region for a role
    pub fn region(&self, role: RegionRole) -> Region {
        match role {
            RegionRole::ReferenceA => self.reference_a,
            RegionRole::ReferenceB => self.reference_b,
            RegionRole::Test => self.test,
            RegionRole::Control => self.control,
        }
    }

    /// Validate every region against the source dimensions
    pub fn validate(&self, image_w: u32, image_h: u32) -> Result<()> {
        for role in [
            RegionRole::ReferenceA,
            RegionRole::ReferenceB,
            RegionRole::Test,
            RegionRole::Control,
        ] {
            let r = self.region(role);
            if !r.fits_within(image_w, image_h) {
                return Err(AnalysisError::RegionOutOfBounds {
                    role,
                    x: r.x,
                    y: r.y,
                    w: r.w,
                    h: r.h,
                    image_w,
                    image_h,
                });
            }
        }
        Ok(())
    }
}

/// In-progress region selection, as driven by the interactive collaborator
///
/// Roles are filled one at a time; [`RegionSelection::complete`] is the
/// precondition gate that rejects analysis until all four are defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionSelection {
    pub reference_a: Option<Region>,
    pub reference_b: Option<Region>,
    pub test: Option<Region>,
    pub control: Option<Region>,
}

impl RegionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the region for a role, replacing any previous selection
    pub fn select(&mut self, role: RegionRole, region: Region) {
        match role {
            RegionRole::ReferenceA => self.reference_a = Some(region),
            RegionRole::ReferenceB => self.reference_b = Some(region),
            RegionRole::Test => self.test = Some(region),
            RegionRole::Control => self.control = Some(region),
        }
    }

    /// Convert to a [`RegionSet`], failing on the first missing role
    pub fn complete(&self) -> Result<RegionSet> {
        let missing = |role| AnalysisError::MissingRegion { role };
        Ok(RegionSet {
            reference_a: self.reference_a.ok_or_else(|| missing(RegionRole::ReferenceA))?,
            reference_b: self.reference_b.ok_or_else(|| missing(RegionRole::ReferenceB))?,
            test: self.test.ok_or_else(|| missing(RegionRole::Test))?,
            control: self.control.ok_or_else(|| missing(RegionRole::Control))?,
        })
    }
}

/// Read-only access to decoded image pixels
///
/// Implemented by the image-decoding collaborator. Coordinates passed by the
/// pipeline are always inside `dimensions()` because regions are validated
/// first.
pub trait PixelSource {
    /// Source image dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// RGBA bytes of the pixel at (x, y)
    fn rgba_at(&self, x: u32, y: u32) -> [u8; 4];
}

/// Owned RGBA pixel buffer
///
/// Reference [`PixelSource`] implementation; handy for tests and for callers
/// that already hold decoded bytes.
#[derive(Debug, Clone)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaBuffer {
    /// Create a buffer filled with opaque black
    pub fn new(width: u32, height: u32) -> Self {
        let mut data = vec![0u8; (width as usize) * (height as usize) * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self { width, height, data }
    }

    /// Wrap existing interleaved RGBA bytes (length must be w*h*4)
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() == (width as usize) * (height as usize) * 4 {
            Some(Self { width, height, data })
        } else {
            None
        }
    }

    /// Fill a rectangle with a solid RGB color (alpha forced opaque)
    pub fn fill_region(&mut self, region: Region, rgb: [u8; 3]) {
        for y in region.y..region.y.saturating_add(region.h).min(self.height) {
            for x in region.x..region.x.saturating_add(region.w).min(self.width) {
                let i = ((y as usize * self.width as usize) + x as usize) * 4;
                self.data[i] = rgb[0];
                self.data[i + 1] = rgb[1];
                self.data[i + 2] = rgb[2];
                self.data[i + 3] = 255;
            }
        }
    }
}

impl PixelSource for RgbaBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_fits_within() {
        assert!(Region::new(0, 0, 10, 10).fits_within(10, 10));
        assert!(Region::new(5, 5, 5, 5).fits_within(10, 10));
        assert!(!Region::new(5, 5, 6, 5).fits_within(10, 10));
        assert!(!Region::new(0, 0, 0, 10).fits_within(10, 10));
        assert!(!Region::new(0, 0, 10, 0).fits_within(10, 10));
    }

    #[test]
    fn test_selection_requires_all_roles() {
        let mut selection = RegionSelection::new();
        let r = Region::new(0, 0, 2, 2);

        selection.select(RegionRole::ReferenceA, r);
        selection.select(RegionRole::ReferenceB, r);
        selection.select(RegionRole::Test, r);

        match selection.complete() {
            Err(AnalysisError::MissingRegion { role }) => {
                assert_eq!(role, RegionRole::Control);
            }
            other => panic!("Expected MissingRegion, got: {:?}", other),
        }

        selection.select(RegionRole::Control, r);
        assert!(selection.complete().is_ok());
    }

    #[test]
    fn test_region_set_validation() {
        let good = Region::new(0, 0, 4, 4);
        let bad = Region::new(8, 8, 4, 4);
        let set = RegionSet::new(good, good, good, bad);

        match set.validate(10, 10) {
            Err(AnalysisError::RegionOutOfBounds { role, .. }) => {
                assert_eq!(role, RegionRole::Control);
            }
            other => panic!("Expected RegionOutOfBounds, got: {:?}", other),
        }

        let set = RegionSet::new(good, good, good, good);
        assert!(set.validate(10, 10).is_ok());
    }

    #[test]
    fn test_rgba_buffer_fill_and_read() {
        let mut buffer = RgbaBuffer::new(4, 4);
        buffer.fill_region(Region::new(1, 1, 2, 2), [10, 20, 30]);

        assert_eq!(buffer.rgba_at(0, 0), [0, 0, 0, 255]);
        assert_eq!(buffer.rgba_at(1, 1), [10, 20, 30, 255]);
        assert_eq!(buffer.rgba_at(2, 2), [10, 20, 30, 255]);
        assert_eq!(buffer.rgba_at(3, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn test_from_raw_length_check() {
        assert!(RgbaBuffer::from_raw(2, 2, vec![0; 16]).is_some());
        assert!(RgbaBuffer::from_raw(2, 2, vec![0; 15]).is_none());
    }
}
