//! Robust region sampling
//!
//! Reduces a pixel region to a representative color and saturation:
//! - Shadow/glare rejection via HSV value cutoffs
//! - Per-channel independent medians over the retained pixels
//! - Arithmetic mean of retained saturations
//!
//! The medians are computed per channel (R, G and B each sorted and indexed
//! separately), not as a joint vector median. Downstream values are pinned
//! to this convention; substituting a true multivariate median changes the
//! output.

use crate::config::SamplingConfig;
use crate::region::{PixelSource, Region};

/// Robust statistics for one sampled region
///
/// Immutable once computed. `pixel_count` is the number of pixels that
/// survived the shadow/glare filter; zero marks a degenerate sample (the
/// rgb/saturation fields are then zero as well, by policy rather than
/// measurement).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Per-channel independent medians of the retained pixels, in [0, 255]
    pub rgb: [f32; 3],
    /// Mean HSV saturation of the retained pixels, in [0, 1]
    pub saturation: f32,
    /// Number of pixels retained after filtering
    pub pixel_count: usize,
}

impl Sample {
    /// True when every pixel in the region was rejected as shadow or glare
    ///
    /// Degenerate samples flow through the pipeline as (0,0,0); this flag is
    /// what distinguishes "no usable pixels" from a genuinely black patch.
    pub fn is_degenerate(&self) -> bool {
        self.pixel_count == 0
    }

    fn degenerate() -> Self {
        Self {
            rgb: [0.0, 0.0, 0.0],
            saturation: 0.0,
            pixel_count: 0,
        }
    }
}

/// Region sampler implementing shadow/glare rejection and median statistics
pub struct RegionSampler {
    shadow_cutoff: f32,
    glare_cutoff: f32,
}

impl Default for RegionSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSampler {
    /// Create a sampler with the default cutoffs (0.05 / 0.95)
    pub fn new() -> Self {
        Self::from_config(&SamplingConfig::default())
    }

    /// Create a sampler from a sampling configuration
    pub fn from_config(config: &SamplingConfig) -> Self {
        Self {
            shadow_cutoff: config.shadow_cutoff,
            glare_cutoff: config.glare_cutoff,
        }
    }

    /// Sample a region down to its robust representative color
    ///
    /// Pure function over the pixel source; the buffer is never mutated.
    /// Pixels whose HSV value v satisfies `v <= shadow_cutoff` or
    /// `v >= glare_cutoff` are excluded. An empty retained set yields the
    /// degenerate zero sample, never an error.
    pub fn sample(&self, source: &impl PixelSource, region: Region) -> Sample {
        let mut reds = Vec::with_capacity((region.w * region.h) as usize);
        let mut greens = Vec::with_capacity(reds.capacity());
        let mut blues = Vec::with_capacity(reds.capacity());
        let mut saturation_sum = 0.0f32;

        for y in region.y..region.y + region.h {
            for x in region.x..region.x + region.w {
                let [r, g, b, _] = source.rgba_at(x, y);
                let (value, saturation) = hsv_value_saturation(r, g, b);

                if value <= self.shadow_cutoff || value >= self.glare_cutoff {
                    continue;
                }

                reds.push(r as f32);
                greens.push(g as f32);
                blues.push(b as f32);
                saturation_sum += saturation;
            }
        }

        if reds.is_empty() {
            return Sample::degenerate();
        }

        let count = reds.len();
        Sample {
            rgb: [
                channel_median(&mut reds),
                channel_median(&mut greens),
                channel_median(&mut blues),
            ],
            saturation: saturation_sum / count as f32,
            pixel_count: count,
        }
    }
}

/// HSV value and saturation of an 8-bit RGB pixel
///
/// v = max/255, s = (max - min)/max, with s = 0 for pure black.
fn hsv_value_saturation(r: u8, g: u8, b: u8) -> (f32, f32) {
    let max = r.max(g).max(b) as f32;
    let min = r.min(g).min(b) as f32;
    let value = max / 255.0;
    let saturation = if max > 0.0 { (max - min) / max } else { 0.0 };
    (value, saturation)
}

/// Median of one channel; sorts in place
fn channel_median(values: &mut [f32]) -> f32 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values[values.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RgbaBuffer;

    fn full_region(buffer: &RgbaBuffer) -> Region {
        let (w, h) = buffer.dimensions();
        Region::new(0, 0, w, h)
    }

    #[test]
    fn test_uniform_region() {
        let mut buffer = RgbaBuffer::new(4, 4);
        buffer.fill_region(Region::new(0, 0, 4, 4), [120, 60, 30]);

        let sample = RegionSampler::new().sample(&buffer, full_region(&buffer));

        assert_eq!(sample.rgb, [120.0, 60.0, 30.0]);
        assert_eq!(sample.pixel_count, 16);
        // s = (120 - 30) / 120
        assert!((sample.saturation - 0.75).abs() < 1e-6);
        assert!(!sample.is_degenerate());
    }

    #[test]
    fn test_glare_pixels_excluded() {
        // Left half glare-white (v = 1.0), right half mid-gray
        let mut buffer = RgbaBuffer::new(4, 2);
        buffer.fill_region(Region::new(0, 0, 2, 2), [255, 255, 255]);
        buffer.fill_region(Region::new(2, 0, 2, 2), [128, 128, 128]);

        let sample = RegionSampler::new().sample(&buffer, full_region(&buffer));

        // Statistics must reflect only the mid-gray subset
        assert_eq!(sample.rgb, [128.0, 128.0, 128.0]);
        assert_eq!(sample.saturation, 0.0);
        assert_eq!(sample.pixel_count, 4);
    }

    #[test]
    fn test_shadow_pixels_excluded() {
        // v = 10/255 ≈ 0.039 falls below the 0.05 cutoff
        let mut buffer = RgbaBuffer::new(2, 2);
        buffer.fill_region(Region::new(0, 0, 2, 1), [10, 10, 10]);
        buffer.fill_region(Region::new(0, 1, 2, 1), [100, 100, 100]);

        let sample = RegionSampler::new().sample(&buffer, full_region(&buffer));

        assert_eq!(sample.rgb, [100.0, 100.0, 100.0]);
        assert_eq!(sample.pixel_count, 2);
    }

    #[test]
    fn test_fully_degenerate_region() {
        // All glare: every pixel excluded, silent zero sample
        let mut buffer = RgbaBuffer::new(3, 3);
        buffer.fill_region(Region::new(0, 0, 3, 3), [250, 250, 250]);

        let sample = RegionSampler::new().sample(&buffer, full_region(&buffer));

        assert!(sample.is_degenerate());
        assert_eq!(sample.rgb, [0.0, 0.0, 0.0]);
        assert_eq!(sample.saturation, 0.0);
    }

    #[test]
    fn test_medians_are_per_channel() {
        // Channels deliberately decorrelated: the per-channel medians do not
        // correspond to any single pixel in the region.
        let mut buffer = RgbaBuffer::new(3, 1);
        buffer.fill_region(Region::new(0, 0, 1, 1), [100, 30, 200]);
        buffer.fill_region(Region::new(1, 0, 1, 1), [110, 20, 180]);
        buffer.fill_region(Region::new(2, 0, 1, 1), [90, 40, 220]);

        let sample = RegionSampler::new().sample(&buffer, full_region(&buffer));

        assert_eq!(sample.rgb, [100.0, 30.0, 200.0]);
    }

    #[test]
    fn test_custom_cutoffs() {
        let config = SamplingConfig {
            shadow_cutoff: 0.3,
            glare_cutoff: 0.7,
        };
        // v = 128/255 ≈ 0.502: retained only under the widened cutoffs
        let mut buffer = RgbaBuffer::new(2, 2);
        buffer.fill_region(Region::new(0, 0, 2, 2), [128, 128, 128]);

        let sample = RegionSampler::from_config(&config).sample(&buffer, full_region(&buffer));
        assert_eq!(sample.pixel_count, 4);

        let narrow = SamplingConfig {
            shadow_cutoff: 0.6,
            glare_cutoff: 0.7,
        };
        let sample = RegionSampler::from_config(&narrow).sample(&buffer, full_region(&buffer));
        assert!(sample.is_degenerate());
    }
}
