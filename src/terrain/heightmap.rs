use std::path::Path;

use image::{Rgb, RgbImage};

use crate::utils::error::VoxfallError;
use crate::world::volume::CHUNK_SIZE;

/// Color gradient used by the debug bitmap, from ocean depths up to snow.
/// Stops are raw noise values in [-1, 1].
const GRADIENT: [(f64, [u8; 3]); 8] = [
    (-1.0000, [0, 0, 128]),
    (-0.2500, [0, 0, 255]),
    (0.0000, [0, 128, 255]),
    (0.0625, [240, 240, 64]),
    (0.1250, [32, 160, 0]),
    (0.3750, [224, 224, 0]),
    (0.7500, [128, 128, 128]),
    (1.0000, [255, 255, 255]),
];

/// Grid of raw noise samples for one chunk footprint, before normalization.
pub struct NoiseMap {
    width: usize,
    depth: usize,
    values: Vec<f64>,
}

impl NoiseMap {
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            values: vec![0.0; width * depth],
        }
    }

    /// A map where every cell holds the same value; synthetic stand-in for
    /// real noise under test.
    pub fn constant(width: usize, depth: usize, value: f64) -> Self {
        Self {
            width,
            depth,
            values: vec![value; width * depth],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get(&self, x: usize, z: usize) -> f64 {
        self.values[x * self.depth + z]
    }

    pub fn set(&mut self, x: usize, z: usize, value: f64) {
        self.values[x * self.depth + z] = value;
    }

    /// Writes the raw samples as a color-graded raster image for eyeballing
    /// noise parameters. Format follows the file extension. Diagnostic only.
    pub fn write_bitmap<P: AsRef<Path>>(&self, path: P) -> Result<(), VoxfallError> {
        let image = RgbImage::from_fn(self.width as u32, self.depth as u32, |x, z| {
            Rgb(gradient_color(self.get(x as usize, z as usize)))
        });
        image.save(path)?;
        Ok(())
    }
}

fn gradient_color(value: f64) -> [u8; 3] {
    let (first, last) = (GRADIENT[0], GRADIENT[GRADIENT.len() - 1]);
    if value <= first.0 {
        return first.1;
    }
    if value >= last.0 {
        return last.1;
    }

    for pair in GRADIENT.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if value <= hi.0 {
            let t = (value - lo.0) / (hi.0 - lo.0);
            let mut rgb = [0u8; 3];
            for (channel, slot) in rgb.iter_mut().enumerate() {
                let blended =
                    lo.1[channel] as f64 + t * (hi.1[channel] as f64 - lo.1[channel] as f64);
                *slot = blended.round() as u8;
            }
            return rgb;
        }
    }

    last.1
}

/// Per-column surface heights for one chunk, normalized into block units.
///
/// Every value is clamped to `[1, CHUNK_SIZE]`: at least one solid layer per
/// column, never past the top of the volume. Smooth terrain keeps the
/// fractional height for interpolation; the voxel fill rounds it.
pub struct HeightMap {
    width: usize,
    depth: usize,
    heights: Vec<f32>,
}

impl HeightMap {
    pub fn filled(width: usize, depth: usize, height: f32) -> Self {
        Self {
            width,
            depth,
            heights: vec![height; width * depth],
        }
    }

    /// Normalizes raw noise into block heights: `(raw + 1) * S/2`, clamped.
    pub fn from_noise(noise: &NoiseMap) -> Self {
        let mut map = Self::filled(noise.width(), noise.depth(), 0.0);
        for x in 0..noise.width() {
            for z in 0..noise.depth() {
                let scaled = (noise.get(x, z) + 1.0) * (CHUNK_SIZE as f64 / 2.0);
                map.set(x, z, scaled.clamp(1.0, CHUNK_SIZE as f64) as f32);
            }
        }
        map
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.heights[x * self.depth + z]
    }

    pub fn set(&mut self, x: usize, z: usize, height: f32) {
        self.heights[x * self.depth + z] = height;
    }

    /// Column height in whole blocks, for the voxel fill.
    pub fn block_height(&self, x: usize, z: usize) -> usize {
        self.get(x, z).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_clamps_extremes() {
        let floor = HeightMap::from_noise(&NoiseMap::constant(4, 4, -1.0));
        assert_eq!(floor.get(0, 0), 1.0);
        assert_eq!(floor.block_height(0, 0), 1);

        let mid = HeightMap::from_noise(&NoiseMap::constant(4, 4, 0.0));
        assert_eq!(mid.get(0, 0), CHUNK_SIZE as f32 / 2.0);

        let ceiling = HeightMap::from_noise(&NoiseMap::constant(4, 4, 1.0));
        assert_eq!(ceiling.get(0, 0), CHUNK_SIZE as f32);
        assert_eq!(ceiling.block_height(0, 0), CHUNK_SIZE);

        // Values past the nominal noise range still clamp.
        let over = HeightMap::from_noise(&NoiseMap::constant(4, 4, 1.5));
        assert_eq!(over.get(0, 0), CHUNK_SIZE as f32);
    }

    #[test]
    fn test_gradient_endpoints_and_interpolation() {
        assert_eq!(gradient_color(-2.0), [0, 0, 128]);
        assert_eq!(gradient_color(1.0), [255, 255, 255]);
        // Halfway between the -1.0 and -0.25 stops.
        assert_eq!(gradient_color(-0.625), [0, 0, 192]);
    }

    #[test]
    fn test_bitmap_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrain.bmp");

        let mut noise = NoiseMap::constant(8, 8, 0.0);
        noise.set(3, 4, 1.0);
        noise.write_bitmap(&path).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image.get_pixel(3, 4).0, [255, 255, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 128, 255]);
    }
}
