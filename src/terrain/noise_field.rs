use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::config::worldgen::WorldGenConfig;
use crate::terrain::heightmap::NoiseMap;

/// Boundary to the coherent-noise provider.
///
/// The terrain generator only ever needs a rectangular grid of raw samples
/// anchored at a world offset; tests satisfy this with synthetic constant
/// fields instead of real noise.
pub trait HeightSource {
    fn sample_region(&self, origin_x: f64, origin_z: f64, width: usize, depth: usize) -> NoiseMap;
}

/// Multi-octave Perlin heightfield sampler.
///
/// Pure function of seed, frequency and octave count: the same coordinates
/// always produce the same sample, so neighboring chunks that share an edge
/// coordinate stitch seamlessly.
pub struct NoiseField {
    fbm: Fbm<Perlin>,
}

impl NoiseField {
    pub fn new(seed: u32, frequency: f64, octaves: usize) -> Self {
        Self {
            fbm: Fbm::<Perlin>::new(seed)
                .set_frequency(frequency)
                .set_octaves(octaves),
        }
    }

    pub fn from_config(config: &WorldGenConfig) -> Self {
        Self::new(config.seed, config.frequency, config.octaves)
    }

    /// Raw noise sample in roughly [-1, 1] at a continuous world coordinate.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        self.fbm.get([x, z])
    }
}

impl HeightSource for NoiseField {
    /// Samples one grid point per world unit starting at the origin, so a
    /// region of width S+1 anchored at a multiple of S shares its last
    /// column with the next chunk's first.
    fn sample_region(&self, origin_x: f64, origin_z: f64, width: usize, depth: usize) -> NoiseMap {
        let mut map = NoiseMap::new(width, depth);
        for x in 0..width {
            for z in 0..depth {
                map.set(x, z, self.sample(origin_x + x as f64, origin_z + z as f64));
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_is_deterministic() {
        let a = NoiseField::new(7, 0.01, 6);
        let b = NoiseField::new(7, 0.01, 6);
        assert_eq!(a.sample(64.0, 96.0), b.sample(64.0, 96.0));
    }

    #[test]
    fn test_region_dimensions() {
        let field = NoiseField::new(1, 0.01, 6);
        let map = field.sample_region(64.0, 64.0, 33, 33);
        assert_eq!(map.width(), 33);
        assert_eq!(map.depth(), 33);
    }

    #[test]
    fn test_adjacent_regions_share_edge_samples() {
        let field = NoiseField::new(42, 0.01, 6);
        let left = field.sample_region(0.0, 0.0, 33, 33);
        let right = field.sample_region(32.0, 0.0, 33, 33);

        for z in 0..33 {
            assert_eq!(left.get(32, z), right.get(0, z));
        }
    }
}
