use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub seed: u32,
    /// Noise frequency in cycles per world unit.
    pub frequency: f64,
    pub octaves: usize,
    /// World is a square grid of this many chunks per side.
    pub world_size: usize,
    /// Render-space width of one chunk, used to map particle world
    /// positions onto chunk-local voxel coordinates.
    pub chunk_world_units: f32,
    pub waterfall_chunk_x: usize,
    pub waterfall_chunk_z: usize,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 0.01,
            octaves: 6,
            world_size: 16,
            chunk_world_units: 20.0,
            waterfall_chunk_x: 7,
            waterfall_chunk_z: 7,
        }
    }
}
