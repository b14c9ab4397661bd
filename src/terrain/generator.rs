use std::path::Path;

use log::debug;

use crate::terrain::heightmap::HeightMap;
use crate::terrain::noise_field::HeightSource;
use crate::utils::error::VoxfallError;
use crate::world::material::material_for_height;
use crate::world::volume::{VoxelVolume, CHUNK_SIZE};

/// How a chunk was generated, and therefore how it must be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainMode {
    /// Voxel columns rendered as culled cubes.
    Blocky,
    /// Interpolated heightfield surface; voxels still populated for
    /// collision queries.
    Smooth,
}

/// One generated chunk: the voxel volume, its height cache, and the mode it
/// was built in. Owned by exactly one generator call site; read-only once it
/// reaches the mesh encoder.
pub struct Chunk {
    pub volume: VoxelVolume,
    pub heights: HeightMap,
    pub mode: TerrainMode,
}

/// Builds chunks from a height source. Each build call samples the chunk's
/// footprint at a world offset, normalizes the raw samples into block
/// heights and fills voxel columns, classifying each voxel by its own
/// height band.
pub struct TerrainGenerator<S> {
    source: S,
}

impl<S: HeightSource> TerrainGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Blocky landscape: one height sample per column, every voxel from the
    /// floor up to the column height activated.
    pub fn generate(&self, origin_x: f64, origin_z: f64) -> Chunk {
        let noise = self
            .source
            .sample_region(origin_x, origin_z, CHUNK_SIZE, CHUNK_SIZE);
        let heights = HeightMap::from_noise(&noise);

        let mut volume = VoxelVolume::new();
        fill_columns(&mut volume, &heights);

        debug!(
            "generated blocky chunk at ({origin_x}, {origin_z}): {} active voxels",
            volume.active_count()
        );

        Chunk {
            volume,
            heights,
            mode: TerrainMode::Blocky,
        }
    }

    /// Smooth landscape: samples one extra row and column so the surface
    /// stitches against the neighboring chunk, keeps the fractional heights
    /// for the surface encoder, and still fills voxels underneath.
    pub fn generate_smooth(&self, origin_x: f64, origin_z: f64) -> Chunk {
        let noise =
            self.source
                .sample_region(origin_x, origin_z, CHUNK_SIZE + 1, CHUNK_SIZE + 1);
        let heights = HeightMap::from_noise(&noise);

        let mut volume = VoxelVolume::new();
        fill_columns(&mut volume, &heights);

        debug!("generated smooth chunk at ({origin_x}, {origin_z})");

        Chunk {
            volume,
            heights,
            mode: TerrainMode::Smooth,
        }
    }

    /// Writes the chunk footprint's raw noise as a color-graded image, for
    /// eyeballing noise parameters. Diagnostic only.
    pub fn export_noise_bitmap(
        &self,
        origin_x: f64,
        origin_z: f64,
        path: &Path,
    ) -> Result<(), VoxfallError> {
        self.source
            .sample_region(origin_x, origin_z, CHUNK_SIZE, CHUNK_SIZE)
            .write_bitmap(path)
    }
}

/// Activates every voxel column up to its cached height. The height cache
/// may carry the smooth mode's extra row and column; only the volume's own
/// footprint is filled.
fn fill_columns(volume: &mut VoxelVolume, heights: &HeightMap) {
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            let height = heights.block_height(x, z);
            for y in 0..height {
                volume.place(x, y, z, material_for_height(y));
            }
        }
    }
}
