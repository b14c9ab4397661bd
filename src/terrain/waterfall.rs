//! Deterministic waterfall landscape: a stone pyramid with a summit lake, a
//! carved channel of falling water down one wall, and a catch pool at the
//! base. Not noise-driven; every bound is fixed so the spray emitters line
//! up with the geometry.

use std::ops::Range;

use log::info;

use crate::terrain::generator::{Chunk, TerrainMode};
use crate::terrain::heightmap::HeightMap;
use crate::world::material::Material;
use crate::world::volume::{VoxelVolume, CHUNK_SIZE};

/// Pyramid walls drop off toward the chunk edges but never below this.
const MOUNTAIN_FLOOR: usize = 3;

pub const LAKE_X: Range<usize> = 10..22;
pub const LAKE_Z: Range<usize> = 10..22;
pub const LAKE_Y: Range<usize> = 22..26;

/// The channel spans three columns on the west wall.
pub const CHANNEL_X: Range<usize> = 10..13;
pub const CHANNEL_Z: Range<usize> = 14..18;
pub const CHANNEL_CARVE_Y: Range<usize> = 0..24;
/// Water fills the carved channel from just above the pool to the lake rim.
pub const CHANNEL_FILL_Y: Range<usize> = 3..24;

pub const POOL_X: Range<usize> = 6..14;
pub const POOL_Z: Range<usize> = 12..20;
pub const POOL_Y: Range<usize> = 0..4;

const TOWER_BASE: (usize, usize) = (22, 16);
const TOWER_HEIGHT: usize = 25;

/// Step-by-step construction of the waterfall landscape.
///
/// The steps are order-dependent: the mountain must exist before the lake,
/// channel and pool overwrite voxels inside its footprint. `build` runs the
/// full sequence; the individual steps stay public so the intermediate
/// states remain observable.
pub struct WaterfallBuilder<'a> {
    volume: &'a mut VoxelVolume,
}

impl<'a> WaterfallBuilder<'a> {
    pub fn new(volume: &'a mut VoxelVolume) -> Self {
        Self { volume }
    }

    /// Runs every construction step in order on a cleared volume.
    pub fn build(&mut self) {
        info!("building waterfall landscape");
        self.volume.clear();
        self.raise_mountain();
        self.flood_lake();
        self.carve_channel();
        self.fill_channel();
        self.dig_pool();
        self.build_tower(TOWER_BASE.0, TOWER_BASE.1, TOWER_HEIGHT);
        info!(
            "waterfall landscape complete: {} active voxels",
            self.volume.active_count()
        );
    }

    /// Stone pyramid centered on the chunk, sloping one block per step away
    /// from the peak.
    pub fn raise_mountain(&mut self) {
        let center = CHUNK_SIZE / 2;
        let mut placed = 0;

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let height = mountain_height(x, z, center);
                for y in 0..height {
                    self.volume.place(x, y, z, Material::Stone);
                    placed += 1;
                }
            }
        }

        info!("raised mountain with {placed} stone voxels");
    }

    /// Water lake at the mountain summit.
    pub fn flood_lake(&mut self) {
        self.volume
            .fill_region(LAKE_X, LAKE_Y, LAKE_Z, Material::Water);
        info!(
            "flooded summit lake with {} water voxels",
            LAKE_X.len() * LAKE_Y.len() * LAKE_Z.len()
        );
    }

    /// Removes the mountain wall where the water will fall. Leaves the
    /// channel completely empty; `fill_channel` pours the water in.
    pub fn carve_channel(&mut self) {
        self.volume
            .clear_region(CHANNEL_X, CHANNEL_CARVE_Y, CHANNEL_Z);
        info!(
            "carved channel (x {CHANNEL_X:?}, z {CHANNEL_Z:?}, y {CHANNEL_CARVE_Y:?})"
        );
    }

    /// Column of water filling the carved channel, simulating the
    /// continuous fall.
    pub fn fill_channel(&mut self) {
        self.volume
            .fill_region(CHANNEL_X, CHANNEL_FILL_Y, CHANNEL_Z, Material::Water);
        info!(
            "filled channel with {} falling-water voxels",
            CHANNEL_X.len() * CHANNEL_FILL_Y.len() * CHANNEL_Z.len()
        );
    }

    /// Shallow pool at the base catching the fall.
    pub fn dig_pool(&mut self) {
        self.volume
            .fill_region(POOL_X, POOL_Y, POOL_Z, Material::Water);
        info!(
            "dug catch pool with {} water voxels",
            POOL_X.len() * POOL_Y.len() * POOL_Z.len()
        );
    }

    /// 3x3 stone column, clipped to the volume. Tall enough to cast a shadow
    /// across the waterfall in the afternoon light.
    pub fn build_tower(&mut self, base_x: usize, base_z: usize, height: usize) {
        for x in base_x.saturating_sub(1)..=base_x + 1 {
            for z in base_z.saturating_sub(1)..=base_z + 1 {
                for y in 0..height {
                    if x < CHUNK_SIZE && z < CHUNK_SIZE && y < CHUNK_SIZE {
                        self.volume.place(x, y, z, Material::Stone);
                    }
                }
            }
        }
        info!("built tower at ({base_x}, {base_z}), height {height}");
    }
}

fn mountain_height(x: usize, z: usize, center: usize) -> usize {
    let dist_x = x.abs_diff(center);
    let dist_z = z.abs_diff(center);
    let slope = dist_x.max(dist_z) + 2;
    CHUNK_SIZE.saturating_sub(slope).max(MOUNTAIN_FLOOR)
}

/// Builds the complete waterfall chunk. The height cache mirrors the
/// pyramid profile; rendering always goes through the blocky encoder.
pub fn generate_waterfall_chunk() -> Chunk {
    let mut volume = VoxelVolume::new();
    WaterfallBuilder::new(&mut volume).build();

    let center = CHUNK_SIZE / 2;
    let mut heights = HeightMap::filled(CHUNK_SIZE, CHUNK_SIZE, 0.0);
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            heights.set(x, z, mountain_height(x, z, center) as f32);
        }
    }

    Chunk {
        volume,
        heights,
        mode: TerrainMode::Blocky,
    }
}
