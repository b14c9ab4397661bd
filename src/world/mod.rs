pub mod material;
pub mod volume;

pub use material::{Material, MaterialPalette};
pub use volume::{Voxel, VoxelVolume, CHUNK_SIZE};
