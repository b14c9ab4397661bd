pub mod config;
pub mod particles;
pub mod render;
pub mod terrain;
pub mod utils;
pub mod world;

// Re-export commonly used types
pub use config::particles::{RainConfig, SprayConfig};
pub use config::worldgen::WorldGenConfig;
pub use config::VoxfallConfig;
pub use particles::rain::Rain;
pub use particles::spray::WaterfallSpray;
pub use render::mesh::{CubeTemplate, MeshEncoder};
pub use render::vertex::{vertex_bytes, PackedVertex};
pub use terrain::generator::{Chunk, TerrainGenerator, TerrainMode};
pub use terrain::heightmap::{HeightMap, NoiseMap};
pub use terrain::noise_field::{HeightSource, NoiseField};
pub use terrain::waterfall::{generate_waterfall_chunk, WaterfallBuilder};
pub use utils::error::VoxfallError;
pub use world::material::{Material, MaterialPalette};
pub use world::volume::{Voxel, VoxelVolume, CHUNK_SIZE};
