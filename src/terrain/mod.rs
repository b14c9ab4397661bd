pub mod generator;
pub mod heightmap;
pub mod noise_field;
pub mod waterfall;

pub use generator::{Chunk, TerrainGenerator, TerrainMode};
pub use heightmap::{HeightMap, NoiseMap};
pub use noise_field::{HeightSource, NoiseField};
pub use waterfall::WaterfallBuilder;
