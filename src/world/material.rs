use serde::{Deserialize, Serialize};

use crate::world::volume::CHUNK_SIZE;

/// Surface type of a voxel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    #[default]
    Default,
    Grass,
    Dirt,
    Water,
    Stone,
    Wood,
    Sand,
    Ice,
    Snow,
    WaterParticle,
}

impl Material {
    pub const COUNT: usize = 10;

    pub const ALL: [Material; Material::COUNT] = [
        Material::Default,
        Material::Grass,
        Material::Dirt,
        Material::Water,
        Material::Stone,
        Material::Wood,
        Material::Sand,
        Material::Ice,
        Material::Snow,
        Material::WaterParticle,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Classifies a voxel by its own height inside the chunk.
///
/// Bands: the bottom 3/10 of the chunk is sand, up to 5/10 grass, up to
/// 9/10 stone, the rest snow. Integer thresholds, so at a chunk size of 32
/// the boundaries sit at y = 9, 16 and 28.
pub fn material_for_height(height: usize) -> Material {
    if height <= 3 * CHUNK_SIZE / 10 {
        Material::Sand
    } else if height <= 5 * CHUNK_SIZE / 10 {
        Material::Grass
    } else if height <= 9 * CHUNK_SIZE / 10 {
        Material::Stone
    } else {
        Material::Snow
    }
}

/// Lookup from material to shader color-ID and debug RGB color.
///
/// Constructed explicitly and passed by reference wherever rendering data is
/// needed; there is no global registry. The packed vertex format reserves a
/// small palette, so every color-ID must stay below [`MaterialPalette::MAX_COLOR_ID`].
#[derive(Debug, Clone)]
pub struct MaterialPalette {
    ids: [u8; Material::COUNT],
    colors: [[f32; 3]; Material::COUNT],
}

impl MaterialPalette {
    /// Color-IDs are encoded into a palette the fragment shader indexes;
    /// IDs at or above this would alias other entries.
    pub const MAX_COLOR_ID: u8 = 8;

    pub fn new(ids: [u8; Material::COUNT], colors: [[f32; 3]; Material::COUNT]) -> Self {
        for id in ids {
            debug_assert!(id < Self::MAX_COLOR_ID, "color-ID {id} exceeds palette");
        }
        Self { ids, colors }
    }

    /// Shader color-ID for a material, guaranteed `< MAX_COLOR_ID`.
    pub fn color_id(&self, material: Material) -> u8 {
        self.ids[material.index()]
    }

    /// RGB color for non-packed debug rendering.
    pub fn rgb(&self, material: Material) -> [f32; 3] {
        self.colors[material.index()]
    }
}

impl Default for MaterialPalette {
    fn default() -> Self {
        let mut ids = [0u8; Material::COUNT];
        let mut colors = [[0.0f32; 3]; Material::COUNT];

        for material in Material::ALL {
            let (id, rgb) = match material {
                Material::Sand => (0, [0.761, 0.698, 0.502]),
                Material::Default | Material::Grass => (1, [0.04, 0.44, 0.15]),
                Material::Stone => (2, [0.5725, 0.5569, 0.5216]),
                Material::Snow => (3, [1.0, 1.0, 1.0]),
                Material::WaterParticle => (4, [0.68, 0.85, 0.90]),
                Material::Water => (5, [0.25, 0.41, 0.88]),
                Material::Ice => (6, [0.2549, 0.9608, 0.9647]),
                Material::Dirt | Material::Wood => (7, [0.44, 0.30, 0.21]),
            };
            ids[material as usize] = id;
            colors[material as usize] = rgb;
        }

        Self::new(ids, colors)
    }
}
