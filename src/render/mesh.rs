use glam::Vec3;

use crate::render::vertex::PackedVertex;
use crate::terrain::generator::{Chunk, TerrainMode};
use crate::terrain::heightmap::HeightMap;
use crate::world::material::{material_for_height, Material, MaterialPalette};
use crate::world::volume::{VoxelVolume, CHUNK_SIZE};

/// One corner of the unit-cube template: integer offset from the voxel
/// origin plus the face normal.
#[derive(Debug, Clone, Copy)]
pub struct CubeVertex {
    pub offset: [u32; 3],
    pub normal: [i32; 3],
}

const fn v(x: u32, y: u32, z: u32, nx: i32, ny: i32, nz: i32) -> CubeVertex {
    CubeVertex {
        offset: [x, y, z],
        normal: [nx, ny, nz],
    }
}

/// The 36-vertex unit cube (6 faces x 2 triangles) every blocky voxel and
/// particle cube is stamped from. Immutable configuration data handed to the
/// encoder, not process state.
#[derive(Debug, Clone)]
pub struct CubeTemplate {
    pub vertices: [CubeVertex; 36],
}

impl CubeTemplate {
    pub const UNIT: CubeTemplate = CubeTemplate {
        vertices: [
            // -Z face
            v(0, 0, 0, 0, 0, -1),
            v(1, 0, 0, 0, 0, -1),
            v(1, 1, 0, 0, 0, -1),
            v(1, 1, 0, 0, 0, -1),
            v(0, 1, 0, 0, 0, -1),
            v(0, 0, 0, 0, 0, -1),
            // +Z face
            v(0, 0, 1, 0, 0, 1),
            v(1, 0, 1, 0, 0, 1),
            v(1, 1, 1, 0, 0, 1),
            v(1, 1, 1, 0, 0, 1),
            v(0, 1, 1, 0, 0, 1),
            v(0, 0, 1, 0, 0, 1),
            // -X face
            v(0, 1, 1, -1, 0, 0),
            v(0, 1, 0, -1, 0, 0),
            v(0, 0, 0, -1, 0, 0),
            v(0, 0, 0, -1, 0, 0),
            v(0, 0, 1, -1, 0, 0),
            v(0, 1, 1, -1, 0, 0),
            // +X face
            v(1, 1, 1, 1, 0, 0),
            v(1, 1, 0, 1, 0, 0),
            v(1, 0, 0, 1, 0, 0),
            v(1, 0, 0, 1, 0, 0),
            v(1, 0, 1, 1, 0, 0),
            v(1, 1, 1, 1, 0, 0),
            // -Y face
            v(0, 0, 0, 0, -1, 0),
            v(1, 0, 0, 0, -1, 0),
            v(1, 0, 1, 0, -1, 0),
            v(1, 0, 1, 0, -1, 0),
            v(0, 0, 1, 0, -1, 0),
            v(0, 0, 0, 0, -1, 0),
            // +Y face
            v(0, 1, 0, 0, 1, 0),
            v(1, 1, 0, 0, 1, 0),
            v(1, 1, 1, 0, 1, 0),
            v(1, 1, 1, 0, 1, 0),
            v(0, 1, 1, 0, 1, 0),
            v(0, 1, 0, 0, 1, 0),
        ],
    };
}

impl Default for CubeTemplate {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Converts generated terrain into packed vertex sequences.
///
/// Blocky chunks are encoded voxel by voxel from the cube template with
/// hidden-voxel culling; smooth chunks are encoded quad by quad from the
/// height cache. The palette is injected so rendering data stays decoupled
/// from terrain logic.
pub struct MeshEncoder<'a> {
    palette: &'a MaterialPalette,
    cube: CubeTemplate,
}

impl<'a> MeshEncoder<'a> {
    pub fn new(palette: &'a MaterialPalette) -> Self {
        Self {
            palette,
            cube: CubeTemplate::UNIT,
        }
    }

    pub fn with_template(palette: &'a MaterialPalette, cube: CubeTemplate) -> Self {
        Self { palette, cube }
    }

    /// Encodes a chunk in whichever mode it was generated.
    pub fn encode_chunk(&self, chunk: &Chunk) -> Vec<PackedVertex> {
        match chunk.mode {
            TerrainMode::Blocky => self.encode_volume(&chunk.volume),
            TerrainMode::Smooth => self.encode_heightmap(&chunk.heights),
        }
    }

    /// Emits a cube for every active voxel whose faces can still be seen.
    /// Raster scan order over (x, z, y); winding comes from the template.
    pub fn encode_volume(&self, volume: &VoxelVolume) -> Vec<PackedVertex> {
        let mut vertices = Vec::new();

        for x in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                for y in 0..CHUNK_SIZE {
                    if !volume.is_active(x, y, z) || volume.is_occluded(x, y, z) {
                        continue;
                    }
                    self.push_cube(
                        &mut vertices,
                        volume.material(x, y, z),
                        x as u32,
                        y as u32,
                        z as u32,
                    );
                }
            }
        }

        vertices
    }

    /// Stamps the cube template at a voxel position. Also used to render
    /// fluid particles as small cubes.
    pub fn push_cube(
        &self,
        out: &mut Vec<PackedVertex>,
        material: Material,
        x: u32,
        y: u32,
        z: u32,
    ) {
        let color_id = self.palette.color_id(material);

        for corner in &self.cube.vertices {
            out.push(PackedVertex::pack(
                x + corner.offset[0],
                y + corner.offset[1],
                z + corner.offset[2],
                corner.normal,
                color_id,
            ));
        }
    }

    /// Encodes the height cache as a triangulated surface: two triangles per
    /// quad, one flat normal per quad from the cross product of its edge
    /// vectors, color from the quad's mean height.
    pub fn encode_heightmap(&self, heights: &HeightMap) -> Vec<PackedVertex> {
        let mut vertices = Vec::new();

        for x in 0..heights.width() - 1 {
            for z in 0..heights.depth() - 1 {
                let h00 = heights.get(x, z);
                let h10 = heights.get(x + 1, z);
                let h01 = heights.get(x, z + 1);
                let h11 = heights.get(x + 1, z + 1);

                let normal = quad_normal(h00, h10, h01);

                let mean = (h00 + h10 + h01 + h11) / 4.0;
                let color_id = self.palette.color_id(material_for_height(mean as usize));

                let (x0, z0) = (x as u32, z as u32);
                let corners = [
                    (x0, h00, z0),
                    (x0 + 1, h10, z0),
                    (x0 + 1, h11, z0 + 1),
                    (x0 + 1, h11, z0 + 1),
                    (x0, h01, z0 + 1),
                    (x0, h00, z0),
                ];

                for (cx, height, cz) in corners {
                    vertices.push(PackedVertex::pack(cx, height as u32, cz, normal, color_id));
                }
            }
        }

        vertices
    }
}

/// Flat per-quad normal from the two edge vectors, quantized to the
/// -1/0/+1 codes the vertex format can hold.
fn quad_normal(h00: f32, h10: f32, h01: f32) -> [i32; 3] {
    let edge_x = Vec3::new(1.0, h10 - h00, 0.0);
    let edge_z = Vec3::new(0.0, h01 - h00, 1.0);
    let normal = edge_z.cross(edge_x).normalize();

    [
        normal.x.round() as i32,
        normal.y.round() as i32,
        normal.z.round() as i32,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_voxel_emits_full_cube() {
        let palette = MaterialPalette::default();
        let encoder = MeshEncoder::new(&palette);

        let mut volume = VoxelVolume::new();
        volume.place(4, 5, 6, Material::Grass);

        let vertices = encoder.encode_volume(&volume);
        assert_eq!(vertices.len(), 36);
        for vertex in &vertices {
            let [x, y, z] = vertex.position();
            assert!((4..=5).contains(&x));
            assert!((5..=6).contains(&y));
            assert!((6..=7).contains(&z));
            assert_eq!(vertex.color_id(), palette.color_id(Material::Grass));
        }
    }

    #[test]
    fn test_buried_voxel_is_culled() {
        let palette = MaterialPalette::default();
        let encoder = MeshEncoder::new(&palette);

        let mut volume = VoxelVolume::new();
        volume.fill_region(4..7, 4..7, 4..7, Material::Stone);

        // 27 voxels, only the center one fully surrounded.
        let vertices = encoder.encode_volume(&volume);
        assert_eq!(vertices.len(), 26 * 36);
    }

    #[test]
    fn test_flat_heightmap_quads() {
        let palette = MaterialPalette::default();
        let encoder = MeshEncoder::new(&palette);

        let heights = HeightMap::filled(CHUNK_SIZE + 1, CHUNK_SIZE + 1, 5.0);
        let vertices = encoder.encode_heightmap(&heights);

        assert_eq!(vertices.len(), CHUNK_SIZE * CHUNK_SIZE * 6);
        for vertex in &vertices {
            assert_eq!(vertex.position()[1], 5);
            assert_eq!(vertex.normal(), [0, 1, 0]);
            assert_eq!(vertex.color_id(), palette.color_id(Material::Sand));
        }
    }

    #[test]
    fn test_steep_quad_normal_tilts() {
        let palette = MaterialPalette::default();
        let encoder = MeshEncoder::new(&palette);

        // Height rises one unit per x step; the quad normal leans back in x.
        let mut heights = HeightMap::filled(3, 3, 1.0);
        for x in 0..3 {
            for z in 0..3 {
                heights.set(x, z, 1.0 + x as f32);
            }
        }

        let vertices = encoder.encode_heightmap(&heights);
        assert_eq!(vertices[0].normal(), [-1, 1, 0]);
    }

    #[test]
    fn test_encode_chunk_dispatches_on_mode() {
        let palette = MaterialPalette::default();
        let encoder = MeshEncoder::new(&palette);

        let blocky = crate::terrain::waterfall::generate_waterfall_chunk();
        let cubes = encoder.encode_chunk(&blocky);
        assert!(!cubes.is_empty());
        assert_eq!(cubes.len() % 36, 0);

        let smooth = Chunk {
            volume: VoxelVolume::new(),
            heights: HeightMap::filled(3, 3, 2.0),
            mode: TerrainMode::Smooth,
        };
        assert_eq!(encoder.encode_chunk(&smooth).len(), 2 * 2 * 6);
    }

    #[test]
    fn test_quad_color_follows_mean_height() {
        let palette = MaterialPalette::default();
        let encoder = MeshEncoder::new(&palette);

        let heights = HeightMap::filled(2, 2, 20.0);
        let vertices = encoder.encode_heightmap(&heights);
        assert_eq!(vertices[0].color_id(), palette.color_id(Material::Stone));
    }
}
