use glam::Vec3;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::config::particles::SprayConfig;
use crate::particles::ParticlePool;
use crate::render::mesh::MeshEncoder;
use crate::render::vertex::PackedVertex;
use crate::world::material::Material;
use crate::world::volume::CHUNK_SIZE;

/// Spray shoots off the lake rim, one chunk-local unit above the water.
const RIM_Y: f32 = 24.0;
/// Emission positions slide along the inner lake edge.
const RIM_MIN: f32 = 11.0;
const RIM_MAX: f32 = 21.0;
/// The near and far lake walls sit half a block outside the rim.
const EDGE_NEAR: f32 = 10.5;
const EDGE_FAR: f32 = 21.5;

/// Horizontal damping applied once a bounce drops below the settle
/// threshold, so grounded particles coast to a stop.
const SETTLE_DAMPING: f32 = 0.3;

/// Interval between particle census log lines, seconds.
const CENSUS_INTERVAL: f32 = 2.0;

/// Waterfall spray: particles spilling over all four edges of the summit
/// lake, falling under gravity and splashing into the catch pool.
///
/// Chunk-local simulation; positions are in voxel units of the waterfall
/// chunk and rendering skips anything outside it.
pub struct WaterfallSpray {
    pool: ParticlePool,
    config: SprayConfig,
    spawn_timer: f32,
    census_timer: f32,
    rng: ChaCha12Rng,
}

impl WaterfallSpray {
    pub fn new(config: SprayConfig, seed: u64) -> Self {
        Self {
            pool: ParticlePool::with_capacity(config.initial_pool),
            config,
            spawn_timer: 0.0,
            census_timer: 0.0,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Advances the simulation one frame: physics for every live particle,
    /// then newly due spawns. Must run before the frame's render query.
    pub fn update(&mut self, dt: f32) {
        let cfg = &self.config;

        for particle in self.pool.iter_mut() {
            if !particle.active {
                continue;
            }

            particle.velocity.y -= cfg.gravity * dt;
            particle.position += particle.velocity * dt;

            if particle.position.y <= cfg.pool_plane {
                particle.position.y = cfg.pool_plane;
                particle.velocity.y = -particle.velocity.y * cfg.bounce;
                particle.velocity.x *= cfg.friction;
                particle.velocity.z *= cfg.friction;

                if particle.velocity.y.abs() < cfg.settle_threshold {
                    particle.velocity.y = 0.0;
                    particle.velocity.x *= SETTLE_DAMPING;
                    particle.velocity.z *= SETTLE_DAMPING;
                }
            }

            particle.lifetime -= dt;
            if particle.lifetime <= 0.0 {
                particle.active = false;
            }

            if particle.position.y < cfg.floor_y || particle.position.y > cfg.ceiling_y {
                particle.active = false;
            }
        }

        self.spawn(dt);

        self.census_timer += dt;
        if self.census_timer > CENSUS_INTERVAL {
            debug!(
                "spray particles active: {} / {}",
                self.pool.active_count(),
                self.pool.size()
            );
            self.census_timer = 0.0;
        }
    }

    /// Fixed-rate spawn accumulator; each due particle launches from one of
    /// the four cardinal lake edges.
    fn spawn(&mut self, dt: f32) {
        self.spawn_timer += dt;
        let interval = 1.0 / self.config.spawn_rate;

        while self.spawn_timer >= interval {
            self.spawn_timer -= interval;

            let side = self.rng.gen_range(0..4);
            let along = self.rng.gen_range(RIM_MIN..RIM_MAX);
            let jitter = self.rng.gen_range(-0.8..0.8f32);
            let drift = self.rng.gen_range(-0.8..0.8f32) * 0.5;

            let (position, velocity) = match side {
                // North: over the far z edge.
                0 => (
                    Vec3::new(along, RIM_Y, EDGE_FAR),
                    Vec3::new(drift, -0.5, 3.0 + jitter),
                ),
                // South: over the near z edge.
                1 => (
                    Vec3::new(along, RIM_Y, EDGE_NEAR),
                    Vec3::new(drift, -0.5, -3.0 + jitter),
                ),
                // East: over the far x edge.
                2 => (
                    Vec3::new(EDGE_FAR, RIM_Y, along),
                    Vec3::new(3.0 + jitter, -0.5, drift),
                ),
                // West: over the channel side, into the falling water.
                _ => (
                    Vec3::new(EDGE_NEAR, RIM_Y, along),
                    Vec3::new(-3.0 + jitter, -0.5, drift),
                ),
            };

            let lifetime = self.config.lifetime;
            let particle = self.pool.spawn();
            particle.position = position;
            particle.velocity = velocity;
            particle.lifetime = lifetime;
        }
    }

    /// Packed cubes for every live particle inside the chunk. Out-of-chunk
    /// particles are skipped, not despawned; they may drift back.
    pub fn render(&self, encoder: &MeshEncoder) -> Vec<PackedVertex> {
        let mut vertices = Vec::new();
        let side = CHUNK_SIZE as f32;

        for particle in self.pool.iter() {
            if !particle.active {
                continue;
            }

            let p = particle.position;
            if p.x < 0.0 || p.x >= side || p.y < 0.0 || p.y >= side || p.z < 0.0 || p.z >= side {
                continue;
            }

            encoder.push_cube(
                &mut vertices,
                Material::WaterParticle,
                p.x as u32,
                p.y as u32,
                p.z as u32,
            );
        }

        vertices
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn pool_size(&self) -> usize {
        self.pool.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::material::MaterialPalette;

    fn spray() -> WaterfallSpray {
        WaterfallSpray::new(SprayConfig::default(), 9)
    }

    #[test]
    fn test_spawn_rate_accumulator() {
        let mut spray = spray();
        // One second at 60/s; no particle lives long enough to expire.
        spray.update(1.0 / 60.0);
        assert_eq!(spray.active_count(), 1);

        for _ in 0..59 {
            spray.update(1.0 / 60.0);
        }
        assert_eq!(spray.active_count(), 60);
    }

    #[test]
    fn test_particles_expire_but_slots_remain() {
        let mut spray = spray();
        for _ in 0..30 {
            spray.update(0.1);
        }
        let peak = spray.pool_size();
        assert!(peak > 0);

        // Stop spawning and let every lifetime run out.
        spray.config.spawn_rate = f32::MIN_POSITIVE;
        for _ in 0..50 {
            spray.update(0.1);
        }
        assert_eq!(spray.active_count(), 0);
        assert!(spray.pool_size() >= peak);
    }

    #[test]
    fn test_dropped_particle_settles_on_pool_plane() {
        let mut spray = spray();
        spray.config.spawn_rate = f32::MIN_POSITIVE;

        {
            let particle = spray.pool.spawn();
            particle.position = Vec3::new(10.0, 10.0, 16.0);
            particle.velocity = Vec3::ZERO;
            particle.lifetime = f32::MAX;
        }

        for _ in 0..600 {
            spray.update(1.0 / 60.0);
        }

        let particle = spray.pool.iter().find(|p| p.active).unwrap();
        assert_eq!(particle.position.y, spray.config.pool_plane);
        assert!(particle.velocity.length() < spray.config.settle_threshold);

        // Settled means settled: another second of simulation moves nothing.
        let before = particle.position;
        for _ in 0..60 {
            spray.update(1.0 / 60.0);
        }
        let particle = spray.pool.iter().find(|p| p.active).unwrap();
        assert!((particle.position - before).length() < 0.2);
    }

    #[test]
    fn test_render_skips_out_of_chunk_particles() {
        let palette = MaterialPalette::default();
        let encoder = MeshEncoder::new(&palette);
        let mut spray = spray();

        {
            let inside = spray.pool.spawn();
            inside.position = Vec3::new(12.0, 8.0, 16.0);
            inside.lifetime = 1.0;
        }
        {
            let outside = spray.pool.spawn();
            outside.position = Vec3::new(-3.0, 8.0, 16.0);
            outside.lifetime = 1.0;
        }

        let vertices = spray.render(&encoder);
        assert_eq!(vertices.len(), 36);
        assert_eq!(
            vertices[0].color_id(),
            palette.color_id(Material::WaterParticle)
        );
    }
}
