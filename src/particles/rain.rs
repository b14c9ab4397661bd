use glam::Vec3;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use crate::config::particles::RainConfig;
use crate::config::worldgen::WorldGenConfig;
use crate::particles::ParticlePool;
use crate::render::vertex::PackedVertex;
use crate::world::material::{Material, MaterialPalette};
use crate::world::volume::CHUNK_SIZE;

/// Interval between particle census log lines, seconds.
const CENSUS_INTERVAL: f32 = 2.0;

/// World-wide rainfall.
///
/// Drops spawn high above the whole chunk grid and fall until they reach
/// ground level, expire, or drift out of the world. The world occupies
/// x in [0, size*units] and z in [-size*units, 0]; each drop caches its
/// owning chunk so the per-chunk render query never recomputes membership
/// from raw position.
pub struct Rain {
    pool: ParticlePool,
    config: RainConfig,
    world_size: usize,
    units_per_chunk: f32,
    spawn_timer: f32,
    census_timer: f32,
    rng: ChaCha12Rng,
}

impl Rain {
    pub fn new(world: &WorldGenConfig, config: RainConfig, seed: u64) -> Self {
        info!(
            "rain system initialized: {} slot pool over a {}x{} chunk world",
            config.initial_pool, world.world_size, world.world_size
        );
        Self {
            pool: ParticlePool::with_capacity(config.initial_pool),
            config,
            world_size: world.world_size,
            units_per_chunk: world.chunk_world_units,
            spawn_timer: 0.0,
            census_timer: 0.0,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    fn world_extent(&self) -> f32 {
        self.world_size as f32 * self.units_per_chunk
    }

    fn chunk_of(&self, position: Vec3) -> (i32, i32) {
        (
            (position.x / self.units_per_chunk) as i32,
            (-position.z / self.units_per_chunk) as i32,
        )
    }

    /// Advances every drop one frame, then spawns the drops now due.
    pub fn update(&mut self, dt: f32) {
        let extent = self.world_extent();
        let cfg = &self.config;

        for drop in self.pool.iter_mut() {
            if !drop.active {
                continue;
            }

            drop.velocity.y -= cfg.gravity * dt;
            drop.position += drop.velocity * dt;

            // Only re-derive the owning chunk when the drop left it.
            let chunk = (
                (drop.position.x / self.units_per_chunk) as i32,
                (-drop.position.z / self.units_per_chunk) as i32,
            );
            if chunk != drop.chunk {
                drop.chunk = chunk;
            }

            drop.lifetime -= dt;
            if drop.position.y <= cfg.ground_level || drop.lifetime <= 0.0 {
                drop.active = false;
            }

            if drop.position.x < 0.0
                || drop.position.x > extent
                || drop.position.z > 0.0
                || drop.position.z < -extent
            {
                drop.active = false;
            }
        }

        self.spawn(dt);

        self.census_timer += dt;
        if self.census_timer > CENSUS_INTERVAL {
            debug!(
                "rain drops active: {} / {}",
                self.pool.active_count(),
                self.pool.size()
            );
            self.census_timer = 0.0;
        }
    }

    fn spawn(&mut self, dt: f32) {
        self.spawn_timer += dt;
        let interval = 1.0 / self.config.spawn_rate;
        let extent = self.world_extent();

        while self.spawn_timer >= interval {
            self.spawn_timer -= interval;

            let position = Vec3::new(
                self.rng.gen_range(0.0..extent),
                self.config.spawn_height,
                self.rng.gen_range(-extent..0.0),
            );
            let velocity = Vec3::new(
                self.rng.gen_range(-2.0..2.0f32) * 0.5,
                -self.config.fall_speed + self.rng.gen_range(-2.0..2.0),
                self.rng.gen_range(-2.0..2.0f32) * 0.5,
            );

            let lifetime = self.config.max_lifetime;
            let chunk = self.chunk_of(position);
            let drop = self.pool.spawn();
            drop.position = position;
            drop.velocity = velocity;
            drop.lifetime = lifetime;
            drop.chunk = chunk;
        }
    }

    /// Packed vertices for the drops inside one chunk: a small upward-facing
    /// quad per drop, in chunk-local voxel coordinates. Membership comes
    /// from the cached chunk id, not from raw positions.
    pub fn render_for_chunk(
        &self,
        palette: &MaterialPalette,
        chunk_x: i32,
        chunk_z: i32,
    ) -> Vec<PackedVertex> {
        let mut vertices = Vec::new();
        let color_id = palette.color_id(Material::WaterParticle);
        let scale = CHUNK_SIZE as f32 / self.units_per_chunk;

        for drop in self.pool.iter() {
            if !drop.active || drop.chunk != (chunk_x, chunk_z) {
                continue;
            }

            let local_x = (drop.position.x - chunk_x as f32 * self.units_per_chunk) * scale;
            let local_y = drop.position.y * scale;
            let local_z = (-drop.position.z - chunk_z as f32 * self.units_per_chunk) * scale;

            // The quad extends one unit up and across; stay a cell short of
            // the chunk roofline so it still fits the coordinate fields.
            let max = (CHUNK_SIZE - 1) as f32;
            if local_x < 0.0
                || local_x >= max
                || local_y < 0.0
                || local_y >= max
                || local_z < 0.0
                || local_z >= max
            {
                continue;
            }

            let (x, y, z) = (local_x as u32, local_y as u32, local_z as u32);
            let up = [0, 1, 0];

            let quad = [
                (x, y, z),
                (x + 1, y, z),
                (x, y + 1, z),
                (x + 1, y, z),
                (x + 1, y + 1, z),
                (x, y + 1, z),
            ];
            for (qx, qy, qz) in quad {
                vertices.push(PackedVertex::pack(qx, qy, qz, up, color_id));
            }
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

    fn world() -> WorldGenConfig {
        WorldGenConfig::default()
    }

    fn quiet_rain() -> Rain {
        let config = RainConfig {
            spawn_rate: f32::MIN_POSITIVE,
            ..RainConfig::default()
        };
        Rain::new(&world(), config, 3)
    }

    #[test]
    fn test_spawn_pacing_matches_rate() {
        let mut rain = Rain::new(&world(), RainConfig::default(), 3);
        rain.update(0.1);
        // 500 drops/s for a tenth of a second, give or take accumulator
        // rounding.
        let spawned = rain.active_count();
        assert!((49..=51).contains(&spawned), "spawned {spawned}");
    }

    #[test]
    fn test_drops_despawn_at_ground_level() {
        let mut rain = quiet_rain();
        {
            let drop = rain.pool.spawn();
            drop.position = Vec3::new(100.0, 6.0, -100.0);
            drop.velocity = Vec3::new(0.0, -30.0, 0.0);
            drop.lifetime = 10.0;
        }

        rain.update(0.1);
        assert_eq!(rain.active_count(), 0);
    }

    #[test]
    fn test_drops_despawn_outside_world() {
        let mut rain = quiet_rain();
        {
            let drop = rain.pool.spawn();
            drop.position = Vec3::new(1.0, 50.0, -100.0);
            drop.velocity = Vec3::new(-60.0, 0.0, 0.0);
            drop.lifetime = 10.0;
        }

        rain.update(0.1);
        assert_eq!(rain.active_count(), 0);
    }

    #[test]
    fn test_cached_chunk_follows_crossing() {
        let mut rain = quiet_rain();
        {
            let drop = rain.pool.spawn();
            // Just inside chunk (0, 4), moving in +x at one chunk per second.
            drop.position = Vec3::new(19.5, 50.0, -90.0);
            drop.velocity = Vec3::new(20.0, 0.0, 0.0);
            drop.lifetime = 10.0;
            drop.chunk = (0, 4);
        }

        rain.update(0.1);
        let drop = rain.pool.iter().find(|d| d.active).unwrap();
        assert_eq!(drop.chunk, (1, 4));
    }

    #[test]
    fn test_render_query_is_region_scoped() {
        let palette = MaterialPalette::default();
        let mut rain = quiet_rain();

        {
            let drop = rain.pool.spawn();
            drop.position = Vec3::new(30.0, 10.0, -30.0);
            drop.lifetime = 10.0;
            drop.chunk = (1, 1);
        }
        {
            let drop = rain.pool.spawn();
            drop.position = Vec3::new(90.0, 10.0, -90.0);
            drop.lifetime = 10.0;
            drop.chunk = (4, 4);
        }

        let here = rain.render_for_chunk(&palette, 1, 1);
        assert_eq!(here.len(), 6);
        assert_eq!(
            here[0].color_id(),
            palette.color_id(Material::WaterParticle)
        );

        let elsewhere = rain.render_for_chunk(&palette, 2, 2);
        assert!(elsewhere.is_empty());
    }

    #[test]
    fn test_render_uses_chunk_local_coordinates() {
        let palette = MaterialPalette::default();
        let mut rain = quiet_rain();

        {
            let drop = rain.pool.spawn();
            // Center of chunk (1, 1) at half the chunk's world height.
            drop.position = Vec3::new(30.0, 10.0, -30.0);
            drop.lifetime = 10.0;
            drop.chunk = (1, 1);
        }

        let vertices = rain.render_for_chunk(&palette, 1, 1);
        let [x, y, z] = vertices[0].position();
        assert_eq!([x, y, z], [16, 16, 16]);
    }
}
