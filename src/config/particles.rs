use serde::{Deserialize, Serialize};

/// Waterfall spray tuning. Distances are chunk-local voxel units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SprayConfig {
    /// Particles per second.
    pub spawn_rate: f32,
    /// Seconds a particle lives after spawning.
    pub lifetime: f32,
    pub gravity: f32,
    /// Y of the catch-pool surface particles splash against.
    pub pool_plane: f32,
    /// Vertical energy kept per bounce.
    pub bounce: f32,
    /// Horizontal velocity kept per bounce.
    pub friction: f32,
    /// Bounces slower than this stop dead instead of bouncing again.
    pub settle_threshold: f32,
    /// Particles leaving this vertical band despawn.
    pub floor_y: f32,
    pub ceiling_y: f32,
    /// Slots reserved up front; the pool grows past this under load.
    pub initial_pool: usize,
}

impl Default for SprayConfig {
    fn default() -> Self {
        Self {
            spawn_rate: 60.0,
            lifetime: 4.0,
            gravity: 9.8,
            pool_plane: 3.5,
            bounce: 0.6,
            friction: 0.8,
            settle_threshold: 0.3,
            floor_y: -5.0,
            ceiling_y: 50.0,
            initial_pool: 2000,
        }
    }
}

/// Rain tuning. Distances are world units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Y where drops appear.
    pub spawn_height: f32,
    /// Drops per second across the whole world.
    pub spawn_rate: f32,
    /// Base downward speed at spawn, before jitter.
    pub fall_speed: f32,
    /// Drops at or below this Y despawn.
    pub ground_level: f32,
    pub max_lifetime: f32,
    pub gravity: f32,
    pub initial_pool: usize,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            spawn_height: 80.0,
            spawn_rate: 500.0,
            fall_speed: 30.0,
            ground_level: 5.0,
            max_lifetime: 10.0,
            gravity: 9.8,
            initial_pool: 5000,
        }
    }
}
