pub mod rain;
pub mod spray;

pub use rain::Rain;
pub use spray::WaterfallSpray;

use glam::Vec3;

/// One simulated fluid particle. Slots live in a pool and are recycled:
/// spawning overwrites an inactive slot, despawning just clears the flag.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds left before despawn.
    pub lifetime: f32,
    pub active: bool,
    /// Cached owning chunk, for region-scoped systems. Refreshed lazily when
    /// the particle crosses a chunk boundary.
    pub chunk: (i32, i32),
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            lifetime: 0.0,
            active: false,
            chunk: (-1, -1),
        }
    }
}

/// Pool of particle slots with an initial reservation.
///
/// Spawning scans for the first inactive slot and grows the pool by one when
/// every slot is busy, so the reservation is a soft cap: the pool never
/// refuses a spawn and never shrinks.
pub struct ParticlePool {
    slots: Vec<Particle>,
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Claims a slot for a fresh particle and hands it out for
    /// initialization. The slot comes back with `active` already set.
    pub fn spawn(&mut self) -> &mut Particle {
        let slot = match self.slots.iter().position(|p| !p.active) {
            Some(index) => &mut self.slots[index],
            None => {
                self.slots.push(Particle::default());
                self.slots.last_mut().unwrap()
            }
        };
        *slot = Particle {
            active: true,
            ..Particle::default()
        };
        slot
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    /// Number of slots currently held, live or reusable.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.slots.iter_mut()
    }
}
