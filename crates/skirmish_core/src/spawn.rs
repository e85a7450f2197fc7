//! Spawn-point allocation.
//!
//! The spawn pool is a fixed, read-only sequence of transforms loaded
//! from config. Selection is uniform-random with replacement: nothing
//! prevents two players spawning on the same point at the same time.

use crate::components::Transform;

/// Simple deterministic RNG for spawn selection.
///
/// Seeded so test runs and headless matches are reproducible.
#[derive(Debug, Clone)]
pub struct SpawnRng {
    state: u64,
}

impl SpawnRng {
    /// Create an RNG from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15),
        }
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(0x5_DEEC_E66D).wrapping_add(11);
        self.state
    }

    /// Next value in `[0, bound)`. Returns 0 for a zero bound.
    pub fn next_bounded(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.next_u64() % bound
    }
}

/// Fixed pool of spawn transforms.
#[derive(Debug, Clone)]
pub struct SpawnPool {
    points: Vec<Transform>,
}

impl SpawnPool {
    /// Create a pool from configured spawn points.
    #[must_use]
    pub fn new(points: Vec<Transform>) -> Self {
        if points.is_empty() {
            tracing::warn!("spawn pool is empty, spawns degrade to the origin");
        }
        Self { points }
    }

    /// Number of points in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the pool has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Choose a spawn transform, uniform-random with replacement.
    ///
    /// An empty pool yields the identity transform (missing-collaborator
    /// policy: degrade, never fail).
    #[must_use]
    pub fn choose(&self, rng: &mut SpawnRng) -> Transform {
        if self.points.is_empty() {
            return Transform::IDENTITY;
        }
        let index = rng.next_bounded(self.points.len() as u64) as usize;
        self.points[index]
    }
}
