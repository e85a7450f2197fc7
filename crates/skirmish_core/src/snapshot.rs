//! Snapshot replication for player entities.
//!
//! Each tick the owner serializes an ordered field tuple for its player
//! and publishes it on the unreliable channel; replicas overwrite their
//! copy verbatim. Last write wins, no interpolation, no delta encoding.
//! A lost tick is superseded by the next one.
//!
//! The field order of [`PlayerSnapshot`] is the wire contract:
//! `{health, score, skin_index, position, velocity, rotation}`. Both
//! sides rely on the struct's declaration order under bincode; reorder
//! the fields and peers stop agreeing.
//!
//! Health and score ride along purely as a catch-up read model: owners
//! mutate them through the reliable event channel and never apply
//! incoming snapshots to their own entities, so the event/snapshot race
//! on those fields resolves in the owner's favor by construction.
//!
//! Projectiles do not snapshot. They replicate through their spawn
//! parameters and advance deterministically on every peer.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::Entity;

/// Ordered wire tuple for one player entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Current health.
    pub health: f32,
    /// Current score.
    pub score: u32,
    /// Assigned skin index, if the master has assigned one.
    pub skin_index: Option<u8>,
    /// World position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// World orientation.
    pub rotation: Quat,
}

impl PlayerSnapshot {
    /// Capture a snapshot of `entity`, or `None` if it is not a player.
    ///
    /// Called by the owner once per tick for each owned player.
    #[must_use]
    pub fn capture(entity: &Entity) -> Option<Self> {
        let player = entity.player.as_ref()?;
        Some(Self {
            health: player.health,
            score: player.score,
            skin_index: player.skin_index,
            position: entity.transform.position,
            velocity: entity.velocity,
            rotation: entity.transform.rotation,
        })
    }

    /// Encode into the wire representation.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from the wire representation.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(payload)?)
    }

    /// Overwrite a replica with this snapshot, verbatim.
    ///
    /// Must only be called on non-owned replicas; the caller gates on
    /// ownership. Non-player entities are left untouched.
    pub fn apply(&self, entity: &mut Entity) {
        let Some(player) = entity.player.as_mut() else {
            return;
        };
        player.health = self.health;
        player.score = self.score;
        player.skin_index = self.skin_index;
        entity.transform.position = self.position;
        entity.transform.rotation = self.rotation;
        entity.velocity = self.velocity;
    }
}
