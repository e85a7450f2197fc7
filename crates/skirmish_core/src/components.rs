//! Replicated component definitions.
//!
//! Components are pure data with no behavior. Every networked entity
//! is composed of these components, and the owning peer is the only
//! writer of record for all of them.

use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Identifier for a connected peer.
///
/// Peer ids are assigned by the relay when a peer joins a room and are
/// stable for the lifetime of the connection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct PeerId(pub u32);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// Network-unique entity identifier.
///
/// Ids are allocated by the owning peer as `owner << 32 | sequence`, so
/// two peers can never mint the same id without coordination. Ids are
/// never reused within a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct NetEntityId(pub u64);

impl NetEntityId {
    /// Compose an id from the owning peer and a per-peer sequence number.
    #[must_use]
    pub const fn compose(owner: PeerId, sequence: u32) -> Self {
        Self(((owner.0 as u64) << 32) | sequence as u64)
    }

    /// Peer that allocated this id.
    #[must_use]
    pub const fn allocator(self) -> PeerId {
        PeerId((self.0 >> 32) as u32)
    }
}

impl fmt::Display for NetEntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity-{}/{}", self.0 >> 32, self.0 & 0xFFFF_FFFF)
    }
}

/// Kind of networked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A player avatar, alive for as long as its peer stays connected.
    Player,
    /// A short-lived projectile fired by a player.
    Projectile,
}

/// World-space placement of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
}

impl Transform {
    /// Identity transform at the origin.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a transform from a position and rotation.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a transform at `position` facing along `yaw` radians
    /// around the vertical axis.
    #[must_use]
    pub fn from_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw),
        }
    }

    /// Forward direction of this transform (negative Z in local space).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Authoritative state attached to a player entity.
///
/// Mutated only by the owning peer; everyone else holds a replica that is
/// overwritten by snapshots and buffered assignment events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current health, always within `[0, max_health]`.
    pub health: f32,
    /// Health ceiling for this match.
    pub max_health: f32,
    /// Accumulated score. Reset to zero when the player dies.
    pub score: u32,
    /// Skin assigned by the room master, if any.
    pub skin_index: Option<u8>,
    /// Name announced once at spawn.
    pub display_name: String,
}

impl PlayerState {
    /// Create a player at full health with no skin assigned yet.
    #[must_use]
    pub fn new(display_name: impl Into<String>, max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            score: 0,
            skin_index: None,
            display_name: display_name.into(),
        }
    }

    /// Check whether the player has no health left.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Current health as a `[0, 1]` ratio for UI consumption.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Set health, clamped into `[0, max_health]`. Out-of-range values
    /// are clamped rather than rejected.
    pub fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, self.max_health);
    }

    /// Add score points, saturating at the counter ceiling.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}

/// State attached to a projectile entity.
///
/// `shooter` is attribution only: it is used to skip self-hits and to
/// address the kill award, never to mutate the shooter directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Entity that fired this projectile.
    pub shooter: NetEntityId,
    /// Damage applied on contact.
    pub damage: f32,
    /// Travel speed in units per second.
    pub speed: f32,
    /// Ticks until the owner retires the projectile.
    pub lifetime_ticks: u32,
    /// Ticks lived so far.
    pub age_ticks: u32,
}

impl ProjectileState {
    /// Create projectile state at age zero.
    #[must_use]
    pub const fn new(shooter: NetEntityId, damage: f32, speed: f32, lifetime_ticks: u32) -> Self {
        Self {
            shooter,
            damage,
            speed,
            lifetime_ticks,
            age_ticks: 0,
        }
    }

    /// Whether the projectile has outlived its configured lifetime.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.age_ticks >= self.lifetime_ticks
    }
}

/// Movement and fire intent for one tick, produced by the external
/// input layer. The core consumes intents; it does not define input
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerIntent {
    /// Desired planar movement in local space, `[-1, 1]` per axis.
    pub movement: Vec3,
    /// Desired facing around the vertical axis, radians.
    pub yaw: f32,
    /// Jump edge this tick.
    pub jump: bool,
    /// Fire edge this tick.
    pub fire: bool,
}
