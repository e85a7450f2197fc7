//! Test fixtures and helpers.
//!
//! Pre-built configs and entities for consistent testing.

use glam::Vec3;
use skirmish_core::components::{
    NetEntityId, PeerId, PlayerState, ProjectileState, Transform,
};
use skirmish_core::config::MatchConfig;
use skirmish_core::registry::Entity;

/// A deterministic match config for tests: two known spawn points and a
/// small skin pool, default tuning otherwise.
#[must_use]
pub fn test_config() -> MatchConfig {
    MatchConfig {
        spawn_points: vec![
            Transform::from_yaw(Vec3::new(-5.0, 0.0, 0.0), 0.0),
            Transform::from_yaw(Vec3::new(5.0, 0.0, 0.0), std::f32::consts::PI),
        ],
        skin_count: 4,
        ..MatchConfig::default()
    }
}

/// A player entity owned by `peer`, at full health, at the origin.
#[must_use]
pub fn player_fixture(peer: u32, sequence: u32) -> Entity {
    Entity::player(
        NetEntityId::compose(PeerId(peer), sequence),
        PeerId(peer),
        Transform::IDENTITY,
        PlayerState::new(format!("fixture-{peer}"), 100.0),
    )
}

/// A projectile at `position`, attributed to `shooter`, with default
/// tuning.
#[must_use]
pub fn projectile_fixture(shooter: &Entity, position: Vec3) -> Entity {
    let id = NetEntityId::compose(shooter.owner, 1000);
    Entity::projectile(
        id,
        shooter.owner,
        Transform::new(position, glam::Quat::IDENTITY),
        ProjectileState::new(shooter.id, 20.0, 30.0, 60),
    )
}
