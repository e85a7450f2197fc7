//! Combat resolution.
//!
//! Damage, death and respawn are resolved exclusively on the peer that
//! owns the affected entity; remote peers learn the result through the
//! owner's snapshots. The per-player state machine is `Alive -> Dead ->
//! Alive` with an instantaneous respawn: health back to the ceiling,
//! score reset to zero, avatar moved to a fresh spawn point.
//!
//! Malformed numeric input is clamped, never rejected: all peers are
//! assumed non-malicious in this trust model.

use glam::Vec3;

use crate::components::NetEntityId;
use crate::config::MatchConfig;
use crate::registry::Entity;
use crate::spawn::{SpawnPool, SpawnRng};

/// Result of applying damage to an owned player entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Nothing changed: self-hit, non-player target, or dead entity.
    Ignored,
    /// Damage landed; the player survived with this much health.
    Applied {
        /// Health remaining after the hit.
        remaining: f32,
    },
    /// The hit was lethal. The victim has already respawned; the caller
    /// owes the attacker a kill award if the attacker still exists.
    Killed {
        /// Entity the kill is attributed to.
        attacker: NetEntityId,
    },
}

/// Apply damage to an owned player entity.
///
/// Callers gate on ownership before calling: only the victim's owner
/// resolves damage. The self-hit check runs before any mutation, and
/// the damage amount is clamped non-negative.
pub fn apply_damage(
    entity: &mut Entity,
    attacker: NetEntityId,
    amount: f32,
    spawn_pool: &SpawnPool,
    rng: &mut SpawnRng,
    config: &MatchConfig,
) -> DamageOutcome {
    if attacker == entity.id {
        tracing::debug!(entity = %entity.id, "ignoring self-inflicted damage");
        return DamageOutcome::Ignored;
    }
    if !entity.alive {
        return DamageOutcome::Ignored;
    }
    let Some(player) = entity.player.as_mut() else {
        return DamageOutcome::Ignored;
    };

    let amount = amount.max(0.0);
    player.set_health(player.health - amount);
    tracing::debug!(
        entity = %entity.id,
        attacker = %attacker,
        amount,
        health = player.health,
        "damage applied"
    );

    if player.is_dead() {
        respawn(entity, spawn_pool, rng, config);
        DamageOutcome::Killed { attacker }
    } else {
        DamageOutcome::Applied {
            remaining: entity.player.as_ref().map_or(0.0, |p| p.health),
        }
    }
}

/// Respawn an owned player entity in place.
///
/// Health returns to the ceiling, the score resets to zero, and the
/// avatar moves to a freshly chosen spawn point with zeroed velocity.
pub fn respawn(entity: &mut Entity, spawn_pool: &SpawnPool, rng: &mut SpawnRng, config: &MatchConfig) {
    let Some(player) = entity.player.as_mut() else {
        return;
    };
    player.set_health(config.max_health);
    player.score = 0;
    entity.transform = spawn_pool.choose(rng);
    entity.velocity = Vec3::ZERO;
    tracing::debug!(entity = %entity.id, "player respawned");
}

/// Award kill points to an owned player entity.
///
/// Callers gate on ownership; non-owners receiving the award event do
/// nothing.
pub fn award_kill(entity: &mut Entity, points: u32) {
    if let Some(player) = entity.player.as_mut() {
        player.add_score(points);
        tracing::debug!(entity = %entity.id, points, score = player.score, "kill awarded");
    }
}

/// A projectile contact resolved by the projectile's owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    /// Player entity that was struck.
    pub target: NetEntityId,
    /// Entity the hit is attributed to (the shooter).
    pub attacker: NetEntityId,
    /// Damage to deliver over the event channel.
    pub damage: f32,
}

/// Test an owned projectile against the live players in `candidates`.
///
/// Returns the first contact in deterministic (id-sorted) order, or
/// `None`. The shooter is skipped before any damage is considered, so a
/// projectile passes through the player that fired it. Contacts with
/// level geometry are not the core's business and never reach here.
#[must_use]
pub fn find_contact<'a>(
    projectile: &Entity,
    candidates: impl Iterator<Item = &'a Entity>,
    hit_radius: f32,
) -> Option<ProjectileHit> {
    let state = projectile.projectile.as_ref()?;
    let origin = projectile.transform.position;
    let radius_sq = hit_radius * hit_radius;

    let mut hits: Vec<&Entity> = candidates
        .filter(|candidate| {
            candidate.alive
                && candidate.player.is_some()
                && candidate.id != state.shooter
                && candidate.transform.position.distance_squared(origin) <= radius_sq
        })
        .collect();
    hits.sort_unstable_by_key(|candidate| candidate.id);

    hits.first().map(|target| ProjectileHit {
        target: target.id,
        attacker: state.shooter,
        damage: state.damage,
    })
}
