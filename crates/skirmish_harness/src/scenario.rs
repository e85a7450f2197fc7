//! Scripted bot scenarios.
//!
//! Bots are deliberately dumb: face the nearest enemy, close distance,
//! hold the trigger. The point is to exercise the replication paths,
//! not to play well.

use glam::Vec3;
use skirmish_core::components::{NetEntityId, PlayerIntent};
use skirmish_core::peer::Peer;

/// Parameters for one headless match.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Room name.
    pub room: String,
    /// Number of bots joining at tick zero.
    pub bots: u8,
    /// Ticks to simulate.
    pub ticks: u64,
    /// Tick at which one extra bot joins mid-match, to exercise
    /// buffered replay. `None` disables the late joiner.
    pub late_join_tick: Option<u64>,
    /// Seed for per-bot RNGs.
    pub seed: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            room: "Room1".to_owned(),
            bots: 2,
            ticks: 600,
            late_join_tick: Some(200),
            seed: 7,
        }
    }
}

/// Yaw that makes a player at `from` face `to`.
#[must_use]
pub fn yaw_toward(from: Vec3, to: Vec3) -> f32 {
    let direction = to - from;
    // forward is (-sin yaw, 0, -cos yaw)
    (-direction.x).atan2(-direction.z)
}

/// Distance at which a bot stops advancing and just shoots.
const ENGAGE_RANGE: f32 = 8.0;

/// Compute a bot's intent for this tick: face the nearest enemy
/// replica, advance until in range, fire continuously.
#[must_use]
pub fn bot_intent(peer: &Peer) -> PlayerIntent {
    let Some(own_id) = peer.local_player() else {
        return PlayerIntent::default();
    };
    let Some(own) = peer.registry().get(own_id) else {
        return PlayerIntent::default();
    };

    let nearest = nearest_enemy(peer, own_id, own.transform.position);
    let Some((_, enemy_position)) = nearest else {
        return PlayerIntent::default();
    };

    let yaw = yaw_toward(own.transform.position, enemy_position);
    let distance = own.transform.position.distance(enemy_position);
    let movement = if distance > ENGAGE_RANGE {
        Vec3::new(0.0, 0.0, -1.0) // forward in local space
    } else {
        Vec3::ZERO
    };

    PlayerIntent {
        movement,
        yaw,
        jump: false,
        fire: true,
    }
}

fn nearest_enemy(
    peer: &Peer,
    own_id: NetEntityId,
    own_position: Vec3,
) -> Option<(NetEntityId, Vec3)> {
    peer.registry()
        .players()
        .filter(|entity| entity.id != own_id)
        .map(|entity| (entity.id, entity.transform.position))
        .min_by(|(_, a), (_, b)| {
            let da = a.distance_squared(own_position);
            let db = b.distance_squared(own_position);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}
