//! Match reports.
//!
//! The harness emits one JSON document per match so CI can diff runs
//! and soak tests can be graphed.

use serde::Serialize;

use crate::error::Result;

/// Final state of one player, read from its owning peer.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    /// Owning peer id.
    pub peer: u32,
    /// Player entity id.
    pub entity: u64,
    /// Announced display name.
    pub name: String,
    /// Assigned skin, if the master got to it.
    pub skin_index: Option<u8>,
    /// Final score.
    pub score: u32,
    /// Final health as a `[0, 1]` ratio.
    pub health_ratio: f32,
    /// Kills credited over the match.
    pub kills: u32,
    /// Projectiles fired over the match.
    pub shots_fired: u32,
}

/// Wire-level message counts across the whole match.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WireTotals {
    /// Reliable events published.
    pub events: u64,
    /// Snapshot payloads published.
    pub snapshots: u64,
    /// Spawn commands published.
    pub spawns: u64,
    /// Destroy commands published.
    pub destroys: u64,
}

/// Everything a match run produces.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    /// Room the match ran in.
    pub room: String,
    /// Ticks simulated.
    pub ticks: u64,
    /// Bots that joined at tick zero.
    pub bots: u8,
    /// Tick the late joiner arrived at, if any.
    pub late_join_tick: Option<u64>,
    /// Per-player outcomes.
    pub players: Vec<PlayerReport>,
    /// Wire-level totals.
    pub wire: WireTotals,
}

impl MatchReport {
    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
