//! Reliable event channel message types.
//!
//! Discrete gameplay changes travel as typed events over a reliable,
//! ordered channel; events addressed to the same entity arrive in send
//! order at every recipient, and `AllBuffered` events are replayed in
//! order to peers that join later. The closed enum keeps dispatch
//! static: every event lands in one handler arm, nothing is looked up
//! by name over the wire.

use serde::{Deserialize, Serialize};

use crate::components::{NetEntityId, PeerId};

/// A discrete, reliably delivered gameplay event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Apply damage to `target`. Only the target's owner acts on it;
    /// everyone else receives it and ignores it.
    Damage {
        /// Entity being hit.
        target: NetEntityId,
        /// Entity the hit is attributed to.
        attacker: NetEntityId,
        /// Damage amount. Clamped on application, never rejected.
        amount: f32,
    },
    /// Announce `target`'s display name, sent once at spawn.
    AssignName {
        /// Entity being named.
        target: NetEntityId,
        /// Name to show.
        name: String,
    },
    /// Announce the skin index the master allocated for `target`.
    AssignSkin {
        /// Entity receiving the skin.
        target: NetEntityId,
        /// Index into the skin pool.
        skin_index: u8,
    },
    /// Award kill points to `target`. Only the target's owner acts on it.
    AwardKill {
        /// Entity being awarded.
        target: NetEntityId,
        /// Points for the kill.
        points: u32,
    },
}

impl GameEvent {
    /// The entity this event is addressed to.
    ///
    /// Per-target ordering and buffered-cache cleanup key off this id.
    #[must_use]
    pub const fn target(&self) -> NetEntityId {
        match self {
            Self::Damage { target, .. }
            | Self::AssignName { target, .. }
            | Self::AssignSkin { target, .. }
            | Self::AwardKill { target, .. } => *target,
        }
    }
}

/// Who an event is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    /// Every peer in the room, now and in the future: the event is
    /// buffered and replayed to late joiners.
    AllBuffered,
    /// One specific peer, not buffered.
    Peer(PeerId),
}

/// An event stamped with its position in the room's reliable stream.
///
/// The relay assigns `seq` when it accepts the event; within a room the
/// sequence is a total order, which subsumes the per-target ordering
/// guarantee the core needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Position in the room's reliable stream.
    pub seq: u64,
    /// Peer that sent the event.
    pub sender: PeerId,
    /// Delivery scope.
    pub audience: Audience,
    /// The event itself.
    pub event: GameEvent,
}
