//! # Skirmish Core
//!
//! Authoritative replication and combat core for a small arena shooter.
//!
//! Every entity has exactly one owning peer that simulates it and
//! publishes its state. Continuous fields (position, velocity,
//! rotation, plus health and score as a catch-up read model) travel as
//! unreliable last-write-wins snapshots; discrete changes (damage,
//! names, skins, kill awards) travel as reliable, ordered, buffered
//! events. Combat resolves only on the victim's owner.
//!
//! This crate contains **only** simulation logic:
//! - No rendering or UI (external collaborators read the exposed state)
//! - No input polling (the core consumes [`components::PlayerIntent`])
//! - No transport (the relay collaborator delivers [`peer::NetMessage`]s
//!   and carries away [`peer::PeerCommand`]s)
//!
//! ## Crate Structure
//!
//! - [`registry`] - entity storage and lifecycle
//! - [`authority`] - single-owner gate for every mutation
//! - [`snapshot`] - ordered wire tuple for player state
//! - [`events`] - typed reliable event channel messages
//! - [`combat`] - damage, death/respawn, projectile contacts
//! - [`spawn`] - spawn-point pool and seeded selection
//! - [`skins`] - master-held skin index pool
//! - [`peer`] - the per-tick simulation loop tying it together

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod authority;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod peer;
pub mod registry;
pub mod skins;
pub mod snapshot;
pub mod spawn;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::authority::Authority;
    pub use crate::combat::{apply_damage, award_kill, find_contact, DamageOutcome};
    pub use crate::components::{
        EntityKind, NetEntityId, PeerId, PlayerIntent, PlayerState, ProjectileState, Transform,
    };
    pub use crate::config::{MatchConfig, ProjectileConfig};
    pub use crate::error::{CoreError, Result};
    pub use crate::events::{Audience, EventEnvelope, GameEvent};
    pub use crate::peer::{NetMessage, Peer, PeerCommand, TICK_RATE};
    pub use crate::registry::{Entity, EntityRegistry};
    pub use crate::skins::SkinPool;
    pub use crate::snapshot::PlayerSnapshot;
    pub use crate::spawn::{SpawnPool, SpawnRng};
}
