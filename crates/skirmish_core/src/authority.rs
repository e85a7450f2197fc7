//! Ownership authority.
//!
//! Exactly one peer is authoritative for each entity, assigned at spawn
//! and held until the entity is destroyed or its owner disconnects.
//! There is no transfer protocol. Every mutating entry point in the core
//! goes through this gate instead of re-checking ownership inline.

use crate::components::PeerId;
use crate::registry::Entity;

/// The local peer's view of who owns what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authority {
    local_peer: PeerId,
}

impl Authority {
    /// Create the authority gate for a peer.
    #[must_use]
    pub const fn new(local_peer: PeerId) -> Self {
        Self { local_peer }
    }

    /// The peer this authority represents.
    #[must_use]
    pub const fn local_peer(&self) -> PeerId {
        self.local_peer
    }

    /// Check whether the local peer owns `entity`.
    #[must_use]
    pub fn is_owner(&self, entity: &Entity) -> bool {
        entity.owner == self.local_peer
    }

    /// Return `entity` only if the local peer owns it.
    ///
    /// Non-owner access is the silent-ignore path: callers treat `None`
    /// as "not mine, no state change" and move on.
    pub fn owned_mut<'a>(&self, entity: &'a mut Entity) -> Option<&'a mut Entity> {
        if entity.owner == self.local_peer {
            Some(entity)
        } else {
            tracing::debug!(
                entity = %entity.id,
                owner = %entity.owner,
                local = %self.local_peer,
                "ignoring mutation attempt on non-owned entity"
            );
            None
        }
    }
}
