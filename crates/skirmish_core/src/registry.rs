//! Entity registry.
//!
//! Maps network entity ids to locally simulated entities. One registry
//! exists per peer; it holds the peer's own entities alongside replicas
//! of everyone else's. Entities enter through explicit spawn commands
//! and leave through explicit destroy commands or owner disconnect.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::{
    EntityKind, NetEntityId, PeerId, PlayerState, ProjectileState, Transform,
};
use crate::error::{CoreError, Result};

/// A networked entity with optional components.
///
/// Only components that are `Some` are active. Exactly one peer owns an
/// entity for its whole lifetime; the owner simulates it, everyone else
/// holds a replica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Network-unique identifier.
    pub id: NetEntityId,
    /// Kind of entity.
    pub kind: EntityKind,
    /// The single authoritative peer for this entity.
    pub owner: PeerId,
    /// World placement.
    pub transform: Transform,
    /// Current velocity in units per second.
    pub velocity: Vec3,
    /// Whether the entity is live. Cleared just before removal.
    pub alive: bool,
    /// Player state, present on `EntityKind::Player`.
    pub player: Option<PlayerState>,
    /// Projectile state, present on `EntityKind::Projectile`.
    pub projectile: Option<ProjectileState>,
}

impl Entity {
    /// Create a player entity at the given spawn transform.
    #[must_use]
    pub fn player(id: NetEntityId, owner: PeerId, transform: Transform, state: PlayerState) -> Self {
        Self {
            id,
            kind: EntityKind::Player,
            owner,
            transform,
            velocity: Vec3::ZERO,
            alive: true,
            player: Some(state),
            projectile: None,
        }
    }

    /// Create a projectile entity travelling along the transform's
    /// forward direction at the projectile's speed.
    #[must_use]
    pub fn projectile(
        id: NetEntityId,
        owner: PeerId,
        transform: Transform,
        state: ProjectileState,
    ) -> Self {
        let velocity = transform.forward() * state.speed;
        Self {
            id,
            kind: EntityKind::Projectile,
            owner,
            transform,
            velocity,
            alive: true,
            player: None,
            projectile: Some(state),
        }
    }
}

/// Storage for all entities known to a peer.
///
/// Uses a `HashMap` for O(1) lookup by id, with deterministic iteration
/// via sorted keys when running systems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityRegistry {
    entities: HashMap<NetEntityId, Entity>,
}

impl EntityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    /// Insert a spawned entity.
    ///
    /// Ids are allocated by the owning peer, so a collision here means a
    /// duplicated spawn command.
    pub fn insert(&mut self, entity: Entity) -> Result<()> {
        if self.entities.contains_key(&entity.id) {
            return Err(CoreError::DuplicateEntity(entity.id));
        }
        self.entities.insert(entity.id, entity);
        Ok(())
    }

    /// Remove an entity by id, returning it if present.
    pub fn remove(&mut self, id: NetEntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Get an entity by id.
    #[must_use]
    pub fn get(&self, id: NetEntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Get a mutable reference to an entity by id.
    pub fn get_mut(&mut self, id: NetEntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Check whether an entity exists.
    #[must_use]
    pub fn contains(&self, id: NetEntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of entities in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Sorted entity ids for deterministic iteration.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<NetEntityId> {
        let mut ids: Vec<_> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over all entities (not in deterministic order).
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate over live player entities.
    pub fn players(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(|entity| entity.kind == EntityKind::Player && entity.alive)
    }

    /// Ids of all entities owned by `peer`, sorted.
    #[must_use]
    pub fn owned_by(&self, peer: PeerId) -> Vec<NetEntityId> {
        let mut ids: Vec<_> = self
            .entities
            .values()
            .filter(|entity| entity.owner == peer)
            .map(|entity| entity.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
