//! Skin-index allocation.
//!
//! A process-wide pool of skin indices with a mapping from index to the
//! live player holding it. To keep the uniqueness invariant under
//! concurrent joins, only the room's master peer allocates from this
//! pool; it announces each grant with a buffered `AssignSkin` event and
//! every other peer just applies what it hears.

use std::collections::BTreeMap;

use crate::components::NetEntityId;

/// Pool of assignable skin indices, held by the master peer.
#[derive(Debug, Clone, Default)]
pub struct SkinPool {
    count: u8,
    assigned: BTreeMap<u8, NetEntityId>,
}

impl SkinPool {
    /// Create a pool with `count` assignable indices.
    #[must_use]
    pub fn new(count: u8) -> Self {
        Self {
            count,
            assigned: BTreeMap::new(),
        }
    }

    /// Allocate the lowest unassigned index for `entity`.
    ///
    /// Idempotent: an entity that already holds an index gets that same
    /// index back. Returns `None` only when the pool is exhausted; the
    /// player then simply goes without a skin (degraded, not fatal).
    pub fn allocate(&mut self, entity: NetEntityId) -> Option<u8> {
        if let Some((&held, _)) = self.assigned.iter().find(|(_, &holder)| holder == entity) {
            return Some(held);
        }
        let index = (0..self.count).find(|index| !self.assigned.contains_key(index))?;
        self.assigned.insert(index, entity);
        Some(index)
    }

    /// Record an assignment that already happened, used when a peer is
    /// promoted to master and rebuilds the pool from replicated state.
    ///
    /// Last write wins on conflicting indices; the previous holder is
    /// displaced. Indices beyond the pool size are ignored.
    pub fn restore(&mut self, index: u8, entity: NetEntityId) {
        if index < self.count {
            self.assigned.insert(index, entity);
        }
    }

    /// Release whatever index `entity` holds, returning it to the pool.
    pub fn release(&mut self, entity: NetEntityId) -> Option<u8> {
        let index = self
            .assigned
            .iter()
            .find(|(_, &holder)| holder == entity)
            .map(|(&index, _)| index)?;
        self.assigned.remove(&index);
        Some(index)
    }

    /// Entity currently holding `index`, if any.
    #[must_use]
    pub fn holder(&self, index: u8) -> Option<NetEntityId> {
        self.assigned.get(&index).copied()
    }

    /// Number of indices currently assigned.
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PeerId;

    fn entity(n: u32) -> NetEntityId {
        NetEntityId::compose(PeerId(n), 1)
    }

    #[test]
    fn allocates_lowest_free_index() {
        let mut pool = SkinPool::new(4);
        assert_eq!(pool.allocate(entity(1)), Some(0));
        assert_eq!(pool.allocate(entity(2)), Some(1));

        pool.release(entity(1));
        // Freed slot is reused before higher indices
        assert_eq!(pool.allocate(entity(3)), Some(0));
    }

    #[test]
    fn every_index_maps_to_one_holder() {
        let mut pool = SkinPool::new(8);
        for n in 1..=8 {
            let index = pool.allocate(entity(n)).expect("index available");
            assert_eq!(pool.holder(index), Some(entity(n)));
        }
        assert_eq!(pool.assigned_count(), 8);
    }

    #[test]
    fn exhausted_pool_returns_none() {
        let mut pool = SkinPool::new(1);
        assert_eq!(pool.allocate(entity(1)), Some(0));
        assert_eq!(pool.allocate(entity(2)), None);
    }

    #[test]
    fn reallocation_for_same_entity_is_idempotent() {
        let mut pool = SkinPool::new(4);
        assert_eq!(pool.allocate(entity(1)), Some(0));
        assert_eq!(pool.allocate(entity(1)), Some(0));
        assert_eq!(pool.assigned_count(), 1);
    }

    #[test]
    fn release_unknown_entity_is_a_no_op() {
        let mut pool = SkinPool::new(4);
        assert_eq!(pool.release(entity(9)), None);
    }
}
