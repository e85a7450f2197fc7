//! Per-peer simulation loop.
//!
//! Each peer runs one cooperative thread of simulation: network
//! messages queue up between ticks and are drained at the top of the
//! next one, then the peer simulates what it owns and publishes the
//! results. There is no blocking anywhere; waiting for remote state is
//! just polling the registry next tick.
//!
//! # Tick order
//!
//! 1. Drain queued messages (spawns, destroys, events, snapshots)
//! 2. Master duties: assign skins to players that lack one
//! 3. Apply the local player's intent
//! 4. Advance projectiles; owned ones resolve contacts and expiry
//! 5. Capture and publish snapshots for owned players
//!
//! # Example
//!
//! ```
//! use skirmish_core::components::{PeerId, PlayerIntent};
//! use skirmish_core::config::MatchConfig;
//! use skirmish_core::peer::Peer;
//!
//! let mut peer = Peer::new(PeerId(1), MatchConfig::default(), 42);
//! peer.promote_to_master();
//! let player = peer.spawn_local_player(Some("host".into()));
//! let commands = peer.tick(PlayerIntent::default(), Vec::new());
//! assert!(peer.registry().contains(player));
//! assert!(!commands.is_empty());
//! ```

use glam::{Quat, Vec3};

use crate::authority::Authority;
use crate::combat::{self, DamageOutcome};
use crate::components::{
    NetEntityId, PeerId, PlayerIntent, PlayerState, ProjectileState, Transform,
};
use crate::config::MatchConfig;
use crate::events::{Audience, EventEnvelope, GameEvent};
use crate::registry::{Entity, EntityRegistry};
use crate::skins::SkinPool;
use crate::snapshot::PlayerSnapshot;
use crate::spawn::{SpawnPool, SpawnRng};

/// Simulation ticks per second.
pub const TICK_RATE: u32 = 20;

/// Duration of one tick in milliseconds.
pub const TICK_DURATION_MS: u32 = 1000 / TICK_RATE;

/// Vertical stick applied while grounded so the avatar hugs the floor.
const GROUND_STICK: f32 = -2.0;

/// Muzzle offset in front of the avatar where projectiles appear.
const MUZZLE_OFFSET: f32 = 1.0;

/// A command handed to the relay at the end of a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerCommand {
    /// Create this entity on every peer. Buffered for late joiners.
    Spawn(Entity),
    /// Destroy this entity on every peer and drop its buffered state.
    Destroy(NetEntityId),
    /// Send a reliable event.
    Event {
        /// Delivery scope.
        audience: Audience,
        /// The event to deliver.
        event: GameEvent,
    },
    /// Publish an unreliable snapshot payload.
    Snapshot {
        /// Entity the payload describes.
        entity: NetEntityId,
        /// Encoded [`PlayerSnapshot`].
        payload: Vec<u8>,
    },
}

/// A message delivered to a peer by the relay.
#[derive(Debug, Clone, PartialEq)]
pub enum NetMessage {
    /// Materialize a replica of this entity.
    Spawn(Entity),
    /// Remove this entity.
    Destroy(NetEntityId),
    /// A reliable event, in room order. Senders hear their own events
    /// back; application is gated per event type.
    Event(EventEnvelope),
    /// An unreliable snapshot payload for a non-owned replica.
    Snapshot {
        /// Entity the payload describes.
        entity: NetEntityId,
        /// Encoded [`PlayerSnapshot`].
        payload: Vec<u8>,
    },
}

/// One peer's complete simulation state.
#[derive(Debug)]
pub struct Peer {
    authority: Authority,
    registry: EntityRegistry,
    config: MatchConfig,
    spawn_pool: SpawnPool,
    rng: SpawnRng,
    /// Present only while this peer is the room master.
    skins: Option<SkinPool>,
    local_player: Option<NetEntityId>,
    next_sequence: u32,
    fire_cooldown: u32,
    tick: u64,
    outbox: Vec<PeerCommand>,
}

impl Peer {
    /// Create a peer with the given id, match config and RNG seed.
    ///
    /// The peer starts as a non-master; call [`promote_to_master`]
    /// when the relay designates it.
    ///
    /// [`promote_to_master`]: Self::promote_to_master
    #[must_use]
    pub fn new(id: PeerId, config: MatchConfig, seed: u64) -> Self {
        let spawn_pool = SpawnPool::new(config.spawn_points.clone());
        Self {
            authority: Authority::new(id),
            registry: EntityRegistry::new(),
            config,
            spawn_pool,
            rng: SpawnRng::new(seed),
            skins: None,
            local_player: None,
            next_sequence: 0,
            fire_cooldown: 0,
            tick: 0,
            outbox: Vec::new(),
        }
    }

    /// This peer's id.
    #[must_use]
    pub fn id(&self) -> PeerId {
        self.authority.local_peer()
    }

    /// Current tick number.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// The entity registry, for read access.
    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// The local player's entity id, once spawned.
    #[must_use]
    pub const fn local_player(&self) -> Option<NetEntityId> {
        self.local_player
    }

    /// Whether this peer currently holds master duties.
    #[must_use]
    pub const fn is_master(&self) -> bool {
        self.skins.is_some()
    }

    /// Take on master duties: rebuild the skin pool from replicated
    /// state so grants made by the previous master stay honored.
    pub fn promote_to_master(&mut self) {
        if self.skins.is_some() {
            return;
        }
        let mut pool = SkinPool::new(self.config.skin_count);
        for id in self.registry.sorted_ids() {
            let Some(entity) = self.registry.get(id) else {
                continue;
            };
            if let Some(index) = entity.player.as_ref().and_then(|p| p.skin_index) {
                pool.restore(index, id);
            }
        }
        tracing::info!(peer = %self.id(), "promoted to room master");
        self.skins = Some(pool);
    }

    /// Spawn the local player at a chosen spawn point.
    ///
    /// Emits the spawn command and the buffered name announcement. With
    /// no name given, a `Player #<1000..9999>` name is generated.
    pub fn spawn_local_player(&mut self, name: Option<String>) -> NetEntityId {
        let name = name.unwrap_or_else(|| {
            format!("Player #{}", 1000 + self.rng.next_bounded(9000))
        });
        let id = self.allocate_entity_id();
        let transform = self.spawn_pool.choose(&mut self.rng);
        let entity = Entity::player(
            id,
            self.id(),
            transform,
            PlayerState::new(name.clone(), self.config.max_health),
        );

        self.registry
            .insert(entity.clone())
            .expect("freshly allocated id cannot collide");
        self.local_player = Some(id);

        self.outbox.push(PeerCommand::Spawn(entity));
        self.outbox.push(PeerCommand::Event {
            audience: Audience::AllBuffered,
            event: GameEvent::AssignName { target: id, name },
        });
        tracing::info!(peer = %self.id(), entity = %id, "local player spawned");
        id
    }

    /// Advance one tick: drain `inbox`, simulate, and return the
    /// commands to hand to the relay.
    pub fn tick(&mut self, intent: PlayerIntent, inbox: Vec<NetMessage>) -> Vec<PeerCommand> {
        for message in inbox {
            self.handle_message(message);
        }

        self.run_master_duties();
        self.apply_intent(intent);
        self.run_projectile_system();
        self.publish_snapshots();

        self.tick += 1;
        tracing::debug!(
            peer = %self.id(),
            tick = self.tick,
            entities = self.registry.len(),
            "tick complete"
        );
        std::mem::take(&mut self.outbox)
    }

    // ------------------------------------------------------------------
    // Read model for the UI collaborator
    // ------------------------------------------------------------------

    /// Health of `id` as a `[0, 1]` ratio.
    #[must_use]
    pub fn health_ratio(&self, id: NetEntityId) -> Option<f32> {
        self.player_state(id).map(PlayerState::health_ratio)
    }

    /// Current score of `id`.
    #[must_use]
    pub fn score(&self, id: NetEntityId) -> Option<u32> {
        self.player_state(id).map(|p| p.score)
    }

    /// Display name of `id`.
    #[must_use]
    pub fn display_name(&self, id: NetEntityId) -> Option<&str> {
        self.player_state(id).map(|p| p.display_name.as_str())
    }

    /// Skin index of `id`, if one has been assigned.
    #[must_use]
    pub fn skin_index(&self, id: NetEntityId) -> Option<u8> {
        self.player_state(id).and_then(|p| p.skin_index)
    }

    fn player_state(&self, id: NetEntityId) -> Option<&PlayerState> {
        self.registry.get(id).and_then(|e| e.player.as_ref())
    }

    // ------------------------------------------------------------------
    // Message handling
    // ------------------------------------------------------------------

    fn handle_message(&mut self, message: NetMessage) {
        match message {
            NetMessage::Spawn(entity) => {
                let id = entity.id;
                if let Err(err) = self.registry.insert(entity) {
                    tracing::warn!(peer = %self.id(), entity = %id, %err, "spawn ignored");
                }
            }
            NetMessage::Destroy(id) => {
                if self.registry.remove(id).is_some() {
                    if let Some(skins) = self.skins.as_mut() {
                        skins.release(id);
                    }
                } else {
                    tracing::debug!(peer = %self.id(), entity = %id, "destroy for unknown entity");
                }
            }
            NetMessage::Event(envelope) => self.handle_event(envelope),
            NetMessage::Snapshot { entity, payload } => self.handle_snapshot(entity, &payload),
        }
    }

    /// Dispatch one reliable event through the handler table.
    fn handle_event(&mut self, envelope: EventEnvelope) {
        match envelope.event {
            GameEvent::Damage {
                target,
                attacker,
                amount,
            } => self.on_damage(target, attacker, amount),
            GameEvent::AssignName { target, name } => self.on_assign_name(target, name),
            GameEvent::AssignSkin { target, skin_index } => {
                self.on_assign_skin(target, skin_index);
            }
            GameEvent::AwardKill { target, points } => self.on_award_kill(target, points),
        }
    }

    /// Damage lands only on the victim's owner; every other recipient
    /// drops it here.
    fn on_damage(&mut self, target: NetEntityId, attacker: NetEntityId, amount: f32) {
        let Some(entity) = self.registry.get_mut(target) else {
            tracing::debug!(peer = %self.id(), entity = %target, "damage for unknown entity");
            return;
        };
        let Some(entity) = self.authority.owned_mut(entity) else {
            return;
        };

        let outcome = combat::apply_damage(
            entity,
            attacker,
            amount,
            &self.spawn_pool,
            &mut self.rng,
            &self.config,
        );
        if let DamageOutcome::Killed { attacker } = outcome {
            self.queue_kill_award(attacker);
        }
    }

    /// The kill award goes to the attacker's owning peer. A vanished
    /// attacker forfeits the award.
    fn queue_kill_award(&mut self, attacker: NetEntityId) {
        let Some(attacker_entity) = self.registry.get(attacker) else {
            tracing::debug!(peer = %self.id(), entity = %attacker, "attacker gone, kill award skipped");
            return;
        };
        self.outbox.push(PeerCommand::Event {
            audience: Audience::Peer(attacker_entity.owner),
            event: GameEvent::AwardKill {
                target: attacker,
                points: self.config.kill_score,
            },
        });
    }

    /// Names apply on every peer; they are replica-visible fields set
    /// once at creation.
    fn on_assign_name(&mut self, target: NetEntityId, name: String) {
        if let Some(player) = self
            .registry
            .get_mut(target)
            .and_then(|e| e.player.as_mut())
        {
            player.display_name = name;
        }
    }

    /// Skins apply on every peer, like names.
    fn on_assign_skin(&mut self, target: NetEntityId, skin_index: u8) {
        if let Some(player) = self
            .registry
            .get_mut(target)
            .and_then(|e| e.player.as_mut())
        {
            player.skin_index = Some(skin_index);
        }
    }

    fn on_award_kill(&mut self, target: NetEntityId, points: u32) {
        let Some(entity) = self.registry.get_mut(target) else {
            return;
        };
        if let Some(entity) = self.authority.owned_mut(entity) {
            combat::award_kill(entity, points);
        }
    }

    /// Snapshots overwrite non-owned replicas only. The owner's own
    /// state never regresses to a stale snapshot.
    fn handle_snapshot(&mut self, entity_id: NetEntityId, payload: &[u8]) {
        let Some(entity) = self.registry.get_mut(entity_id) else {
            return;
        };
        if entity.owner == self.authority.local_peer() {
            return;
        }
        match PlayerSnapshot::decode(payload) {
            Ok(snapshot) => snapshot.apply(entity),
            Err(err) => {
                tracing::warn!(peer = %self.id(), entity = %entity_id, %err, "snapshot dropped");
            }
        }
    }

    // ------------------------------------------------------------------
    // Simulation systems
    // ------------------------------------------------------------------

    /// Master-only: grant a skin to every live player that lacks one
    /// and announce each grant with a buffered event.
    fn run_master_duties(&mut self) {
        let Some(skins) = self.skins.as_mut() else {
            return;
        };

        let mut unskinned: Vec<NetEntityId> = self
            .registry
            .players()
            .filter(|entity| {
                entity
                    .player
                    .as_ref()
                    .is_some_and(|p| p.skin_index.is_none())
            })
            .map(|entity| entity.id)
            .collect();
        unskinned.sort_unstable();

        for id in unskinned {
            if let Some(skin_index) = skins.allocate(id) {
                self.outbox.push(PeerCommand::Event {
                    audience: Audience::AllBuffered,
                    event: GameEvent::AssignSkin {
                        target: id,
                        skin_index,
                    },
                });
            } else {
                tracing::warn!(entity = %id, "skin pool exhausted, player goes without");
            }
        }
    }

    /// Integrate the local player's movement and fire intent.
    fn apply_intent(&mut self, intent: PlayerIntent) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        let Some(player_id) = self.local_player else {
            return;
        };
        let config = self.config.clone();
        let dt = 1.0 / TICK_RATE as f32;

        let Some(entity) = self.registry.get_mut(player_id) else {
            self.local_player = None;
            return;
        };
        let Some(entity) = self.authority.owned_mut(entity) else {
            return;
        };

        entity.transform.rotation = Quat::from_rotation_y(intent.yaw);

        let planar = Vec3::new(intent.movement.x, 0.0, intent.movement.z).normalize_or_zero();
        let world = entity.transform.rotation * planar * config.move_speed;
        entity.velocity.x = world.x;
        entity.velocity.z = world.z;

        let grounded = entity.transform.position.y <= 0.0;
        if grounded && entity.velocity.y < 0.0 {
            entity.velocity.y = GROUND_STICK;
        }
        if intent.jump && grounded {
            entity.velocity.y = (config.jump_impulse * -2.0 * config.gravity).sqrt();
        }
        entity.velocity.y += config.gravity * dt;

        entity.transform.position += entity.velocity * dt;
        if entity.transform.position.y < 0.0 {
            entity.transform.position.y = 0.0;
        }

        let muzzle = entity.transform.position + entity.transform.forward() * MUZZLE_OFFSET;
        let rotation = entity.transform.rotation;

        if intent.fire && self.fire_cooldown == 0 {
            self.fire_cooldown = config.fire_cooldown_ticks;
            self.spawn_projectile(player_id, Transform::new(muzzle, rotation));
        }
    }

    /// Spawn a projectile owned by this peer, attributed to `shooter`.
    fn spawn_projectile(&mut self, shooter: NetEntityId, transform: Transform) {
        let id = self.allocate_entity_id();
        let state = ProjectileState::new(
            shooter,
            self.config.projectile.damage,
            self.config.projectile.speed,
            self.config.projectile.lifetime_ticks,
        );
        let entity = Entity::projectile(id, self.id(), transform, state);

        self.registry
            .insert(entity.clone())
            .expect("freshly allocated id cannot collide");
        self.outbox.push(PeerCommand::Spawn(entity));
        tracing::debug!(peer = %self.id(), entity = %id, "projectile fired");
    }

    /// Advance every projectile locally; resolve contacts and expiry
    /// for the ones this peer owns.
    fn run_projectile_system(&mut self) {
        let dt = 1.0 / TICK_RATE as f32;
        let hit_radius = self.config.projectile.hit_radius;
        let mut retired: Vec<NetEntityId> = Vec::new();

        for id in self.registry.sorted_ids() {
            // Motion is deterministic from spawn parameters, so every
            // peer advances every projectile.
            let Some(entity) = self.registry.get_mut(id) else {
                continue;
            };
            let Some(projectile) = entity.projectile.as_mut() else {
                continue;
            };
            projectile.age_ticks += 1;
            let velocity = entity.velocity;
            entity.transform.position += velocity * dt;

            if entity.owner != self.authority.local_peer() {
                continue;
            }

            // Owner-side resolution: contact first, then expiry.
            let entity = self
                .registry
                .get(id)
                .expect("projectile still present");
            if let Some(hit) = combat::find_contact(entity, self.registry.players(), hit_radius) {
                self.outbox.push(PeerCommand::Event {
                    audience: Audience::AllBuffered,
                    event: GameEvent::Damage {
                        target: hit.target,
                        attacker: hit.attacker,
                        amount: hit.damage,
                    },
                });
                retired.push(id);
                continue;
            }
            let expired = entity
                .projectile
                .as_ref()
                .is_some_and(ProjectileState::is_expired);
            if expired {
                retired.push(id);
            }
        }

        for id in retired {
            self.registry.remove(id);
            self.outbox.push(PeerCommand::Destroy(id));
        }
    }

    /// Capture and publish a snapshot for every owned player.
    fn publish_snapshots(&mut self) {
        for id in self.registry.owned_by(self.authority.local_peer()) {
            let Some(entity) = self.registry.get(id) else {
                continue;
            };
            let Some(snapshot) = PlayerSnapshot::capture(entity) else {
                continue;
            };
            match snapshot.encode() {
                Ok(payload) => self.outbox.push(PeerCommand::Snapshot {
                    entity: id,
                    payload,
                }),
                Err(err) => {
                    tracing::warn!(peer = %self.id(), entity = %id, %err, "snapshot encode failed");
                }
            }
        }
    }

    fn allocate_entity_id(&mut self) -> NetEntityId {
        self.next_sequence += 1;
        NetEntityId::compose(self.id(), self.next_sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EntityKind;

    fn peer(id: u32) -> Peer {
        Peer::new(PeerId(id), MatchConfig::default(), u64::from(id))
    }

    fn fire_intent() -> PlayerIntent {
        PlayerIntent {
            fire: true,
            ..PlayerIntent::default()
        }
    }

    #[test]
    fn spawn_emits_spawn_and_name_commands() {
        let mut host = peer(1);
        let id = host.spawn_local_player(Some("host".into()));
        let commands = host.tick(PlayerIntent::default(), Vec::new());

        assert!(commands
            .iter()
            .any(|c| matches!(c, PeerCommand::Spawn(e) if e.id == id)));
        assert!(commands.iter().any(|c| matches!(
            c,
            PeerCommand::Event {
                audience: Audience::AllBuffered,
                event: GameEvent::AssignName { target, .. },
            } if *target == id
        )));
        // And a snapshot for the owned player
        assert!(commands
            .iter()
            .any(|c| matches!(c, PeerCommand::Snapshot { entity, .. } if *entity == id)));
    }

    #[test]
    fn generated_names_use_the_player_number_format() {
        let mut host = peer(1);
        let id = host.spawn_local_player(None);
        let name = host.display_name(id).expect("named");
        assert!(name.starts_with("Player #"));
    }

    #[test]
    fn firing_respects_cooldown() {
        let mut host = peer(1);
        host.spawn_local_player(Some("host".into()));

        let first = host.tick(fire_intent(), Vec::new());
        let fired_first = first
            .iter()
            .filter(|c| matches!(c, PeerCommand::Spawn(e) if e.kind == EntityKind::Projectile))
            .count();
        assert_eq!(fired_first, 1);

        // Cooldown is 2 ticks by default; the immediate next tick is dry
        let second = host.tick(fire_intent(), Vec::new());
        let fired_second = second
            .iter()
            .filter(|c| matches!(c, PeerCommand::Spawn(e) if e.kind == EntityKind::Projectile))
            .count();
        assert_eq!(fired_second, 0);
    }

    #[test]
    fn replica_spawns_and_despawns() {
        let mut host = peer(1);
        let mut guest = peer(2);
        let id = guest.spawn_local_player(Some("guest".into()));
        let commands = guest.tick(PlayerIntent::default(), Vec::new());

        let spawn = commands
            .iter()
            .find_map(|c| match c {
                PeerCommand::Spawn(entity) => Some(entity.clone()),
                _ => None,
            })
            .expect("spawn command");

        host.tick(PlayerIntent::default(), vec![NetMessage::Spawn(spawn)]);
        assert!(host.registry().contains(id));

        host.tick(PlayerIntent::default(), vec![NetMessage::Destroy(id)]);
        assert!(!host.registry().contains(id));
    }

    #[test]
    fn non_owner_ignores_damage_events() {
        let mut host = peer(1);
        let mut guest = peer(2);
        let guest_player = guest.spawn_local_player(Some("guest".into()));
        let commands = guest.tick(PlayerIntent::default(), Vec::new());
        let spawn = commands
            .iter()
            .find_map(|c| match c {
                PeerCommand::Spawn(entity) => Some(entity.clone()),
                _ => None,
            })
            .unwrap();
        host.tick(PlayerIntent::default(), vec![NetMessage::Spawn(spawn)]);

        // Host receives damage addressed at guest's player: no change
        let envelope = EventEnvelope {
            seq: 1,
            sender: PeerId(1),
            audience: Audience::AllBuffered,
            event: GameEvent::Damage {
                target: guest_player,
                attacker: NetEntityId::compose(PeerId(1), 1),
                amount: 30.0,
            },
        };
        host.tick(PlayerIntent::default(), vec![NetMessage::Event(envelope)]);
        assert_eq!(host.health_ratio(guest_player), Some(1.0));
    }

    #[test]
    fn owner_applies_damage_events() {
        let mut guest = peer(2);
        let guest_player = guest.spawn_local_player(Some("guest".into()));
        guest.tick(PlayerIntent::default(), Vec::new());

        let envelope = EventEnvelope {
            seq: 1,
            sender: PeerId(1),
            audience: Audience::AllBuffered,
            event: GameEvent::Damage {
                target: guest_player,
                attacker: NetEntityId::compose(PeerId(1), 1),
                amount: 30.0,
            },
        };
        guest.tick(PlayerIntent::default(), vec![NetMessage::Event(envelope)]);
        assert_eq!(guest.health_ratio(guest_player), Some(0.7));
    }

    #[test]
    fn master_assigns_skins_to_new_players() {
        let mut host = peer(1);
        assert!(!host.is_master());
        host.promote_to_master();
        assert!(host.is_master());
        let id = host.spawn_local_player(Some("host".into()));
        let commands = host.tick(PlayerIntent::default(), Vec::new());

        let skin_event = commands.iter().find_map(|c| match c {
            PeerCommand::Event {
                event: GameEvent::AssignSkin { target, skin_index },
                ..
            } => Some((*target, *skin_index)),
            _ => None,
        });
        assert_eq!(skin_event, Some((id, 0)));
    }

    #[test]
    fn master_does_not_reassign_on_later_ticks() {
        let mut host = peer(1);
        host.promote_to_master();
        host.spawn_local_player(Some("host".into()));

        let first = host.tick(PlayerIntent::default(), Vec::new());
        // Feed the master's own skin event back, as the relay would
        let skin_events: Vec<NetMessage> = first
            .iter()
            .filter_map(|c| match c {
                PeerCommand::Event { audience, event } => Some(NetMessage::Event(EventEnvelope {
                    seq: 1,
                    sender: PeerId(1),
                    audience: *audience,
                    event: event.clone(),
                })),
                _ => None,
            })
            .collect();

        let second = host.tick(PlayerIntent::default(), skin_events);
        assert!(!second.iter().any(|c| matches!(
            c,
            PeerCommand::Event {
                event: GameEvent::AssignSkin { .. },
                ..
            }
        )));
    }

    #[test]
    fn promoted_master_honors_existing_grants() {
        let mut guest = peer(2);
        let guest_player = guest.spawn_local_player(Some("guest".into()));
        guest.tick(PlayerIntent::default(), Vec::new());

        // Skin granted by the previous master arrives as an event
        guest.tick(
            PlayerIntent::default(),
            vec![NetMessage::Event(EventEnvelope {
                seq: 1,
                sender: PeerId(1),
                audience: Audience::AllBuffered,
                event: GameEvent::AssignSkin {
                    target: guest_player,
                    skin_index: 0,
                },
            })],
        );

        guest.promote_to_master();
        // The rebuilt pool must not hand index 0 to anyone else: spawn a
        // replica without a skin and check the granted index.
        let mut other = peer(3);
        let other_player = other.spawn_local_player(Some("other".into()));
        let spawn = other
            .tick(PlayerIntent::default(), Vec::new())
            .into_iter()
            .find_map(|c| match c {
                PeerCommand::Spawn(entity) => Some(entity),
                _ => None,
            })
            .unwrap();

        let commands = guest.tick(PlayerIntent::default(), vec![NetMessage::Spawn(spawn)]);
        let granted = commands.iter().find_map(|c| match c {
            PeerCommand::Event {
                event: GameEvent::AssignSkin { target, skin_index },
                ..
            } => Some((*target, *skin_index)),
            _ => None,
        });
        assert_eq!(granted, Some((other_player, 1)));
    }

    #[test]
    fn projectiles_expire_and_destroy_network_wide() {
        let mut host = peer(1);
        host.spawn_local_player(Some("host".into()));
        host.tick(fire_intent(), Vec::new());

        let lifetime = MatchConfig::default().projectile.lifetime_ticks;
        let mut destroyed = false;
        for _ in 0..=lifetime {
            let commands = host.tick(PlayerIntent::default(), Vec::new());
            if commands
                .iter()
                .any(|c| matches!(c, PeerCommand::Destroy(_)))
            {
                destroyed = true;
                break;
            }
        }
        assert!(destroyed, "projectile never expired");
    }

    #[test]
    fn kill_award_skipped_when_attacker_is_gone() {
        let mut guest = peer(2);
        let guest_player = guest.spawn_local_player(Some("guest".into()));
        guest.tick(PlayerIntent::default(), Vec::new());

        // Attacker entity was never spawned on this peer
        let ghost = NetEntityId::compose(PeerId(9), 1);
        let envelope = EventEnvelope {
            seq: 1,
            sender: PeerId(9),
            audience: Audience::AllBuffered,
            event: GameEvent::Damage {
                target: guest_player,
                attacker: ghost,
                amount: 1_000.0,
            },
        };
        let commands = guest.tick(PlayerIntent::default(), vec![NetMessage::Event(envelope)]);

        assert!(!commands.iter().any(|c| matches!(
            c,
            PeerCommand::Event {
                event: GameEvent::AwardKill { .. },
                ..
            }
        )));
        // Victim respawned regardless
        assert_eq!(guest.health_ratio(guest_player), Some(1.0));
        assert_eq!(guest.score(guest_player), Some(0));
    }
}
