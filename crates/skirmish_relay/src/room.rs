//! A single room and its message plumbing.
//!
//! The room provides the two delivery contracts the core depends on:
//!
//! - **Reliable events**: a totally ordered per-room stream. Events sent
//!   to `AllBuffered` are retained and replayed, in order, to peers that
//!   join later; the buffered state of a destroyed entity is dropped.
//! - **Snapshots**: unreliable fan-out through bounded per-peer queues.
//!   When a queue is full the oldest snapshot is discarded; the next
//!   tick's snapshot supersedes it anyway.
//!
//! Spawn commands are buffered alongside events so a late joiner
//! materializes every existing entity before replaying its events.

use std::collections::{HashMap, VecDeque};

use skirmish_core::components::{NetEntityId, PeerId};
use skirmish_core::events::{Audience, EventEnvelope};
use skirmish_core::peer::{NetMessage, PeerCommand};

use crate::error::{RelayError, Result};

/// Per-peer cap on queued snapshot messages.
const SNAPSHOT_QUEUE_LIMIT: usize = 256;

/// Options for creating a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomOptions {
    /// Maximum number of peers.
    pub max_peers: u8,
    /// Whether new peers may join.
    pub open: bool,
    /// Whether the room shows up in lobby listings.
    pub visible: bool,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self {
            max_peers: 8,
            open: true,
            visible: true,
        }
    }
}

/// What happened when a peer left.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveOutcome {
    /// Entities of the leaving peer that were destroyed room-wide.
    pub destroyed: Vec<NetEntityId>,
    /// The master after the departure, if anyone is left.
    pub new_master: Option<PeerId>,
}

/// A room full of peers exchanging events and snapshots.
#[derive(Debug)]
pub struct Room {
    name: String,
    options: RoomOptions,
    /// Members in join order; the first is the master.
    peers: Vec<PeerId>,
    next_peer: u32,
    next_seq: u64,
    /// Replayed to late joiners, in insertion order.
    buffered: Vec<NetMessage>,
    inboxes: HashMap<PeerId, VecDeque<NetMessage>>,
}

impl Room {
    /// Create an empty room.
    #[must_use]
    pub fn new(name: impl Into<String>, options: RoomOptions) -> Self {
        Self {
            name: name.into(),
            options,
            peers: Vec::new(),
            next_peer: 0,
            next_seq: 0,
            buffered: Vec::new(),
            inboxes: HashMap::new(),
        }
    }

    /// Room name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Room options.
    #[must_use]
    pub const fn options(&self) -> RoomOptions {
        self.options
    }

    /// Current member count.
    #[must_use]
    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// The current master peer, if the room is not empty.
    ///
    /// The master is the longest-connected member. It makes room-wide
    /// decisions such as skin allocation.
    #[must_use]
    pub fn master(&self) -> Option<PeerId> {
        self.peers.first().copied()
    }

    /// Join the room, receiving a fresh peer id.
    ///
    /// Everything buffered so far (spawns, then the events that follow
    /// them in stream order) is queued for the new peer before any live
    /// traffic.
    pub fn join(&mut self) -> Result<PeerId> {
        if !self.options.open {
            return Err(RelayError::RoomClosed {
                name: self.name.clone(),
            });
        }
        if self.peers.len() >= usize::from(self.options.max_peers) {
            return Err(RelayError::RoomFull {
                name: self.name.clone(),
                capacity: self.options.max_peers,
            });
        }

        self.next_peer += 1;
        let peer = PeerId(self.next_peer);
        self.peers.push(peer);

        let replay: VecDeque<NetMessage> = self.buffered.iter().cloned().collect();
        tracing::info!(
            room = %self.name,
            %peer,
            replayed = replay.len(),
            "peer joined"
        );
        self.inboxes.insert(peer, replay);
        Ok(peer)
    }

    /// Leave the room.
    ///
    /// The leaving peer's entities (the ones with buffered spawns) are
    /// destroyed room-wide, its buffered state dropped, and the master
    /// reassigned if needed.
    pub fn leave(&mut self, peer: PeerId) -> Result<LeaveOutcome> {
        let index = self
            .peers
            .iter()
            .position(|&member| member == peer)
            .ok_or(RelayError::UnknownPeer(peer))?;
        self.peers.remove(index);
        self.inboxes.remove(&peer);

        let destroyed: Vec<NetEntityId> = self
            .buffered
            .iter()
            .filter_map(|message| match message {
                NetMessage::Spawn(entity) if entity.owner == peer => Some(entity.id),
                _ => None,
            })
            .collect();
        for &id in &destroyed {
            self.purge_entity(id);
            self.deliver_to_all_except(peer, NetMessage::Destroy(id));
        }

        let new_master = self.master();
        tracing::info!(room = %self.name, %peer, ?new_master, "peer left");
        Ok(LeaveOutcome {
            destroyed,
            new_master,
        })
    }

    /// Accept one tick's worth of commands from `sender`.
    pub fn publish(&mut self, sender: PeerId, commands: Vec<PeerCommand>) -> Result<()> {
        if !self.peers.contains(&sender) {
            return Err(RelayError::UnknownPeer(sender));
        }
        for command in commands {
            match command {
                PeerCommand::Spawn(entity) => {
                    let message = NetMessage::Spawn(entity);
                    self.buffered.push(message.clone());
                    self.deliver_to_all_except(sender, message);
                }
                PeerCommand::Destroy(id) => {
                    self.purge_entity(id);
                    self.deliver_to_all_except(sender, NetMessage::Destroy(id));
                }
                PeerCommand::Event { audience, event } => {
                    self.next_seq += 1;
                    let envelope = EventEnvelope {
                        seq: self.next_seq,
                        sender,
                        audience,
                        event,
                    };
                    match audience {
                        Audience::AllBuffered => {
                            self.buffered.push(NetMessage::Event(envelope.clone()));
                            // Senders hear their own events back
                            self.deliver_to_all(NetMessage::Event(envelope));
                        }
                        Audience::Peer(target) => {
                            self.deliver_to(target, NetMessage::Event(envelope));
                        }
                    }
                }
                PeerCommand::Snapshot { entity, payload } => {
                    self.deliver_snapshot_except(sender, entity, payload);
                }
            }
        }
        Ok(())
    }

    /// Drain everything queued for `peer` since its last collect.
    pub fn collect(&mut self, peer: PeerId) -> Result<Vec<NetMessage>> {
        let inbox = self
            .inboxes
            .get_mut(&peer)
            .ok_or(RelayError::UnknownPeer(peer))?;
        Ok(inbox.drain(..).collect())
    }

    /// Drop an entity's buffered spawn and buffered events.
    fn purge_entity(&mut self, id: NetEntityId) {
        self.buffered.retain(|message| match message {
            NetMessage::Spawn(entity) => entity.id != id,
            NetMessage::Event(envelope) => envelope.event.target() != id,
            _ => true,
        });
    }

    fn deliver_to(&mut self, peer: PeerId, message: NetMessage) {
        if let Some(inbox) = self.inboxes.get_mut(&peer) {
            inbox.push_back(message);
        } else {
            tracing::debug!(room = %self.name, %peer, "dropping message for absent peer");
        }
    }

    fn deliver_to_all(&mut self, message: NetMessage) {
        for peer in self.peers.clone() {
            self.deliver_to(peer, message.clone());
        }
    }

    fn deliver_to_all_except(&mut self, sender: PeerId, message: NetMessage) {
        for peer in self.peers.clone() {
            if peer != sender {
                self.deliver_to(peer, message.clone());
            }
        }
    }

    /// Unreliable delivery: bounded queue, oldest snapshot dropped on
    /// overflow.
    fn deliver_snapshot_except(&mut self, sender: PeerId, entity: NetEntityId, payload: Vec<u8>) {
        for peer in self.peers.clone() {
            if peer == sender {
                continue;
            }
            let Some(inbox) = self.inboxes.get_mut(&peer) else {
                continue;
            };
            let queued = inbox
                .iter()
                .filter(|message| matches!(message, NetMessage::Snapshot { .. }))
                .count();
            if queued >= SNAPSHOT_QUEUE_LIMIT {
                if let Some(oldest) = inbox
                    .iter()
                    .position(|message| matches!(message, NetMessage::Snapshot { .. }))
                {
                    inbox.remove(oldest);
                }
            }
            inbox.push_back(NetMessage::Snapshot {
                entity,
                payload: payload.clone(),
            });
        }
    }
}
