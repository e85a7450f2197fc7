//! The match runner.
//!
//! Drives N bot peers over the in-process relay, one cooperative tick
//! at a time: collect each peer's inbox, compute its bot intent, tick
//! it, publish its commands. Mastership follows the room's designation
//! every tick, so a mid-match master leave would be picked up here too.

use std::collections::HashMap;

use skirmish_core::components::{EntityKind, NetEntityId, PeerId};
use skirmish_core::config::MatchConfig;
use skirmish_core::events::GameEvent;
use skirmish_core::peer::{Peer, PeerCommand};
use skirmish_relay::{Room, RoomOptions};

use crate::error::Result;
use crate::report::{MatchReport, PlayerReport, WireTotals};
use crate::scenario::{bot_intent, Scenario};

/// Runs one headless match to completion.
#[derive(Debug)]
pub struct MatchRunner {
    scenario: Scenario,
    config: MatchConfig,
    room: Room,
    peers: Vec<Peer>,
    wire: WireTotals,
    kills: HashMap<NetEntityId, u32>,
    shots: HashMap<PeerId, u32>,
}

impl MatchRunner {
    /// Create a runner for `scenario` with the given match config.
    pub fn new(scenario: Scenario, config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            room: Room::new(scenario.room.clone(), RoomOptions::default()),
            scenario,
            config,
            peers: Vec::new(),
            wire: WireTotals::default(),
            kills: HashMap::new(),
            shots: HashMap::new(),
        })
    }

    /// Run the match and produce a report.
    pub fn run(mut self) -> Result<MatchReport> {
        for n in 0..self.scenario.bots {
            self.join_bot(format!("Bot {}", n + 1))?;
        }

        for tick in 0..self.scenario.ticks {
            if self.scenario.late_join_tick == Some(tick) {
                self.join_bot("Latecomer".to_owned())?;
            }
            self.step()?;
        }

        Ok(self.into_report())
    }

    /// Advance every peer by one tick. Exposed for tests that want to
    /// interleave their own traffic.
    pub fn step(&mut self) -> Result<()> {
        let master = self.room.master();
        for peer in &mut self.peers {
            if master == Some(peer.id()) {
                peer.promote_to_master();
            }
            let inbox = self.room.collect(peer.id())?;
            let intent = bot_intent(peer);
            let commands = peer.tick(intent, inbox);
            record_wire(
                &mut self.wire,
                &mut self.kills,
                &mut self.shots,
                peer.id(),
                &commands,
            );
            self.room.publish(peer.id(), commands)?;
        }
        Ok(())
    }

    /// The peers, for inspection in tests.
    #[must_use]
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    fn join_bot(&mut self, name: String) -> Result<()> {
        let id = self.room.join()?;
        let mut peer = Peer::new(id, self.config.clone(), self.scenario.seed ^ u64::from(id.0));
        if self.room.master() == Some(id) {
            peer.promote_to_master();
        }
        peer.spawn_local_player(Some(name));
        self.peers.push(peer);
        Ok(())
    }

    fn into_report(self) -> MatchReport {
        let players = self
            .peers
            .iter()
            .filter_map(|peer| {
                let entity = peer.local_player()?;
                Some(PlayerReport {
                    peer: peer.id().0,
                    entity: entity.0,
                    name: peer.display_name(entity).unwrap_or_default().to_owned(),
                    skin_index: peer.skin_index(entity),
                    score: peer.score(entity).unwrap_or(0),
                    health_ratio: peer.health_ratio(entity).unwrap_or(0.0),
                    kills: self.kills.get(&entity).copied().unwrap_or(0),
                    shots_fired: self.shots.get(&peer.id()).copied().unwrap_or(0),
                })
            })
            .collect();

        MatchReport {
            room: self.scenario.room,
            ticks: self.scenario.ticks,
            bots: self.scenario.bots,
            late_join_tick: self.scenario.late_join_tick,
            players,
            wire: self.wire,
        }
    }
}

/// Tally what a peer just put on the wire.
fn record_wire(
    wire: &mut WireTotals,
    kills: &mut HashMap<NetEntityId, u32>,
    shots: &mut HashMap<PeerId, u32>,
    sender: PeerId,
    commands: &[PeerCommand],
) {
    for command in commands {
        match command {
            PeerCommand::Spawn(entity) => {
                wire.spawns += 1;
                if entity.kind == EntityKind::Projectile {
                    *shots.entry(sender).or_insert(0) += 1;
                }
            }
            PeerCommand::Destroy(_) => wire.destroys += 1,
            PeerCommand::Event { event, .. } => {
                wire.events += 1;
                if let GameEvent::AwardKill { target, .. } = event {
                    *kills.entry(*target).or_insert(0) += 1;
                }
            }
            PeerCommand::Snapshot { .. } => wire.snapshots += 1,
        }
    }
}
