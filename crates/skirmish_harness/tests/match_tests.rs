//! End-to-end replication scenarios over the in-process relay.
//!
//! Each test wires real peers to a real room and drives whole ticks,
//! so events, snapshots and buffered replay all travel the same paths
//! a live match uses.

use glam::Vec3;
use skirmish_core::components::{NetEntityId, PeerId, PlayerIntent};
use skirmish_core::events::{Audience, GameEvent};
use skirmish_core::peer::{NetMessage, Peer, PeerCommand};
use skirmish_harness::scenario::yaw_toward;
use skirmish_harness::{MatchRunner, Scenario};
use skirmish_relay::{Room, RoomOptions};
use skirmish_test_utils::fixtures::test_config;

/// A room with N peers, players spawned and fully replicated.
struct TestMatch {
    room: Room,
    peers: Vec<Peer>,
}

impl TestMatch {
    fn new(count: usize) -> Self {
        let config = test_config();
        let mut room = Room::new("test", RoomOptions::default());
        let mut peers = Vec::new();
        for n in 0..count {
            let id = room.join().expect("join");
            let mut peer = Peer::new(id, config.clone(), n as u64);
            if room.master() == Some(id) {
                peer.promote_to_master();
            }
            peer.spawn_local_player(Some(format!("P{}", n + 1)));
            peers.push(peer);
        }
        let mut this = Self { room, peers };
        // Let spawns, names and skins propagate everywhere
        this.settle(4);
        this
    }

    /// Run `rounds` idle ticks across every peer.
    fn settle(&mut self, rounds: usize) {
        for _ in 0..rounds {
            self.step(&[]);
        }
    }

    /// Tick every peer once; `intents[i]` applies to peer `i` when given.
    fn step(&mut self, intents: &[(usize, PlayerIntent)]) {
        let master = self.room.master();
        for (index, peer) in self.peers.iter_mut().enumerate() {
            if master == Some(peer.id()) {
                peer.promote_to_master();
            }
            let inbox = self.room.collect(peer.id()).expect("collect");
            let intent = intents
                .iter()
                .find(|(i, _)| *i == index)
                .map_or_else(PlayerIntent::default, |(_, intent)| *intent);
            let commands = peer.tick(intent, inbox);
            self.room.publish(peer.id(), commands).expect("publish");
        }
    }

    fn player(&self, index: usize) -> NetEntityId {
        self.peers[index].local_player().expect("spawned")
    }

    /// Publish a damage event as if peer `from` resolved a hit.
    fn send_damage(&mut self, from: usize, target: NetEntityId, attacker: NetEntityId, amount: f32) {
        let sender = self.peers[from].id();
        self.room
            .publish(
                sender,
                vec![PeerCommand::Event {
                    audience: Audience::AllBuffered,
                    event: GameEvent::Damage {
                        target,
                        attacker,
                        amount,
                    },
                }],
            )
            .expect("publish damage");
    }
}

#[test]
fn damage_reduces_health_and_leaves_attacker_score_alone() {
    let mut game = TestMatch::new(2);
    let victim = game.player(1);
    let attacker = game.player(0);

    game.send_damage(0, victim, attacker, 30.0);
    game.settle(3);

    // Owner view is authoritative
    assert_eq!(game.peers[1].health_ratio(victim), Some(0.7));
    // Attacker's replica converged through snapshots
    assert_eq!(game.peers[0].health_ratio(victim), Some(0.7));
    // No kill, no points
    assert_eq!(game.peers[0].score(attacker), Some(0));
}

#[test]
fn lethal_damage_respawns_victim_and_awards_the_kill() {
    let mut game = TestMatch::new(2);
    let victim = game.player(1);
    let attacker = game.player(0);

    game.send_damage(0, victim, attacker, 90.0);
    game.settle(2);
    assert_eq!(game.peers[1].health_ratio(victim), Some(0.1));

    game.send_damage(0, victim, attacker, 20.0);
    game.settle(3);

    // Victim respawned at full health with score reset
    assert_eq!(game.peers[1].health_ratio(victim), Some(1.0));
    assert_eq!(game.peers[1].score(victim), Some(0));
    // Attacker's owner applied the kill award
    assert_eq!(game.peers[0].score(attacker), Some(100));
    // And the award replicated back to the victim's peer
    assert_eq!(game.peers[1].score(attacker), Some(100));
}

#[test]
fn self_attributed_damage_changes_nothing() {
    let mut game = TestMatch::new(2);
    let victim = game.player(1);

    game.send_damage(1, victim, victim, 50.0);
    game.settle(3);

    assert_eq!(game.peers[1].health_ratio(victim), Some(1.0));
    assert_eq!(game.peers[0].health_ratio(victim), Some(1.0));
}

#[test]
fn non_owner_mutation_attempts_have_no_observable_effect() {
    let mut game = TestMatch::new(3);
    let victim = game.player(1);
    let attacker = game.player(0);

    // Deliver the damage event only to a peer that does NOT own the
    // victim: nobody applies it.
    let bystander = game.peers[2].id();
    game.room
        .publish(
            game.peers[0].id(),
            vec![PeerCommand::Event {
                audience: Audience::Peer(bystander),
                event: GameEvent::Damage {
                    target: victim,
                    attacker,
                    amount: 60.0,
                },
            }],
        )
        .unwrap();
    game.settle(3);

    for peer in &game.peers {
        assert_eq!(peer.health_ratio(victim), Some(1.0));
    }
}

#[test]
fn late_joiner_replays_buffered_names_and_skins() {
    let mut game = TestMatch::new(2);
    let first = game.player(0);
    let second = game.player(1);

    // Third peer joins after both announcements were buffered
    let id = game.room.join().expect("join");
    let mut latecomer = Peer::new(id, test_config(), 99);
    latecomer.spawn_local_player(Some("P3".into()));
    game.peers.push(latecomer);
    game.settle(4);

    let latecomer = &game.peers[2];
    assert_eq!(latecomer.display_name(first), Some("P1"));
    assert_eq!(latecomer.display_name(second), Some("P2"));
    assert_eq!(latecomer.skin_index(first), Some(0));
    assert_eq!(latecomer.skin_index(second), Some(1));
}

#[test]
fn out_of_order_snapshots_resolve_to_last_processed() {
    // Build two snapshots of the same entity at different positions and
    // deliver them reversed: the design promises only that the last one
    // processed wins.
    let config = test_config();
    let mut owner = Peer::new(PeerId(1), config.clone(), 1);
    let entity = owner.spawn_local_player(Some("mover".into()));

    let spawn = owner
        .tick(PlayerIntent::default(), Vec::new())
        .into_iter()
        .find_map(|c| match c {
            PeerCommand::Spawn(e) => Some(e),
            _ => None,
        })
        .expect("spawn command");

    let snapshot_at = |x: f32| {
        let mut entity = spawn.clone();
        entity.transform.position = Vec3::new(x, 0.0, 0.0);
        skirmish_core::snapshot::PlayerSnapshot::capture(&entity)
            .unwrap()
            .encode()
            .unwrap()
    };
    let earlier = snapshot_at(1.0);
    let later = snapshot_at(2.0);

    let mut observer = Peer::new(PeerId(2), config, 2);
    observer.tick(
        PlayerIntent::default(),
        vec![
            NetMessage::Spawn(spawn),
            NetMessage::Snapshot {
                entity,
                payload: later,
            },
            NetMessage::Snapshot {
                entity,
                payload: earlier,
            },
        ],
    );

    let replica = observer.registry().get(entity).expect("replica");
    assert_eq!(replica.transform.position.x, 1.0);
}

#[test]
fn skin_indices_stay_unique_across_simultaneous_joins() {
    let game = TestMatch::new(4);

    // Read every player's skin from the master's view
    let master = &game.peers[0];
    let mut skins: Vec<u8> = (0..4)
        .map(|n| master.skin_index(game.player(n)).expect("assigned"))
        .collect();
    skins.sort_unstable();
    skins.dedup();
    assert_eq!(skins.len(), 4, "duplicate skin assignment");
}

#[test]
fn projectiles_cross_the_wire_and_damage_on_contact() {
    let mut game = TestMatch::new(2);
    let shooter_entity = game.player(0);
    let victim = game.player(1);

    let mut hit = false;
    for _ in 0..100 {
        // Shooter aims at its replica of the victim and holds fire
        let (from, to) = {
            let shooter = &game.peers[0];
            let own = shooter.registry().get(shooter_entity).unwrap();
            let target = shooter.registry().get(victim).unwrap();
            (own.transform.position, target.transform.position)
        };
        let intent = PlayerIntent {
            yaw: yaw_toward(from, to),
            fire: true,
            ..PlayerIntent::default()
        };
        game.step(&[(0, intent)]);

        if game.peers[1]
            .health_ratio(victim)
            .is_some_and(|ratio| ratio < 1.0)
        {
            hit = true;
            break;
        }
    }
    assert!(hit, "no projectile ever connected");

    // Damage arrived in projectile-sized bites
    let ratio = game.peers[1].health_ratio(victim).unwrap();
    assert!((ratio * 100.0) % 20.0 < 1e-3 || ratio == 1.0);

    // With the trigger released, every in-flight projectile hits or
    // expires and the owner's destroys reach every replica.
    game.settle(65);
    for peer in &game.peers {
        assert!(peer.registry().iter().all(|entity| entity.projectile.is_none()));
    }
}

#[test]
fn leaving_peer_is_cleaned_up_and_master_moves_on() {
    let mut game = TestMatch::new(3);
    let first = game.player(0);

    let leaver = game.peers[0].id();
    let outcome = game.room.leave(leaver).expect("leave");
    assert_eq!(outcome.destroyed, vec![first]);
    assert_eq!(outcome.new_master, Some(game.peers[1].id()));
    game.peers.remove(0);
    game.settle(3);

    // Remaining peers dropped the replica
    for peer in &game.peers {
        assert!(!peer.registry().contains(first));
    }

    // The freed skin goes to the next joiner
    let id = game.room.join().expect("join");
    let mut newcomer = Peer::new(id, test_config(), 42);
    newcomer.spawn_local_player(Some("P4".into()));
    game.peers.push(newcomer);
    game.settle(4);

    let newcomer_entity = game.peers[2].local_player().unwrap();
    assert_eq!(game.peers[2].skin_index(newcomer_entity), Some(0));
}

#[test]
fn scripted_match_produces_a_coherent_report() {
    let scenario = Scenario {
        bots: 2,
        ticks: 400,
        late_join_tick: Some(100),
        seed: 7,
        ..Scenario::default()
    };
    let report = MatchRunner::new(scenario, test_config())
        .expect("runner")
        .run()
        .expect("match");

    assert_eq!(report.players.len(), 3);
    // Everyone got named and skinned
    for player in &report.players {
        assert!(!player.name.is_empty());
        assert!(player.skin_index.is_some());
        assert!(player.health_ratio >= 0.0 && player.health_ratio <= 1.0);
    }
    // Bots shoot on sight, so the wire saw traffic
    assert!(report.wire.snapshots > 0);
    assert!(report.wire.events > 0);
    assert!(report.players.iter().any(|p| p.shots_fired > 0));

    // Scores only come from kill awards, in kill-constant multiples
    for player in &report.players {
        assert_eq!(player.score % 100, 0);
    }

    // The report serializes
    assert!(report.to_json_string().is_ok());
}
