//! Named-room lobby.
//!
//! The thinnest slice of matchmaking a small shooter needs: join a room by
//! name, creating it with the given options if it does not exist yet.

use std::collections::HashMap;

use skirmish_core::components::PeerId;

use crate::error::{RelayError, Result};
use crate::room::{Room, RoomOptions};

/// Registry of named rooms.
#[derive(Debug, Default)]
pub struct Lobby {
    rooms: HashMap<String, Room>,
}

impl Lobby {
    /// Create an empty lobby.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Join `name`, creating the room with `options` if needed.
    ///
    /// Returns the joined peer's id. Join failures (full, closed) pass
    /// through from the room.
    pub fn join_or_create(&mut self, name: &str, options: RoomOptions) -> Result<PeerId> {
        let room = self
            .rooms
            .entry(name.to_owned())
            .or_insert_with(|| Room::new(name, options));
        room.join()
    }

    /// Access a room by name.
    pub fn room_mut(&mut self, name: &str) -> Result<&mut Room> {
        self.rooms
            .get_mut(name)
            .ok_or_else(|| RelayError::UnknownRoom(name.to_owned()))
    }

    /// Names of rooms flagged visible, for listing.
    #[must_use]
    pub fn visible_rooms(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rooms
            .values()
            .filter(|room| room.options().visible)
            .map(Room::name)
            .collect();
        names.sort_unstable();
        names
    }
}
