//! Error types for the relay.

use skirmish_core::components::PeerId;
use thiserror::Error;

/// Result type alias using [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;

/// Top-level error type for room membership and delivery.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The room is at capacity.
    #[error("room '{name}' is full ({capacity} peers)")]
    RoomFull {
        /// Room name.
        name: String,
        /// Configured capacity.
        capacity: u8,
    },

    /// The room exists but is closed to new joiners.
    #[error("room '{name}' is closed")]
    RoomClosed {
        /// Room name.
        name: String,
    },

    /// The peer is not a member of this room.
    #[error("unknown peer: {0}")]
    UnknownPeer(PeerId),

    /// No room with this name exists.
    #[error("unknown room: '{0}'")]
    UnknownRoom(String),
}
