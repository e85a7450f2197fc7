//! # Skirmish Relay
//!
//! In-process stand-in for the managed relay the core rides on.
//!
//! The core only asks two things of its transport: reliable events are
//! delivered in order (with buffered replay for late joiners), and
//! snapshots are latest-wins with acceptable loss. This crate provides
//! exactly those contracts over in-memory queues, plus the room
//! membership model around them: named rooms with capacity and
//! visibility options, and a designated master peer for room-wide
//! decisions.
//!
//! Being in-process is the point: every peer of a match runs in one
//! test or harness process, messages queue between ticks, and the
//! cooperative scheduling model of the core is preserved exactly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod lobby;
pub mod room;

pub use error::{RelayError, Result};
pub use lobby::Lobby;
pub use room::{LeaveOutcome, Room, RoomOptions};
