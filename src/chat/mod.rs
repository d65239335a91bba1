//! Chat module for tandem.
//!
//! This module provides the room state machine and the message relay:
//! - Room registry with deterministic room IDs
//! - Join requests and host approval
//! - Fan-out of participant messages to the rest of the room

mod manager;
mod message;
mod room;

pub use manager::RoomManager;
pub use message::RelayMessage;
pub use room::Room;
