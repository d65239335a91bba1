//! tandem - host-approved chat rooms
//!
//! Hosts create rooms, guests ask to join, the host approves them, and
//! everyone connected to a room exchanges text over a WebSocket relay.

pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod web;

pub use chat::{RelayMessage, Room, RoomManager};
pub use config::Config;
pub use error::{Result, TandemError};
pub use web::WebServer;
