//! WebSocket module for the message relay.

pub mod relay;

pub use relay::relay_ws_handler;
