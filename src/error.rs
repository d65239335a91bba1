//! Error types for tandem.

use thiserror::Error;

/// Common error type for tandem.
#[derive(Error, Debug)]
pub enum TandemError {
    /// No room is registered under the given ID.
    #[error("Room not found")]
    RoomNotFound,

    /// The nickname has no pending join request in the room.
    #[error("Guest request not found")]
    GuestRequestNotFound,

    /// The nickname has not been approved by the host.
    #[error("Guest not approved")]
    GuestNotApproved,

    /// Relay attach refused because the username is neither the host nor approved.
    #[error("{0} is not allowed to join this room")]
    NotApproved(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for tandem operations.
pub type Result<T> = std::result::Result<T, TandemError>;
