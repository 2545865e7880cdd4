//! AirLock Device - talking to the lock-box controller
//!
//! The controller is a LAN-connected unit with a tiny plaintext HTTP API:
//! `GET /open` unlocks the key box, `GET /status` reports its state. This
//! crate resolves the controller's base URL from property configuration and
//! issues bounded-timeout commands against it.

mod client;
mod locator;

pub use client::{
    COMMAND_TIMEOUT, CommandError, CommandReply, LockClient, OPEN_PATH, STATUS_PATH,
};
pub use locator::{DEFAULT_DEVICE_ADDR, DEVICE_PORT, base_url, default_address};
