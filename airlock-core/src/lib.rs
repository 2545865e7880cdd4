//! AirLock Core - domain types and access rules for the key-box clients
//!
//! This crate holds everything the AirLock clients share: the booking and
//! property types the backend exchanges, the access window gate that decides
//! whether an NFC scan attempt is permitted right now, and the backend store
//! abstraction the screens pull bookings through.

mod booking;
mod gate;
mod store;

pub use booking::{Booking, BookingStatus, DeviceAddress, Property, classify_bookings};
pub use gate::{SCAN_LEEWAY_HOURS, countdown, scan_window_open};
pub use store::{BookingStore, MemoryStore, StoreError};
