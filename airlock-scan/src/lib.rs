//! AirLock Scan - the guarded NFC unlock flow
//!
//! One scan attempt is: acquire the platform NFC reader, wait for the
//! tag-detected event, release the reader, then send the open command to the
//! controller. The session owns the state machine for that flow and
//! guarantees the reader is released on every exit path.

mod nfc;
mod session;

pub use nfc::{NfcError, NfcReader, Tag};
pub use session::{SUCCESS_LINGER, ScanError, ScanSession, ScanState};
