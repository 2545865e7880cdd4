//! Scan session state machine
//!
//! `ready -> scanning -> success | error`, with `error -> ready` on retry
//! and a silent `scanning -> ready` when the renter cancels the read.

use std::time::Duration;

use airlock_device::LockClient;

use crate::{NfcError, NfcReader};

/// How long the success screen lingers before navigating away.
pub const SUCCESS_LINGER: Duration = Duration::from_secs(2);

const DEFAULT_OPEN_MESSAGE: &str = "Lock opened successfully";

/// State of a single unlock attempt. Payload-carrying variants make the
/// invalid combinations (an error with no message) unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    Ready,
    Scanning,
    Success { message: String },
    Error { message: String },
}

#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// `attempt` called outside `Ready`; the trigger must stay disabled
    /// while a scan is in flight.
    #[error("a scan attempt is already in progress")]
    Busy,
}

/// One screen's unlock flow: the NFC reader, the command client, and the
/// resolved controller URL, driving the [`ScanState`] machine.
pub struct ScanSession<R: NfcReader> {
    reader: R,
    client: LockClient,
    base_url: String,
    state: ScanState,
}

impl<R: NfcReader> ScanSession<R> {
    pub fn new(reader: R, client: LockClient, base_url: String) -> Self {
        Self {
            reader,
            client,
            base_url,
            state: ScanState::Ready,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run one full unlock attempt. The reader is released before any state
    /// transition completes, whatever the outcome. Once the open command is
    /// dispatched it runs to completion or timeout - unlocking is a physical
    /// side effect that must not be aborted mid-flight.
    pub async fn attempt(&mut self) -> Result<&ScanState, ScanError> {
        if self.state != ScanState::Ready {
            return Err(ScanError::Busy);
        }
        self.state = ScanState::Scanning;

        let read = self.reader.read_tag().await;
        self.reader.release().await;

        match read {
            Ok(_tag) => {}
            Err(NfcError::Cancelled) => {
                // Renter-initiated, not a failure: back to ready silently.
                self.state = ScanState::Ready;
                return Ok(&self.state);
            }
            Err(e) => {
                self.state = ScanState::Error {
                    message: e.to_string(),
                };
                return Ok(&self.state);
            }
        }

        self.state = match self.client.open(&self.base_url).await {
            Ok(reply) => ScanState::Success {
                message: reply.message_or(DEFAULT_OPEN_MESSAGE),
            },
            Err(e) => ScanState::Error {
                message: e.to_string(),
            },
        };
        Ok(&self.state)
    }

    /// `error -> ready`. No-op from any other state.
    pub fn retry(&mut self) {
        if matches!(self.state, ScanState::Error { .. }) {
            self.state = ScanState::Ready;
        }
    }

    /// Screen exit: release the reader whatever state we are in.
    pub async fn close(mut self) {
        self.reader.release().await;
    }
}
