//! Platform NFC seam

/// A credential read by the platform radio.
#[derive(Debug, Clone)]
pub struct Tag {
    /// Platform tag identifier, when the stack exposes one.
    pub id: Option<String>,
}

/// Why a read produced no tag. Every variant's `Display` is shown to the
/// renter as-is, except `Cancelled` which is swallowed silently.
#[derive(thiserror::Error, Debug)]
pub enum NfcError {
    /// The hardware has no NFC radio. Terminal for this device.
    #[error("NFC is not supported on this device")]
    Unsupported,
    /// The renter backed out of the read. Not a failure.
    #[error("NFC scan cancelled")]
    Cancelled,
    #[error("Failed to scan NFC tag: {0}")]
    Read(String),
}

/// The platform NFC reader.
///
/// `read_tag` acquires the radio and parks until a tag is tapped. `release`
/// must run on every exit path - success, error, cancel, or screen exit -
/// or the radio stays stuck in listening mode. It must be safe to call
/// repeatedly, including when nothing was acquired.
#[allow(async_fn_in_trait)]
pub trait NfcReader {
    async fn read_tag(&mut self) -> Result<Tag, NfcError>;
    async fn release(&mut self);
}
