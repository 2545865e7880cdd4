//! Lock command client - bounded-timeout HTTP commands
//!
//! One GET per command, one hard deadline, no retries. Retrying is always
//! safe (the controller treats commands idempotently) but belongs to the
//! caller, not here.

use std::time::Duration;

use http_body_util::BodyExt;

/// Hard deadline for a single command round-trip.
pub const COMMAND_TIMEOUT: Duration = Duration::from_millis(5000);

/// Command path that unlocks the key box.
pub const OPEN_PATH: &str = "/open";

/// Command path that reports controller health/state.
pub const STATUS_PATH: &str = "/status";

/// How a command failed. Every variant's `Display` is suitable for showing
/// to the renter directly.
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    /// No response within the deadline. The in-flight request is dropped;
    /// a late response cannot affect anything.
    #[error("Request timed out. Please check lock device connection.")]
    Timeout,
    /// The controller was reachable but refused the command. `message` is
    /// the device-provided text when present, else a generic line naming the
    /// status code.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// DNS/connect failure, malformed response body, or any other
    /// network-layer fault.
    #[error("Failed to communicate with lock device: {0}")]
    Transport(String),
}

/// Payload of a successful command.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct CommandReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommandReply {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

type HttpClient = hyper_util::client::legacy::Client<
    hyper_util::client::legacy::connect::HttpConnector,
    http_body_util::Empty<hyper::body::Bytes>,
>;

/// Client for the controller's command API.
pub struct LockClient {
    http: HttpClient,
    timeout: Duration,
}

impl LockClient {
    pub fn new() -> Self {
        Self::with_timeout(COMMAND_TIMEOUT)
    }

    /// `timeout` must be positive; only tests have a reason to shrink it.
    pub fn with_timeout(timeout: Duration) -> Self {
        debug_assert!(!timeout.is_zero());
        let http = hyper_util::client::legacy::Client::builder(
            hyper_util::rt::TokioExecutor::new(),
        )
        .build_http();
        Self { http, timeout }
    }

    /// Unlock the key box.
    pub async fn open(&self, base_url: &str) -> Result<CommandReply, CommandError> {
        let body = self.send(base_url, OPEN_PATH).await?;
        serde_json::from_slice(&body)
            .map_err(|e| CommandError::Transport(format!("malformed device response: {e}")))
    }

    /// Fetch the controller's health/state report.
    pub async fn status(&self, base_url: &str) -> Result<serde_json::Value, CommandError> {
        let body = self.send(base_url, STATUS_PATH).await?;
        serde_json::from_slice(&body)
            .map_err(|e| CommandError::Transport(format!("malformed device response: {e}")))
    }

    /// Issue one GET against `base_url + path` and classify the outcome.
    /// The whole round-trip, body included, must finish within the deadline.
    pub async fn send(
        &self,
        base_url: &str,
        path: &str,
    ) -> Result<hyper::body::Bytes, CommandError> {
        let uri: hyper::Uri = format!("{base_url}{path}")
            .parse()
            .map_err(|e| CommandError::Transport(format!("invalid device url: {e}")))?;
        let request = hyper::Request::builder()
            .method(hyper::Method::GET)
            .uri(uri)
            .header(hyper::header::CONTENT_TYPE, "application/json")
            .body(http_body_util::Empty::new())
            .map_err(|e| CommandError::Transport(format!("failed to build request: {e}")))?;

        let round_trip = async {
            let response = self
                .http
                .request(request)
                .await
                .map_err(|e| CommandError::Transport(e.to_string()))?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| CommandError::Transport(e.to_string()))?
                .to_bytes();
            Ok::<_, CommandError>((status, body))
        };

        let (status, body) = match tokio::time::timeout(self.timeout, round_trip).await {
            Ok(result) => result?,
            Err(_) => return Err(CommandError::Timeout),
        };

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            let message = if text.is_empty() {
                format!("Lock device responded with status {}", status.as_u16())
            } else {
                text
            };
            return Err(CommandError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

impl Default for LockClient {
    fn default() -> Self {
        Self::new()
    }
}
