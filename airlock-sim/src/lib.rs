//! Simulated lock-box controller
//!
//! Serves the same HTTP surface as the real hardware: `GET /open` unlocks,
//! `GET /status` reports state. A failure mode and an artificial response
//! delay are configurable so clients can exercise their rejection and
//! timeout paths against a real listener.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub type HttpResult<E = std::io::Error> = Result<HttpResponse, E>;

pub type HttpResponse =
    hyper::Response<http_body_util::combinators::BoxBody<hyper::body::Bytes, std::io::Error>>;

/// Behaviour knobs for the simulated controller.
#[derive(Debug, Clone, Default)]
pub struct SimConfig {
    /// Respond 503 to `/open`, as a jammed lock would.
    pub fail_open: bool,
    /// Sleep this long before answering any request.
    pub delay: Option<Duration>,
}

struct SimState {
    config: SimConfig,
    locked: AtomicBool,
    open_count: AtomicU64,
    started: Instant,
}

/// Accept connections forever, answering the controller API on each.
pub async fn serve(listener: tokio::net::TcpListener, config: SimConfig) -> std::io::Result<()> {
    let state = Arc::new(SimState {
        config,
        locked: AtomicBool::new(true),
        open_count: AtomicU64::new(0),
        started: Instant::now(),
    });
    loop {
        match listener.accept().await {
            Ok((stream, _addr)) => {
                tokio::task::spawn(handle_connection(stream, state.clone()));
            }
            Err(e) => {
                eprintln!("failed to accept: {e:?}");
                continue;
            }
        }
    }
}

async fn handle_connection(stream: tokio::net::TcpStream, state: Arc<SimState>) {
    let io = hyper_util::rt::TokioIo::new(stream);
    let builder =
        hyper_util::server::conn::auto::Builder::new(hyper_util::rt::tokio::TokioExecutor::new());
    if let Err(e) = builder
        .serve_connection(
            io,
            hyper::service::service_fn(|r| handle_request(r, state.clone())),
        )
        .await
    {
        eprintln!("connection error: {e:?}");
    }
}

async fn handle_request(
    r: hyper::Request<hyper::body::Incoming>,
    state: Arc<SimState>,
) -> HttpResult {
    if let Some(delay) = state.config.delay {
        tokio::time::sleep(delay).await;
    }
    match r.uri().path() {
        "/open" => handle_open(&state),
        "/status" => handle_status(&state),
        t => not_found(format!("not found: {t}")),
    }
}

fn handle_open(state: &SimState) -> HttpResult {
    if state.config.fail_open {
        return bytes_to_resp(
            b"lock jammed".to_vec(),
            hyper::StatusCode::SERVICE_UNAVAILABLE,
        );
    }
    state.locked.store(false, Ordering::SeqCst);
    state.open_count.fetch_add(1, Ordering::SeqCst);
    json(serde_json::json!({ "message": "Lock opened" }))
}

fn handle_status(state: &SimState) -> HttpResult {
    json(serde_json::json!({
        "locked": state.locked.load(Ordering::SeqCst),
        "open_count": state.open_count.load(Ordering::SeqCst),
        "uptime_secs": state.started.elapsed().as_secs(),
    }))
}

pub fn json<T: serde::Serialize>(o: T) -> HttpResult {
    let bytes = match serde_json::to_vec(&o) {
        Ok(v) => v,
        Err(e) => {
            return bytes_to_resp(
                format!("failed to serialize json: {e:?}").into_bytes(),
                hyper::StatusCode::INTERNAL_SERVER_ERROR,
            );
        }
    };
    bytes_to_resp(bytes, hyper::StatusCode::OK)
}

pub fn not_found(m: String) -> HttpResult {
    bytes_to_resp(m.into_bytes(), hyper::StatusCode::NOT_FOUND)
}

pub fn bytes_to_resp(bytes: Vec<u8>, status: hyper::StatusCode) -> HttpResult {
    use http_body_util::BodyExt;

    let mut r = hyper::Response::new(
        http_body_util::Full::new(hyper::body::Bytes::from(bytes))
            .map_err(|e| match e {})
            .boxed(),
    );
    *r.status_mut() = status;
    Ok(r)
}
