//! HTTP Server
//!
//! Composes the comment router into an application, adds request logging,
//! and serves it on a Tokio listener until a shutdown signal arrives.
//!
//! ## Request Lifecycle
//!
//! ```text
//! 1. Client connects (TCP)
//!        │
//!        ▼
//! 2. axum spawns a task per connection
//!        │
//!        ▼
//! 3. log_requests middleware starts timer
//!        │
//!        ▼
//! 4. Router nests /{mount} → comment_routes
//!        │
//!        ▼
//! 5. Handler runs one store operation
//!        │
//!        ▼
//! 6. Status recorded in RequestStats, response sent
//! ```

use crate::comments::{comment_routes, CommentRepository};
use crate::store::DocumentStore;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Request counters shared by every connection.
#[derive(Debug, Default)]
pub struct RequestStats {
    /// Total requests answered
    pub requests: AtomicU64,
    /// Requests answered with a 5xx status
    pub server_errors: AtomicU64,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, status: axum::http::StatusCode) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if status.is_server_error() {
            self.server_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn server_errors(&self) -> u64 {
        self.server_errors.load(Ordering::Relaxed)
    }
}

/// Builds the application: comment routes under `mount`, wrapped in
/// request logging.
///
/// `mount` must start with `/` and must not end with one; see
/// [`parse_mount`](crate::config::parse_mount).
pub fn build_app(store: Arc<dyn DocumentStore>, mount: &str, stats: Arc<RequestStats>) -> Router {
    let repo = CommentRepository::new(store);

    Router::new()
        .nest(mount, comment_routes(repo))
        .layer(middleware::from_fn_with_state(stats, log_requests))
}

/// Whole microseconds in `elapsed`, saturating at `u64::MAX`.
fn as_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

async fn log_requests(
    State(stats): State<Arc<RequestStats>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_us = as_micros(start.elapsed());
    stats.record(status);

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), elapsed_us, "Request failed");
    } else {
        debug!(%method, %path, status = status.as_u16(), elapsed_us, "Request served");
    }

    response
}

/// Serves `app` on `listener` until `shutdown` resolves, then drains
/// in-flight requests.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::Value;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn create_test_server(
        mount: &str,
    ) -> (SocketAddr, Arc<RequestStats>, oneshot::Sender<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stats = Arc::new(RequestStats::new());
        let app = build_app(Arc::new(MemoryStore::new()), mount, Arc::clone(&stats));

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(serve(listener, app, async {
            let _ = rx.await;
        }));

        (addr, stats, tx)
    }

    /// Sends one HTTP/1.1 request and returns (status, body).
    async fn request(addr: SocketAddr, method: &str, path: &str, body: Option<&str>) -> (u16, String) {
        let mut client = TcpStream::connect(addr).await.unwrap();

        let mut raw = format!(
            "{} {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n",
            method, path
        );
        match body {
            Some(body) => raw.push_str(&format!(
                "Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                body.len(),
                body
            )),
            None => raw.push_str("Content-Length: 0\r\n\r\n"),
        }
        client.write_all(raw.as_bytes()).await.unwrap();

        let mut response = String::new();
        let timeout = tokio::time::Duration::from_secs(2);
        tokio::time::timeout(timeout, client.read_to_string(&mut response))
            .await
            .unwrap()
            .unwrap();

        let status = response[9..12].parse().unwrap();
        let body = response
            .split_once("\r\n\r\n")
            .map(|(_, body)| body.to_string())
            .unwrap_or_default();
        (status, body)
    }

    #[test]
    fn test_as_micros_saturates() {
        assert_eq!(as_micros(Duration::from_millis(3)), 3_000);
        assert_eq!(as_micros(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_post_then_get_over_tcp() {
        let (addr, stats, _shutdown) = create_test_server("/comments").await;

        let (status, body) = request(
            addr,
            "POST",
            "/comments",
            Some(r#"{"text":"hi","author":"bob"}"#),
        )
        .await;
        assert_eq!(status, 201);
        let created: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(created["text"], "hi");
        assert_eq!(created["author"], "bob");

        let (status, body) = request(addr, "GET", "/comments", None).await;
        assert_eq!(status, 200);
        let listed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(listed, Value::Array(vec![created]));

        assert_eq!(stats.requests(), 2);
        assert_eq!(stats.server_errors(), 0);
    }

    #[tokio::test]
    async fn test_custom_mount() {
        let (addr, _, _shutdown) = create_test_server("/api/comments").await;

        let (status, body) = request(addr, "GET", "/api/comments", None).await;
        assert_eq!(status, 200);
        assert_eq!(body, "[]");

        let (status, _) = request(addr, "GET", "/comments", None).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_server_errors_counted() {
        let (addr, stats, _shutdown) = create_test_server("/comments").await;

        let (status, body) = request(addr, "DELETE", "/comments/bogus", None).await;
        assert_eq!(status, 500);
        assert_eq!(body, r#"{"error":"Failed to delete comment"}"#);
        assert_eq!(stats.server_errors(), 1);
    }

    #[tokio::test]
    async fn test_graceful_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let app = build_app(
            Arc::new(MemoryStore::new()),
            "/comments",
            Arc::new(RequestStats::new()),
        );

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, app, async {
            let _ = rx.await;
        }));

        tx.send(()).unwrap();
        let result = tokio::time::timeout(tokio::time::Duration::from_secs(2), server)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
