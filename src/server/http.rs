use crate::kernel::Kernel;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// How long a client may take to deliver its request body.
pub const IO_TIMEOUT: Duration = Duration::from_secs(30);
/// Cap on a request body; a cell is source text, not a data upload.
pub const MAX_BODY_BYTES: usize = 16 << 20;

/// The kernel behind the HTTP front end. Submissions take the lock on a
/// blocking thread, so only one runs at a time.
pub type SharedKernel = Arc<Mutex<Kernel>>;

/// Every method and path lands on the same submission handler.
pub fn router(kernel: SharedKernel) -> Router {
    Router::new().fallback(submit).with_state(kernel)
}

fn plain(status: StatusCode, body: impl Into<Vec<u8>>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body.into(),
    )
        .into_response()
}

async fn submit(State(kernel): State<SharedKernel>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > MAX_BODY_BYTES) {
        warn!(%method, %path, "request body too large");
        return plain(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("request body exceeds {} bytes", MAX_BODY_BYTES),
        );
    }

    // hyper has already undone any chunked transfer coding here.
    let body = match timeout(IO_TIMEOUT, to_bytes(request.into_body(), MAX_BODY_BYTES)).await {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            warn!(%method, %path, error = %e, "rejecting request");
            return plain(
                StatusCode::BAD_REQUEST,
                format!("cannot read request body: {}", e),
            );
        }
        Err(_) => {
            warn!(%method, %path, "request body timed out");
            return plain(StatusCode::REQUEST_TIMEOUT, "request body not received in time");
        }
    };
    debug!(%method, %path, bytes = body.len(), "request");

    let handled = tokio::task::spawn_blocking(move || {
        let mut kernel = kernel
            .lock()
            .map_err(|e| format!("kernel unavailable: {}", e))?;
        Ok::<_, String>(kernel.handle(&body))
    })
    .await;

    match handled {
        Ok(Ok(reply)) => plain(StatusCode::OK, reply.body),
        Ok(Err(msg)) => {
            warn!(error = %msg, "submission dropped");
            plain(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
        Err(e) => {
            warn!(error = %e, "submission task failed");
            plain(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("submission failed: {}", e),
            )
        }
    }
}

/// HTTP front end around one [`Kernel`].
pub struct KernelServer {
    listener: TcpListener,
    kernel: SharedKernel,
}

impl KernelServer {
    pub async fn bind(addr: SocketAddr, kernel: Kernel) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            kernel: Arc::new(Mutex::new(kernel)),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle on the served kernel, e.g. to inspect the store in tests.
    pub fn kernel(&self) -> SharedKernel {
        Arc::clone(&self.kernel)
    }

    /// Serve until the listener fails.
    pub async fn serve(self) -> io::Result<()> {
        info!(addr = %self.local_addr()?, "kernel listening");
        axum::serve(self.listener, router(self.kernel)).await
    }
}
