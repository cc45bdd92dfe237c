//! Disposable HTTP server for rendering previews
//!
//! This server is NOT a daemon. It:
//! - Starts on a random port
//! - Serves one HTML document
//! - Shuts down after the browser fetched it, the timeout passed, or the
//!   caller finished with it

use crate::{Result, VisionError};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Response, Server};
use tracing::{debug, warn};

/// Disposable server that serves a single HTML document
pub struct RenderServer {
    server: Arc<Server>,
    port: u16,
    html_content: String,
}

impl RenderServer {
    /// Create a new server on a random available port
    pub fn new(html_content: String) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();

        let server = Server::from_listener(listener, None)
            .map_err(|e| VisionError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;

        Ok(Self {
            server: Arc::new(server),
            port,
            html_content,
        })
    }

    /// Get the URL for accessing this server
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Answer one request, or give up after `timeout`
    pub fn serve_once(&self, timeout: Duration) -> Result<bool> {
        let Some(request) = self.server.recv_timeout(timeout)? else {
            return Ok(false);
        };

        let content_type = Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=UTF-8"[..])
            .map_err(|_| VisionError::Capture("invalid content type header".to_string()))?;
        let response = Response::from_string(self.html_content.as_str()).with_header(content_type);

        request.respond(response)?;
        Ok(true)
    }
}

/// A render server running on its own thread
pub struct DisposableServer {
    url: String,
    server: Arc<Server>,
    thread: thread::JoinHandle<()>,
}

impl DisposableServer {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop waiting for a request and join the server thread
    pub fn finish(self) {
        self.server.unblock();
        if self.thread.join().is_err() {
            warn!(url = %self.url, "preview server thread panicked");
        }
    }
}

/// Start a disposable server
///
/// The listener is bound before this returns, so the URL is immediately
/// reachable. The server runs in a background thread and accepts one request.
pub fn start_disposable_server(html: String, timeout: Duration) -> Result<DisposableServer> {
    let render = RenderServer::new(html)?;
    let url = render.url();
    let server = Arc::clone(&render.server);
    debug!(%url, "serving preview");

    let thread = thread::spawn(move || match render.serve_once(timeout) {
        Ok(true) => {}
        Ok(false) => warn!("preview server timed out without a request"),
        Err(e) => debug!(error = %e, "preview server stopped"),
    });

    Ok(DisposableServer { url, server, thread })
}
