//! UNIX socket server for daemon mode.
//!
//! Listens on a UNIX socket, accepts connections, and dispatches requests
//! to DaemonService.
//!
//! CHANGELOG:
//! - 01/12/2026 - Protocol error codes, tracing instead of eprintln
//! - 01/11/2026 - Initial implementation

use anyhow::Result;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::MatcherConfig;
use crate::daemon::{protocol, service::DaemonService};

/// Daemon server listening on UNIX socket.
pub struct DaemonServer {
    service: DaemonService,
    socket_path: PathBuf,
}

impl DaemonServer {
    /// Create new daemon server with the engine `config` describes.
    pub fn new(socket_path: impl AsRef<Path>, config: &MatcherConfig) -> Result<Self> {
        Ok(Self::with_service(socket_path, DaemonService::new(config)?))
    }

    pub fn with_service(socket_path: impl AsRef<Path>, service: DaemonService) -> Self {
        Self {
            service,
            socket_path: socket_path.as_ref().to_path_buf(),
        }
    }

    /// Start serving requests (blocking).
    pub fn serve(&mut self) -> Result<()> {
        // Clean up stale socket
        let _ = std::fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;

        // Owner-only (0600)
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.socket_path, std::fs::Permissions::from_mode(0o600))?;
        }

        info!(socket = %self.socket_path.display(), "listening");

        // Accept connections sequentially (single-threaded)
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = self.handle_connection(stream) {
                        warn!(error = %e, "connection error");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "accept error");
                }
            }
        }

        Ok(())
    }

    /// Handle a single client connection.
    fn handle_connection(&mut self, stream: UnixStream) -> Result<()> {
        let mut writer = stream.try_clone()?;
        let mut reader = BufReader::new(&stream);

        let mut line = String::new();
        reader.read_line(&mut line)?;

        if line.trim().is_empty() {
            return Ok(()); // Client disconnected
        }

        let response = self.respond(&line);
        writer.write_all(response.to_ndjson_line()?.as_bytes())?;
        writer.flush()?;

        Ok(())
    }

    /// Build the response for one request line.
    pub fn respond(&mut self, line: &str) -> protocol::Response {
        let start = Instant::now();
        let elapsed_ms = |start: Instant| start.elapsed().as_secs_f64() * 1000.0;

        let request = match protocol::Request::from_ndjson_line(line) {
            Ok(request) => request,
            Err(e) => {
                return protocol::Response::error(
                    String::new(),
                    "BAD_REQUEST",
                    format!("{:#}", e),
                    elapsed_ms(start),
                )
            }
        };

        if request.v != protocol::PROTOCOL_VERSION {
            return protocol::Response::error(
                request.id,
                "BAD_REQUEST",
                format!("Unsupported protocol version: {}", request.v),
                elapsed_ms(start),
            );
        }

        match self.service.dispatch(&request.method, request.params) {
            Ok(result) => protocol::Response::success(request.id, result, elapsed_ms(start)),
            Err(e) => {
                info!(method = request.method.as_str(), error = %e, "request failed");
                protocol::Response::error(request.id, e.code(), e.to_string(), elapsed_ms(start))
            }
        }
    }
}
