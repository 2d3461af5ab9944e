//! NDJSON protocol types for the matcher daemon.
//!
//! CHANGELOG:
//! - 01/12/2026 - Error codes for bad params and unknown methods
//! - 01/11/2026 - Initial implementation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Current protocol version.
pub const PROTOCOL_VERSION: u8 = 1;

/// NDJSON request from client to daemon.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    /// Unique request ID (UUID)
    pub id: String,
    /// Protocol version
    #[serde(default = "default_version")]
    pub v: u8,
    /// Method name (e.g., "health", "match", "set_condition")
    pub method: String,
    #[serde(default)]
    pub params: HashMap<String, Value>,
}

fn default_version() -> u8 {
    PROTOCOL_VERSION
}

/// NDJSON response from daemon to client.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    /// Request ID (matches request)
    pub id: String,
    pub ok: bool,
    pub result: Option<Value>,
    pub error: Option<ErrorInfo>,
    pub meta: ResponseMeta,
}

/// Error details in response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (e.g., "ERROR", "BAD_REQUEST")
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

/// Response metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Server execution time in milliseconds
    pub server_ms: f64,
    pub protocol_v: u8,
}

impl ResponseMeta {
    fn new(server_ms: f64) -> Self {
        Self {
            server_ms,
            protocol_v: PROTOCOL_VERSION,
        }
    }
}

impl Request {
    /// Parse request from NDJSON line.
    pub fn from_ndjson_line(line: &str) -> Result<Self> {
        serde_json::from_str(line.trim_end()).context("Failed to parse request JSON")
    }
}

impl Response {
    pub fn success(id: String, result: Value, server_ms: f64) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
            meta: ResponseMeta::new(server_ms),
        }
    }

    pub fn error(id: String, code: &str, message: String, server_ms: f64) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(ErrorInfo {
                code: code.to_string(),
                message,
                details: None,
            }),
            meta: ResponseMeta::new(server_ms),
        }
    }

    /// Serialize response to NDJSON line.
    pub fn to_ndjson_line(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}\n", json))
    }
}
