//! namematch-client - Thin client for the matcher daemon.
//!
//! CHANGELOG:
//! - 01/13/2026 - Shared socket path helper
//! - 01/11/2026 - Initial implementation

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

use namematch::daemon::{self, DEFAULT_SOCKET};

#[derive(Parser)]
#[command(name = "namematch-client")]
#[command(about = "Thin client for the namematch daemon")]
struct Cli {
    /// Method to call (health, match, compare, abbr, equivalents, set_condition)
    method: String,

    /// Socket path
    #[arg(long, default_value = DEFAULT_SOCKET)]
    socket: String,

    /// JSON parameters (as string)
    #[arg(long)]
    params: Option<String>,

    /// Request timeout (seconds)
    #[arg(long, default_value = "5.0")]
    timeout: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let params: HashMap<String, serde_json::Value> = match cli.params {
        Some(p) => serde_json::from_str(&p).context("--params must be a JSON object")?,
        None => HashMap::new(),
    };

    let request = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "v": 1,
        "method": cli.method,
        "params": params,
    });

    let socket_path = daemon::socket_path(&cli.socket);
    let stream = UnixStream::connect(&socket_path)
        .with_context(|| format!("Daemon not reachable at {}", socket_path.display()))?;

    let timeout = std::time::Duration::from_secs_f64(cli.timeout);
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    let request_line = format!("{}\n", serde_json::to_string(&request)?);
    (&stream).write_all(request_line.as_bytes())?;

    let mut reader = BufReader::new(&stream);
    let mut response_line = String::new();
    reader.read_line(&mut response_line)?;

    let response: serde_json::Value = serde_json::from_str(&response_line)?;

    if response["ok"].as_bool().unwrap_or(false) {
        println!("{}", serde_json::to_string_pretty(&response["result"])?);
        Ok(())
    } else {
        eprintln!(
            "Error: {}",
            response["error"]["message"].as_str().unwrap_or("unknown")
        );
        std::process::exit(1);
    }
}
