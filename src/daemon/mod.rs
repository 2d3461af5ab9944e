//! Daemon mode: persistent server with a hot match engine.
//!
//! CHANGELOG:
//! - 01/13/2026 - Socket/pid path helpers, stop and status
//! - 01/11/2026 - Initial module structure

pub mod protocol;
pub mod server;
pub mod service;

use anyhow::{Context, Result};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

/// Default socket path, before tilde expansion.
pub const DEFAULT_SOCKET: &str = "~/.namematch/daemon.sock";

/// Socket path with `~` expanded.
pub fn socket_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Pid file written next to the socket: `<socket>.pid`.
pub fn pid_path(socket: &Path) -> PathBuf {
    let mut name = socket.as_os_str().to_owned();
    name.push(".pid");
    PathBuf::from(name)
}

/// True when something accepts connections on `socket`.
pub fn is_running(socket: &Path) -> bool {
    UnixStream::connect(socket).is_ok()
}

/// Send SIGTERM to the daemon recorded in the pid file and remove its
/// pid file and socket. Returns the pid.
pub fn stop(socket: &Path) -> Result<i32> {
    let pid_file = pid_path(socket);
    let pid: i32 = std::fs::read_to_string(&pid_file)
        .with_context(|| format!("No pid file at {:?}", pid_file))?
        .trim()
        .parse()
        .with_context(|| format!("Invalid pid file {:?}", pid_file))?;

    // SAFETY: kill(2) takes no pointers.
    if unsafe { libc::kill(pid, libc::SIGTERM) } != 0 {
        tracing::warn!(pid, error = %std::io::Error::last_os_error(), "kill failed");
    }

    let _ = std::fs::remove_file(&pid_file);
    let _ = std::fs::remove_file(socket);
    Ok(pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_path() {
        assert_eq!(
            pid_path(Path::new("/tmp/nm/daemon.sock")),
            PathBuf::from("/tmp/nm/daemon.sock.pid")
        );
    }

    #[test]
    fn test_socket_path_expands_tilde() {
        let path = socket_path(DEFAULT_SOCKET);
        assert!(!path.starts_with("~"));
        assert!(path.ends_with(".namematch/daemon.sock"));
        assert_eq!(socket_path("/run/nm.sock"), PathBuf::from("/run/nm.sock"));
    }

    #[test]
    fn test_stop_without_pid_file() {
        let socket = std::env::temp_dir().join(format!("namematch-stop-{}.sock", std::process::id()));
        assert!(stop(&socket).is_err());
        assert!(!is_running(&socket));
    }
}
