//! namematch-daemon - Persistent matcher daemon with a hot engine.
//!
//! CHANGELOG:
//! - 01/13/2026 - Path and stop helpers moved into the library
//! - 01/12/2026 - Config flags, tracing setup
//! - 01/11/2026 - Initial implementation

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use namematch::config::MatcherConfig;
use namematch::daemon::{self, server::DaemonServer, DEFAULT_SOCKET};

#[derive(Parser)]
#[command(name = "namematch-daemon")]
#[command(about = "Persistent daemon for the namematch CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SocketArg {
    /// Socket path
    #[arg(long, default_value = DEFAULT_SOCKET)]
    socket: String,
}

impl SocketArg {
    fn path(&self) -> PathBuf {
        daemon::socket_path(&self.socket)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start the daemon
    Start {
        #[command(flatten)]
        socket: SocketArg,

        /// Config file (default: $NAMEMATCH_CONFIG or <config dir>/namematch/config.json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run in foreground (don't daemonize)
        #[arg(long)]
        foreground: bool,
    },

    /// Stop the daemon
    Stop {
        #[command(flatten)]
        socket: SocketArg,
    },

    /// Check daemon status
    Status {
        #[command(flatten)]
        socket: SocketArg,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let result = match Cli::parse().command {
        Commands::Start { socket, config, foreground } => start(socket.path(), config, foreground),
        Commands::Stop { socket } => daemon::stop(&socket.path()).map(|pid| {
            println!("Daemon stopped (pid {})", pid);
            true
        }),
        Commands::Status { socket } => {
            let path = socket.path();
            let running = daemon::is_running(&path);
            if running {
                println!("Daemon running at {}", path.display());
            } else {
                println!("Daemon not running");
            }
            Ok(running)
        }
    };

    match result {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn start(socket: PathBuf, config: Option<PathBuf>, foreground: bool) -> Result<bool> {
    if let Some(parent) = socket.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Fail before forking on a bad config.
    let config = MatcherConfig::load_or_default(config.as_deref())?;

    if !foreground {
        daemonize::Daemonize::new()
            .pid_file(daemon::pid_path(&socket))
            .working_directory("/tmp")
            .start()
            .context("Failed to daemonize")?;
    }

    DaemonServer::new(&socket, &config)?.serve()?;
    Ok(true)
}
