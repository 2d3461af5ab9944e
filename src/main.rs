//! namematch - cascading person-name matcher CLI
//!
//! Matches free-text or split names against a SQLite people table.
//!
//! CHANGELOG:
//! - 01/12/2026 - Record commands (init/add/import/list)
//! - 01/11/2026 - Initial CLI skeleton

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use namematch::commands::{self, matching::NameArgs};
use namematch::config::MatcherConfig;
use namematch::output;

/// Cascading person-name matcher over a SQLite people table.
#[derive(Parser, Debug)]
#[command(name = "namematch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output as JSON (most commands support this)
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Comma-separated field allowlist
    #[arg(long, global = true)]
    fields: Option<String>,

    /// Config file (default: $NAMEMATCH_CONFIG or <config dir>/namematch/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// People database, overriding the config
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// People table, overriding the config
    #[arg(long, global = true)]
    table: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    // =========================================================================
    // MATCHING COMMANDS
    // =========================================================================
    /// Find records matching a name
    Match {
        /// Full name (e.g. "Dr. John A. Smith Jr.")
        name: Vec<String>,

        #[arg(long)]
        first: Option<String>,

        #[arg(long)]
        middle: Option<String>,

        #[arg(long)]
        last: Option<String>,

        #[arg(long)]
        suffix: Option<String>,

        /// Do not retry with first-name equivalents
        #[arg(long)]
        no_expand: bool,

        /// Stop after the suffix stage
        #[arg(long)]
        skip_middle: bool,

        /// Ignore suffixes entirely
        #[arg(long)]
        skip_suffix: bool,

        /// Extra SQL condition ANDed into every query
        #[arg(long)]
        condition: Option<String>,
    },

    /// Compare two full names
    Compare {
        a: String,
        b: String,
    },

    /// Test a candidate against the abbreviation pattern of a name
    Abbr {
        /// Name the pattern is built from
        source: String,

        /// Candidate to test
        candidate: String,
    },

    /// List the known equivalents of a first name
    Equivalents {
        first: String,
    },

    /// Show how a full name splits into parts
    Parse {
        name: Vec<String>,
    },

    // =========================================================================
    // RECORD COMMANDS
    // =========================================================================
    /// Create the people table
    Init,

    /// Add a person record
    Add {
        #[arg(long)]
        first: String,

        #[arg(long)]
        middle: Option<String>,

        #[arg(long)]
        last: String,

        #[arg(long)]
        suffix: Option<String>,
    },

    /// Import person records from a JSON file
    Import {
        file: PathBuf,
    },

    /// List all person records
    List,
}

fn load_config(cli: &Cli) -> anyhow::Result<MatcherConfig> {
    let mut config = MatcherConfig::load_or_default(cli.config.as_deref())?;
    if let Some(ref database) = cli.database {
        config.database = database.clone();
    }
    if let Some(ref table) = cli.table {
        config.table = table.clone();
    }
    Ok(config)
}

fn run(cli: Cli, output_controls: &output::OutputControls) -> anyhow::Result<()> {
    let mut config = load_config(&cli)?;

    match cli.command {
        // Matching commands
        Command::Match { name, first, middle, last, suffix, no_expand, skip_middle, skip_suffix, condition } => {
            if skip_middle {
                config.options.skip_match_middle_name = true;
            }
            if skip_suffix {
                config.options.skip_match_suffix = true;
            }
            if condition.is_some() {
                config.condition = condition;
            }
            let args = NameArgs { fullname: name, first, middle, last, suffix };
            commands::matching::find(&config, &args, !no_expand, output_controls)
        }
        Command::Compare { a, b } => {
            commands::matching::compare(&config, &a, &b, output_controls)
        }
        Command::Abbr { source, candidate } => {
            commands::matching::abbr(&source, &candidate, output_controls)
        }
        Command::Equivalents { first } => {
            commands::matching::equivalents(&config, &first, output_controls)
        }
        Command::Parse { name } => {
            commands::matching::parse(&name.join(" "), output_controls)
        }

        // Record commands
        Command::Init => commands::records::init(&config),
        Command::Add { first, middle, last, suffix } => {
            commands::records::add(&config, &first, middle.as_deref(), &last, suffix.as_deref())
        }
        Command::Import { file } => commands::records::import(&config, &file),
        Command::List => commands::records::list(&config, output_controls),
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Build output controls from global flags
    let output_controls = output::OutputControls {
        json: cli.json,
        compact: cli.compact,
        fields: cli.fields.clone(),
    };

    match run(cli, &output_controls) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            if output_controls.json {
                println!("{}", output::format_error(&format!("{:#}", e)));
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(1)
        }
    }
}
