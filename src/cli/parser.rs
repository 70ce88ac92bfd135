use crate::export::ExportFormat;
use crate::models::scan_kind::ScanOrigin;
use clap::{Parser, Subcommand};

/// Command-line interface definition for punchclock
/// NFC attendance tracker: tag punches toggle work sessions over SQLite
#[derive(Parser)]
#[command(
    name = "punchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "NFC attendance tracker: tag punches toggle work sessions over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Submit a tag scan: opens the worker's session, or closes the open one
    Punch {
        /// Raw NFC tag UID (hex, case-insensitive)
        tag: String,

        /// Code of the reader that captured the scan
        #[arg(long)]
        reader: Option<String>,

        /// Event timestamp (RFC 3339); defaults to now. For buffered scans
        /// submitted after the fact.
        #[arg(long)]
        at: Option<String>,

        /// Channel the scan arrived through
        #[arg(long, value_enum, default_value = "nfc")]
        origin: ScanOrigin,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage workers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Manage readers
    Reader {
        #[command(subcommand)]
        action: ReaderAction,
    },

    /// Manage locations
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },

    /// List work sessions (newest first)
    Sessions {
        /// Filter by worker id
        #[arg(long)]
        worker: Option<i64>,

        /// Only sessions still open
        #[arg(long)]
        open: bool,

        #[arg(long, default_value_t = 50)]
        limit: i64,
    },

    /// List raw scans (newest first)
    Scans {
        /// Filter by worker id
        #[arg(long)]
        worker: Option<i64>,

        #[arg(long, default_value_t = 50)]
        limit: i64,
    },

    /// Export work session data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Filter by worker id
        #[arg(long)]
        worker: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration for missing fields")]
        check: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Register a new worker
    Add {
        #[arg(long)]
        name: String,

        /// NFC tag UID to bind (hex)
        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        inactive: bool,
    },

    /// List workers with their open-session marker
    List,

    /// Update name, tag binding or active flag
    Set {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        /// Bind a new tag UID
        #[arg(long, conflicts_with = "clear_tag")]
        tag: Option<String>,

        /// Unbind the current tag
        #[arg(long)]
        clear_tag: bool,

        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        #[arg(long)]
        inactive: bool,
    },

    /// Delete a worker (blocked while session history exists)
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum ReaderAction {
    /// Provision a reader. Punches never create readers on their own.
    Add {
        #[arg(long)]
        code: String,

        #[arg(long)]
        name: Option<String>,

        /// Attach to a location by name (created if missing)
        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        inactive: bool,
    },

    List,

    /// Deactivate without touching scan history
    Off { id: i64 },

    /// Delete; historical scans keep their rows with a null reader
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum LocationAction {
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        code: Option<String>,
    },

    List,
}
