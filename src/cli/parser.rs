use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rPatrol
/// CLI application to record patrol scans and reconcile them against the round schedule
#[derive(Parser)]
#[command(
    name = "rpatrol",
    version = env!("CARGO_PKG_VERSION"),
    about = "Patrol round tracking: record QR checkpoint scans and build per-round compliance reports",
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

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "check",
            help = "Check the configuration file for missing fields and fill in defaults"
        )]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show the patrol round schedule, optionally materialized for a date
    Rounds {
        #[arg(long, value_name = "YYYY-MM-DD", help = "Stamp the rounds onto this date")]
        date: Option<String>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Manage QR checkpoints
    Qr {
        #[command(subcommand)]
        action: QrAction,
    },

    /// Record, list or delete scans
    Scan {
        #[command(subcommand)]
        action: ScanAction,
    },

    /// Build the per-checkpoint, per-round compliance report
    Report {
        #[arg(long, help = "Site (factory code); defaults to `default_site` from config")]
        site: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,

        #[arg(long, value_enum, help = "Output format (table when printing, config default with --file)")]
        format: Option<ReportFormat>,

        #[arg(long, value_name = "FILE", help = "Write the report to an absolute file path")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Summarize compliance for a site and date
    Summary {
        #[arg(long)]
        site: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum QrAction {
    /// Create a checkpoint
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        site: Option<String>,

        #[arg(long, help = "Waiting time in minutes (default from config)")]
        wait: Option<u32>,
    },

    /// List checkpoints, optionally for one site
    List {
        #[arg(long)]
        site: Option<String>,
    },

    /// Show one checkpoint
    Show {
        #[arg(long)]
        id: i64,
    },

    /// Update a checkpoint
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        site: Option<String>,

        #[arg(long, conflicts_with = "reset_wait")]
        wait: Option<u32>,

        #[arg(long = "reset-wait", help = "Reset the waiting time to the default")]
        reset_wait: bool,
    },

    /// Delete a checkpoint
    Del {
        #[arg(long)]
        id: i64,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// Bulk-create checkpoints from a JSON array
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}

#[derive(Subcommand)]
pub enum ScanAction {
    /// Record a scan
    Add {
        #[arg(long = "qr", help = "Checkpoint id")]
        qr: i64,

        #[arg(long, help = "Site; defaults to the checkpoint's site")]
        site: Option<String>,

        #[arg(long)]
        guard: String,

        #[arg(
            long,
            value_name = "YYYY-MM-DDTHH:MM:SS",
            conflicts_with = "round",
            help = "Round slot the scan belongs to"
        )]
        slot: Option<String>,

        #[arg(long, help = "Round number (1-35); slot is derived with --date")]
        round: Option<u32>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Date for --round (default: today)")]
        date: Option<String>,

        #[arg(long, value_name = "RFC3339", help = "Scan instant (default: now)")]
        at: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long)]
        location: Option<String>,
    },

    /// List scans
    List {
        #[arg(long)]
        site: Option<String>,

        #[arg(long)]
        guard: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Only scans made on this site-local day")]
        date: Option<String>,
    },

    /// Delete a scan
    Del {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
    Csv,
    Xlsx,
    Pdf,
}
