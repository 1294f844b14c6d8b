use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for ncdash
/// Role-gated reports over nature-journal and check-in spreadsheet exports
#[derive(Parser)]
#[command(
    name = "ncdash",
    version = env!("CARGO_PKG_VERSION"),
    about = "Nature check-in dashboard: role-gated journal, session and rating reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use a configuration file other than ~/.ncdash/ncdash.conf
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Show informational diagnostics on stderr
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Show debug diagnostics on stderr
    #[arg(global = true, long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the configuration in effect")]
        print_config: bool,

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

    /// Authenticate with a registered email and keep the session
    Login {
        /// Email address listed in the permission sheet
        email: String,
    },

    /// Clear the current session
    Logout,

    /// Show who is logged in
    Whoami,

    /// List registered users (admin only)
    Users,

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Journal report: places and time spent in nature
    Journal {
        #[command(flatten)]
        report: ReportArgs,

        /// Restrict to a user's entries (admin only, up to 3)
        #[arg(long = "email", value_name = "EMAIL")]
        emails: Vec<String>,

        /// Size of the top places table (1..=10)
        #[arg(long = "top", value_name = "N")]
        top: Option<usize>,
    },

    /// Check-in report: unique sessions per day, week, month and year
    Checkins {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Ratings report: average rating and composite score per indicator
    Ratings {
        #[command(flatten)]
        report: ReportArgs,

        /// Restrict to a user's entries (admin only, up to 3)
        #[arg(long = "email", value_name = "EMAIL")]
        emails: Vec<String>,

        /// Restrict to an indicator (admin only, up to 3)
        #[arg(long = "indicator", value_name = "INDICATOR")]
        indicators: Vec<String>,
    },
}

/// Date window and export options shared by every report.
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// First day included (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last day included (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    #[arg(
        long,
        value_name = "RANGE",
        conflicts_with_all = ["from", "to"],
        help = "Year, month or day (YYYY, YYYY-MM, YYYY-MM-DD) or two of them joined by ':'"
    )]
    pub range: Option<String>,

    /// Also write the aggregate table to a file
    #[arg(long, value_enum, value_name = "FORMAT", requires = "file")]
    pub export: Option<ExportFormat>,

    /// Absolute output path for --export
    #[arg(long, value_name = "FILE", requires = "export")]
    pub file: Option<String>,

    /// Overwrite an existing export file without asking
    #[arg(long, requires = "export")]
    pub force: bool,
}
