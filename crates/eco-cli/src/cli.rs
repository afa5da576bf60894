//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ecoinspect",
    version,
    about = "EcoInspect - Berita Acara Pengawasan Lingkungan Hidup",
    long_about = "Record environmental compliance inspections and print the official\n\
                  Berita Acara Pengawasan Lingkungan Hidup (PermenLHK No. 14/2024).\n\n\
                  Data is kept in a local folder, one JSON file per store slot."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: platform config folder).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Folder holding the local database.
    #[arg(long, value_name = "DIR", env = "ECOINSPECT_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in with an operator name.
    Login {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Sign out.
    Logout,

    /// Show the local database status.
    Status,

    /// List the inspection forms.
    Forms,

    /// Manage the inspector directory.
    #[command(subcommand)]
    Inspector(InspectorCommand),

    /// Run an inspection from a script file and archive the result.
    Inspect(InspectArgs),

    /// List archived inspections.
    History(HistoryArgs),

    /// Print an archived inspection as a Berita Acara document.
    Print(PrintArgs),
}

#[derive(Subcommand)]
pub enum InspectorCommand {
    /// List registered inspectors.
    List,

    /// Register an inspector.
    Add(AddInspectorArgs),

    /// Remove an inspector. Archived records keep their copy.
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct AddInspectorArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub nip: String,

    /// Pangkat / golongan.
    #[arg(long, default_value = "")]
    pub rank: String,

    /// Jabatan.
    #[arg(long = "job-title", default_value = "")]
    pub job_title: String,

    #[arg(long = "official-number", default_value = "")]
    pub official_number: String,

    /// Instansi.
    #[arg(long, default_value = "")]
    pub agency: String,

    /// Surat tugas reference.
    #[arg(long = "assignment-letter", default_value = "")]
    pub assignment_letter: String,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Inspection script (TOML).
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Start with this form already chosen, skipping form selection.
    #[arg(long, value_name = "ID")]
    pub form: Option<String>,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Filter by company or inspector name.
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,

    #[arg(long, value_enum, default_value = "table")]
    pub format: HistoryFormatArg,
}

#[derive(Args)]
pub struct PrintArgs {
    #[arg(value_name = "RECORD_ID")]
    pub id: String,

    /// Write the document here instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "html")]
    pub format: PrintFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HistoryFormatArg {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PrintFormatArg {
    /// Printable XHTML page.
    Html,
    /// Plain-text preview.
    Text,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
