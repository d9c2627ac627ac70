use clap::Parser;
use std::path::PathBuf;

/// Command-line interface configuration
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(clap::Subcommand)]
pub enum Command {
    /// Render a diagnostics report inline against a file
    Preview(PreviewArgs),
}

#[derive(clap::Args)]
pub struct PreviewArgs {
    /// File the diagnostics refer to
    pub file: PathBuf,

    /// JSON diagnostics report (an array of diagnostic records)
    #[arg(short, long)]
    pub diagnostics: PathBuf,

    /// Blank columns between buffer text and the annotation
    #[arg(long, default_value_t = 4)]
    pub spacing: usize,

    /// Marker shown once per diagnostic on a line
    #[arg(long, default_value = "■")]
    pub prefix: String,

    /// Text appended after the composed message
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Prepend diagnostic codes to messages
    #[arg(long)]
    pub code: bool,

    /// Least severe level to show: error, warn, info or hint
    #[arg(long)]
    pub severity: Option<String>,

    /// Source-label policy: never, if_many or always
    #[arg(long, default_value = "if_many")]
    pub source: String,

    /// Cursor line for cursor-relative policies (0-based)
    #[arg(long)]
    pub cursor: Option<u32>,

    /// Cursor-relative policy: hide or only
    #[arg(long, default_value = "")]
    pub current_line: String,

    /// Colorize annotations with ANSI escapes
    #[arg(long)]
    pub color: bool,
}
