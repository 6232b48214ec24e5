use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use super::logging::LogDestination;

/// Width assumed when neither `--width` nor `COLUMNS` is available.
pub const DEFAULT_WIDTH: u32 = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary plus list or table, sized to the terminal.
    #[default]
    Human,
    /// The exported report document on stdout.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "verifier", version, about = "Verify a batch of email addresses")]
pub struct Cli {
    /// File with one address per line; reads stdin when omitted
    pub input: Option<PathBuf>,

    /// RON config file (defaults to ./verifier.ron when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend origin that /api routes are forwarded to
    #[arg(long)]
    pub origin: Option<String>,

    /// Viewport width in columns
    #[arg(long, env = "COLUMNS")]
    pub width: Option<u32>,

    /// Table page to show (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Table page size: 5, 10, 20 or 50
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Scroll offset of the virtualized list
    #[arg(long)]
    pub scroll: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Write the JSON report to this file
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Log destination (overrides the config file)
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

impl Cli {
    pub fn viewport_width(&self) -> u32 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }
}
