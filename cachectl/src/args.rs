use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use config::OutputFormat;

/// Parses `Cache-Control` response header values and prints the directives they carry.
#[derive(Debug, Parser)]
#[command(name = "cachectl", version, about)]
pub struct Args {
    /// Header values to parse. When none are given, one value per line is read from stdin.
    pub headers: Vec<String>,

    /// Path to the TOML configuration file.
    #[arg(short, long, env = "CACHECTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `cache_control=trace`. Overrides the configuration file.
    #[arg(long, env = "CACHECTL_LOG")]
    pub log: Option<String>,

    /// Output format. Overrides the configuration file.
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Legacy,
    Header,
    Debug,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Legacy => OutputFormat::Legacy,
            Format::Header => OutputFormat::Header,
            Format::Debug => OutputFormat::Debug,
        }
    }
}
