use crate::config::Config;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smock")]
#[command(about = "Answer mocked calls from YAML datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Command-line flags win over the configured level.
    pub fn verbosity(&self, config: &Config) -> Verbosity {
        if self.quiet {
            return Verbosity::Quiet;
        }
        match self.verbose {
            0 => config
                .log
                .verbosity
                .map(Verbosity::from_level)
                .unwrap_or(Verbosity::Normal),
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve one call against the dataset and print the result as JSON
    Query(QueryArgs),

    /// List mocked call names and their rule counts
    List(ListArgs),
}

#[derive(Parser)]
pub struct QueryArgs {
    /// Dataset file (repeatable; later files override earlier ones)
    #[arg(short, long = "data", value_name = "FILE")]
    pub data: Vec<PathBuf>,

    /// Mocked call name (e.g. requests.get)
    pub name: String,

    /// Positional arguments as JSON array (e.g., '["https://mocked.url"]')
    #[arg(short, long)]
    pub args: Option<String>,

    /// Keyword arguments as JSON object (e.g., '{"timeout": 5}')
    #[arg(short, long)]
    pub kwargs: Option<String>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pub pretty: bool,
}

impl QueryArgs {
    pub fn merge_config(&mut self, config: &Config) {
        if self.data.is_empty() {
            self.data = config.data.sources.clone();
        }
        if !self.pretty {
            self.pretty = config.output.pretty.unwrap_or(false);
        }
    }
}

#[derive(Parser)]
pub struct ListArgs {
    /// Dataset file (repeatable; later files override earlier ones)
    #[arg(short, long = "data", value_name = "FILE")]
    pub data: Vec<PathBuf>,
}

impl ListArgs {
    pub fn merge_config(&mut self, config: &Config) {
        if self.data.is_empty() {
            self.data = config.data.sources.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            2 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }

    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}
