//! Command-Line Interface

use clap::{Parser, Subcommand};
use super::config::Config;
use std::path::PathBuf;

/// Stroke Analyzer - Score traced handwriting and flag writing patterns
#[derive(Parser, Debug)]
#[command(name = "stroke-analyze")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse a captured sample log and export a test report
    Analyze {
        /// Input file (JSON with referenceText, samples, canvasWidth, canvasHeight)
        #[arg(short, long)]
        input: PathBuf,

        /// Report file (defaults to the configured output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a summary of an exported test report
    Inspect {
        /// Path to the report JSON
        report: PathBuf,
    },

    /// View or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Config file this invocation reads and writes
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}
