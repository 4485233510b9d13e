//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// mendlint - Apply mechanical fixes from an ESLint JSON report
#[derive(Parser)]
#[command(name = "mendlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite the files listed in a report
    Fix {
        /// ESLint report produced with `--format json`
        report: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Exit with 1 if any file would be rewritten (implies --dry-run)
        #[arg(long)]
        check: bool,
    },

    /// Summarize a report by risk tier
    Triage {
        /// ESLint report produced with `--format json`
        report: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Number of rules and files to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
