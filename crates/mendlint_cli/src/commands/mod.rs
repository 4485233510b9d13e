//! Subcommand implementations

pub mod fix;
pub mod init;
pub mod triage;

use mendlint_core::MendConfig;
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::Cli;

/// Loads the config given with `--config`, or the one found in the working directory.
pub fn load_config(cli: &Cli) -> Result<MendConfig> {
    if let Some(ref path) = cli.config {
        return MendConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = MendConfig::discover(".") {
        info!("Using config: {}", path.display());
        return MendConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(MendConfig::new())
}
