//! Init command implementation

use std::path::PathBuf;

use mendlint_core::MendConfig;
use miette::{IntoDiagnostic, Result};
use tracing::info;

const DEFAULT_CONFIG: &str = r#"{
  // Rule ids treated as high or medium risk on top of the built-in sets
  "high_risk_rules": [],
  "medium_risk_rules": [],

  // Rule ids whose automatic fix must not run
  "disabled_fixers": [],

  // Strip zero-width and control characters before other fixes
  "sanitize": true,

  // Glob patterns of files never rewritten
  "exclude": []
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(MendConfig::CONFIG_FILES[0]);

    loop {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);

        match options.open(&config_path) {
            Ok(mut file) => {
                use std::io::Write;
                file.write_all(DEFAULT_CONFIG.as_bytes())
                    .into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "Config file already exists. Use --force to overwrite."
                    ));
                }

                match std::fs::remove_file(&config_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}
