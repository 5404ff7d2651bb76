//! Diagnostic logging
//!
//! Installs a `tracing` subscriber that writes to `poolwizard.log` in the data
//! directory. The terminal stays clean for command output and the TUI.
//! `RUST_LOG` takes precedence over the `-v` count.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::paths::WizardPaths;
use crate::error::{WizardError, WizardResult};

/// Filter directive for a `-v` count
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "poolwizard=info",
        1 => "poolwizard=debug",
        _ => "poolwizard=trace,alloy=debug",
    }
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init(paths: &WizardPaths, verbose: u8) -> WizardResult<()> {
    paths.ensure_directories()?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.trace_log())
        .map_err(|e| WizardError::Io(format!("Failed to open log file: {}", e)))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "poolwizard=info");
        assert_eq!(level_for_verbosity(1), "poolwizard=debug");
        assert!(level_for_verbosity(4).starts_with("poolwizard=trace"));
    }

    #[test]
    fn test_init_creates_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WizardPaths::with_base_dir(temp_dir.path().to_path_buf());

        init(&paths, 0).unwrap();
        init(&paths, 1).unwrap();
        assert!(paths.trace_log().exists());
    }
}
