use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Storage key for [`Settings`] in eframe's persisted app state.
pub const SETTINGS_KEY: &str = "crown_marker_settings";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Default)]
#[command(
    name = "crown-marker",
    about = "Browse point-cloud CSV files and record the crown/trunk height",
    version
)]
pub struct Cli {
    /// Directory to scan for point-cloud files on startup.
    #[arg(value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Radius of plotted points, in screen points.
    #[arg(long, value_name = "PX")]
    pub point_radius: Option<f32>,
}

// ---------------------------------------------------------------------------
// Persisted settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the last successful scan.
    pub last_root: Option<PathBuf>,
    pub point_radius: f32,
    /// Rescan `last_root` at startup when no directory is given on the command line.
    pub reopen_last_root: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_root: None,
            point_radius: 1.0,
            reopen_last_root: true,
        }
    }
}

impl Settings {
    /// Apply command-line overrides on top of persisted values.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(radius) = cli.point_radius {
            self.point_radius = radius.max(0.1);
        }
        self
    }

    /// Directory to scan before the first frame, if any.
    pub fn startup_root(&self, cli: &Cli) -> Option<PathBuf> {
        cli.root.clone().or_else(|| {
            self.last_root
                .clone()
                .filter(|_| self.reopen_last_root)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_persisted_values() {
        let cli = Cli::parse_from(["crown-marker", "/scans", "--point-radius", "2.5"]);
        let persisted = Settings {
            last_root: Some(PathBuf::from("/old")),
            ..Settings::default()
        };

        let settings = persisted.with_cli(&cli);

        assert_eq!(settings.point_radius, 2.5);
        assert_eq!(settings.startup_root(&cli), Some(PathBuf::from("/scans")));
    }

    #[test]
    fn last_root_is_reopened_only_when_enabled() {
        let cli = Cli::parse_from(["crown-marker"]);
        let mut settings = Settings {
            last_root: Some(PathBuf::from("/old")),
            ..Settings::default()
        };
        assert_eq!(settings.startup_root(&cli), Some(PathBuf::from("/old")));

        settings.reopen_last_root = false;
        assert_eq!(settings.startup_root(&cli), None);
    }
}
