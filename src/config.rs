//! Settings from an optional TOML file, overridden by command line flags.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_HISTORY_SIZE: usize = 500;
pub const DEFAULT_STEP_DELAY_MS: u64 = 150;
pub const DEFAULT_FLICKER_DELAY_MS: u64 = 100;

#[derive(Parser, Debug, Default)]
#[command(name = "sokoban", about = "Push the boxes onto the shelves")]
pub struct Args {
    /// TOML file with default settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding warehouse<N>.txt files
    #[arg(long)]
    pub levels_dir: Option<PathBuf>,

    /// Level to start on
    #[arg(long)]
    pub level: Option<u32>,

    /// Maximum number of undo (and redo) entries
    #[arg(long)]
    pub history_size: Option<usize>,

    /// Pause between auto-walk steps
    #[arg(long)]
    pub step_delay_ms: Option<u64>,

    /// Pause between frames of the solved animation
    #[arg(long)]
    pub flicker_delay_ms: Option<u64>,

    /// Where log output goes
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write level<N>_solution.json here whenever a level is solved
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub levels_dir: PathBuf,
    pub level: u32,
    pub history_size: usize,
    pub step_delay_ms: u64,
    pub flicker_delay_ms: u64,
    pub log_file: PathBuf,
    pub export_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            levels_dir: PathBuf::from("levels"),
            level: 1,
            history_size: DEFAULT_HISTORY_SIZE,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            flicker_delay_ms: DEFAULT_FLICKER_DELAY_MS,
            log_file: PathBuf::from("sokoban.log"),
            export_dir: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Settings, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Settings, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// File values (if `--config` was given) with flags layered on top.
    pub fn resolve(args: Args) -> Result<Settings, ConfigError> {
        let base = match &args.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        base.merge(args).validate()
    }

    fn merge(self, args: Args) -> Settings {
        Settings {
            levels_dir: args.levels_dir.unwrap_or(self.levels_dir),
            level: args.level.unwrap_or(self.level),
            history_size: args.history_size.unwrap_or(self.history_size),
            step_delay_ms: args.step_delay_ms.unwrap_or(self.step_delay_ms),
            flicker_delay_ms: args.flicker_delay_ms.unwrap_or(self.flicker_delay_ms),
            log_file: args.log_file.unwrap_or(self.log_file),
            export_dir: args.export_dir.or(self.export_dir),
        }
    }

    fn validate(self) -> Result<Settings, ConfigError> {
        if self.history_size == 0 {
            return Err(ConfigError::InvalidHistorySize { size: 0 });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let file = Settings::from_toml_str(
            "history_size = 20\nstep_delay_ms = 40\nlevels_dir = \"maps\"\n",
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(20, file.history_size);
        assert_eq!(DEFAULT_FLICKER_DELAY_MS, file.flicker_delay_ms);

        let args = Args {
            history_size: Some(7),
            ..Args::default()
        };
        let settings = file.merge(args).validate().unwrap();
        assert_eq!(7, settings.history_size);
        assert_eq!(40, settings.step_delay_ms);
        assert_eq!(PathBuf::from("maps"), settings.levels_dir);
    }

    #[test]
    fn zero_history_is_rejected() {
        let args = Args {
            history_size: Some(0),
            ..Args::default()
        };
        assert!(matches!(
            Settings::resolve(args),
            Err(ConfigError::InvalidHistorySize { size: 0 })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = Settings::from_toml_str("histroy_size = 3\n", Path::new("typo.toml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn reads_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sokoban.toml");
        std::fs::write(&path, "level = 3\nexport_dir = \"out\"\n").unwrap();
        let args = Args {
            config: Some(path),
            ..Args::default()
        };
        let settings = Settings::resolve(args).unwrap();
        assert_eq!(3, settings.level);
        assert_eq!(Some(PathBuf::from("out")), settings.export_dir);
    }
}
