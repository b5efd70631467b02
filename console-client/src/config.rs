use engine::config::{
    ConfigError, ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use engine::games::tictactoe::{FirstPlayer, Mark};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "tictactoe_console_config.yaml";
const MAX_DELAY_MS: u64 = 10_000;

pub type ConsoleConfigManager =
    ConfigManager<FileContentConfigProvider, ConsoleConfig, YamlConfigSerializer>;

fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(path: Option<&Path>) -> ConsoleConfigManager {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);
    ConfigManager::from_yaml_file(path)
}

/// Delays the console applies around computer moves, in milliseconds.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
pub struct PacingConfig {
    pub opening_delay_ms: u64,
    pub reply_delay_ms: u64,
    pub win_delay_ms: u64,
    pub draw_delay_ms: u64,
}

impl PacingConfig {
    pub fn disabled() -> Self {
        Self {
            opening_delay_ms: 0,
            reply_delay_ms: 0,
            win_delay_ms: 0,
            draw_delay_ms: 0,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            opening_delay_ms: 100,
            reply_delay_ms: 400,
            win_delay_ms: 800,
            draw_delay_ms: 500,
        }
    }
}

impl Validate for PacingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let delays = [
            ("opening_delay_ms", self.opening_delay_ms),
            ("reply_delay_ms", self.reply_delay_ms),
            ("win_delay_ms", self.win_delay_ms),
            ("draw_delay_ms", self.draw_delay_ms),
        ];
        for (name, value) in delays {
            if value > MAX_DELAY_MS {
                return Err(ConfigError::validation(format!(
                    "{} ({}) cannot exceed {} ms",
                    name, value, MAX_DELAY_MS
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct ConsoleConfig {
    /// Remembered from the last interactive choice; asked for when absent.
    pub player_mark: Option<Mark>,
    #[serde(default)]
    pub first_player: FirstPlayer,
    #[serde(default)]
    pub pacing: PacingConfig,
    pub seed: Option<u64>,
}

impl Validate for ConsoleConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.pacing.validate()
    }
}
