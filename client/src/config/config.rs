use std::time::Duration;

use serde::{Deserialize, Serialize};
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use tictactoe_common::defaults::{DEFAULT_DIFFICULTY, DEFAULT_THINKING_DELAY, MAX_THINKING_DELAY};
use tictactoe_common::games::tictactoe::Difficulty;

use super::OpponentKind;

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>
{
    ConfigManager::from_yaml_file(&get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub difficulty: Difficulty,
    pub opponent: OpponentKind,
    pub thinking_delay_ms: u64,
    #[serde(default)]
    pub show_hints: bool,
}

impl Config {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.thinking_delay() > MAX_THINKING_DELAY {
            return Err(format!(
                "thinking_delay_ms must not exceed {}",
                MAX_THINKING_DELAY.as_millis()
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            opponent: OpponentKind::Computer,
            thinking_delay_ms: DEFAULT_THINKING_DELAY.as_millis() as u64,
            show_hints: false,
        }
    }
}
