//! CLI configuration, loaded from micromouse.yaml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use maze_nav::MouseConfig;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "micromouse.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Config version
    pub version: Option<String>,

    /// Controller settings
    pub controller: MouseConfig,

    /// Maze file used when `--maze` is not given
    pub maze: Option<PathBuf>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        if let (Some(maze), Some(dir)) = (config.maze.as_mut(), path.parent()) {
            if maze.is_relative() {
                *maze = dir.join(&*maze);
            }
        }
        Ok(config)
    }

    /// Load `micromouse.yaml` from `dir`, or defaults when it is absent.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_nav::GoalDetection;

    #[test]
    fn empty_file_is_the_default() {
        let config = CliConfig::from_yaml("").unwrap();
        assert_eq!(config.controller, MouseConfig::default());
        assert!(config.maze.is_none());
    }

    #[test]
    fn nested_controller_settings_are_read() {
        let yaml = r#"
version: "1"
maze: mazes/loop.maze
controller:
  max_ticks: 2000
  goal:
    mode: turn_streak
    turns: 3
"#;
        let config = CliConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version.as_deref(), Some("1"));
        assert_eq!(config.maze, Some(PathBuf::from("mazes/loop.maze")));
        assert_eq!(config.controller.max_ticks, 2000);
        assert_eq!(
            config.controller.goal,
            GoalDetection::TurnStreak { turns: 3 }
        );
    }

    #[test]
    fn partial_controller_keeps_defaults() {
        let config = CliConfig::from_yaml("controller:\n  max_ticks: 10\n").unwrap();
        assert_eq!(config.controller.max_ticks, 10);
        assert_eq!(config.controller.goal, GoalDetection::HostSignal);
    }

    #[test]
    fn unknown_goal_mode_is_rejected() {
        assert!(CliConfig::from_yaml("controller:\n  goal:\n    mode: teleport\n").is_err());
    }
}
