use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Where the listing/resolution API lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the clip server, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// How to launch the playback surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_mpv_binary")]
    pub mpv_binary: String,
    /// Extra arguments appended to every mpv invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mpv_binary: default_mpv_binary(),
            extra_args: Vec::new(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_mpv_binary() -> String {
    "mpv".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &PathBuf) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clipdeck")
            .join("config.toml")
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("clipdeck")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.player.mpv_binary, "mpv");
        assert!(config.player.extra_args.is_empty());
    }

    #[test]
    fn test_load_creates_default_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.server.base_url, "http://127.0.0.1:5000");

        let mut edited = created.clone();
        edited.server.base_url = "https://clips.example.net".to_string();
        edited.player.extra_args = vec!["--fullscreen".to_string()];
        edited.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.server.base_url, "https://clips.example.net");
        assert_eq!(reloaded.player.extra_args, vec!["--fullscreen"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"http://10.0.0.2:5000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.player.mpv_binary, "mpv");
    }
}
