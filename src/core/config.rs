//! Bootstrap configuration from YAML

use crate::player::{AudioFormat, PlayerOptions, Track};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Top-level bootstrap configuration loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Player name, used in output only
    #[serde(default = "default_name")]
    pub name: String,

    /// Defaults written into the audio library
    #[serde(default)]
    pub player: PlayerOptions,

    /// Formats the platform must support, checked in this order
    #[serde(default = "default_required_formats")]
    pub required_formats: Vec<AudioFormat>,

    /// Initial playlist
    #[serde(default)]
    pub playlist: Vec<Track>,
}

fn default_name() -> String {
    "player".to_string()
}

fn default_required_formats() -> Vec<AudioFormat> {
    AudioFormat::VALIDATION_ORDER.to_vec()
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            player: PlayerOptions::default(),
            required_formats: default_required_formats(),
            playlist: Vec::new(),
        }
    }
}

impl BootstrapConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: BootstrapConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Per-user config location: `<config_dir>/bootchain/player.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bootchain").join("player.yaml"))
    }

    /// Load `path`, or the per-user file if it exists, or the built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => Self::from_file(default),
            _ => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.player.formats.is_empty() {
            anyhow::bail!("player.formats must list at least one format");
        }

        let mut seen = HashSet::new();
        for format in &self.player.formats {
            if !seen.insert(format) {
                anyhow::bail!("Duplicate format in player.formats: {}", format.id());
            }
        }

        let mut seen = HashSet::new();
        for format in &self.required_formats {
            if !seen.insert(format) {
                anyhow::bail!("Duplicate format in required_formats: {}", format.id());
            }
        }

        for (index, track) in self.playlist.iter().enumerate() {
            if track.name.trim().is_empty() {
                anyhow::bail!("Track #{} has an empty name", index + 1);
            }
            match track.format() {
                None => anyhow::bail!(
                    "Track '{}' has no recognizable format (url: {})",
                    track.name,
                    track.url
                ),
                Some(format) if !self.player.formats.contains(&format) => anyhow::bail!(
                    "Track '{}' is {} which is not listed in player.formats",
                    track.name,
                    format.id()
                ),
                Some(_) => {}
            }
        }

        Ok(())
    }
}
