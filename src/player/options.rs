//! Audio library option store

use crate::player::format::AudioFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

/// How much of a sound to load ahead of playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preload {
    #[default]
    Auto,
    Metadata,
    None,
}

impl fmt::Display for Preload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Preload::Auto => "auto",
            Preload::Metadata => "metadata",
            Preload::None => "none",
        };
        f.write_str(s)
    }
}

impl FromStr for Preload {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Preload::Auto),
            "metadata" => Ok(Preload::Metadata),
            "none" => Ok(Preload::None),
            other => Err(format!("Unknown preload mode: {}", other)),
        }
    }
}

/// Player defaults written into the audio library during bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOptions {
    /// Preload mode
    #[serde(default)]
    pub preload: Preload,

    /// Start playing as soon as a sound is ready
    #[serde(default)]
    pub autoplay: bool,

    /// Loop the sound
    #[serde(default, rename = "loop")]
    pub loop_playback: bool,

    /// Shown when a time conversion is impossible
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Duration of fade effects in milliseconds
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,

    /// Formats the audio files are provided in, by preference
    #[serde(default = "default_formats")]
    pub formats: Vec<AudioFormat>,
}

fn default_placeholder() -> String {
    "--".to_string()
}

fn default_fade_ms() -> u64 {
    5000
}

fn default_formats() -> Vec<AudioFormat> {
    AudioFormat::PREFERRED.to_vec()
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            preload: Preload::default(),
            autoplay: false,
            loop_playback: false,
            placeholder: default_placeholder(),
            fade_ms: default_fade_ms(),
            formats: default_formats(),
        }
    }
}

/// Names of the options written during bootstrap
pub mod keys {
    pub const PRELOAD: &str = "preload";
    pub const AUTOPLAY: &str = "autoplay";
    pub const LOOP: &str = "loop";
    pub const PLACEHOLDER: &str = "placeholder";
    pub const DURATION: &str = "duration";
    pub const FORMATS: &str = "formats";

    pub const ALL: [&str; 6] = [PRELOAD, AUTOPLAY, LOOP, PLACEHOLDER, DURATION, FORMATS];
}

/// A value written to the option store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Millis(u64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(b) => write!(f, "{}", b),
            OptionValue::Millis(ms) => write!(f, "{}ms", ms),
            OptionValue::Text(s) => write!(f, "{:?}", s),
            OptionValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Trait for the audio library's configuration object
///
/// Write-only: the bootstrap never reads options back.
pub trait OptionStore: Send {
    fn put(&mut self, name: &str, value: OptionValue);
}

/// In-memory option store
///
/// Clones share the same table, so a caller can keep a handle and inspect
/// what a step wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOptionStore {
    values: Arc<Mutex<BTreeMap<String, OptionValue>>>,
}

impl InMemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<OptionValue> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<String, OptionValue> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl OptionStore for InMemoryOptionStore {
    fn put(&mut self, name: &str, value: OptionValue) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value);
    }
}
