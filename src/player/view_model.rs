//! Playlist view-model and the UI binder it is handed to

use crate::player::format::AudioFormat;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// A playlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,

    #[serde(default)]
    pub artist: String,

    #[serde(default)]
    pub album: String,

    #[serde(default)]
    pub genre: String,

    #[serde(default)]
    pub year: Option<u16>,

    /// Location of the audio file
    pub url: String,

    /// Explicit format; guessed from `url` when absent
    #[serde(default)]
    pub format: Option<AudioFormat>,

    /// Cover art location
    #[serde(default)]
    pub picture: Option<String>,
}

impl Track {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: String::new(),
            album: String::new(),
            genre: String::new(),
            year: None,
            url: url.into(),
            format: None,
            picture: None,
        }
    }

    /// Stand-in shown while the playlist is empty
    pub fn placeholder() -> Self {
        Self {
            name: "default name".to_string(),
            artist: "default artist".to_string(),
            album: "default album".to_string(),
            genre: "default genre".to_string(),
            year: None,
            url: String::new(),
            format: None,
            picture: None,
        }
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Effective format of the track
    pub fn format(&self) -> Option<AudioFormat> {
        self.format.or_else(|| AudioFormat::from_url(&self.url))
    }
}

/// Transport controls exposed to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportCommand {
    Play,
    Stop,
    Next,
    Previous,
}

impl TransportCommand {
    pub const ALL: [TransportCommand; 4] = [
        TransportCommand::Play,
        TransportCommand::Stop,
        TransportCommand::Next,
        TransportCommand::Previous,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    #[default]
    Stopped,
    Playing,
}

/// State bound to the player UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerViewModel {
    playlist: Vec<Track>,
    current: Option<usize>,
    transport: TransportState,
    placeholder: Track,
    controls: Vec<TransportCommand>,
}

impl PlayerViewModel {
    /// Empty playlist; the current track is a placeholder until one is added
    pub fn new() -> Self {
        Self {
            playlist: Vec::new(),
            current: None,
            transport: TransportState::Stopped,
            placeholder: Track::placeholder(),
            controls: TransportCommand::ALL.to_vec(),
        }
    }

    pub fn add_track(&mut self, track: Track) {
        self.playlist.push(track);
        if self.current.is_none() {
            self.current = Some(0);
        }
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> &Track {
        self.current
            .and_then(|index| self.playlist.get(index))
            .unwrap_or(&self.placeholder)
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    pub fn controls(&self) -> &[TransportCommand] {
        &self.controls
    }

    /// Apply a transport command. Next/previous stop at the playlist ends.
    pub fn handle(&mut self, command: TransportCommand) -> TransportState {
        match command {
            TransportCommand::Play => {
                if self.current.is_some() {
                    self.transport = TransportState::Playing;
                }
            }
            TransportCommand::Stop => self.transport = TransportState::Stopped,
            TransportCommand::Next => {
                let last = self.playlist.len().checked_sub(1);
                if let (Some(index), Some(last)) = (self.current, last) {
                    self.current = Some((index + 1).min(last));
                }
            }
            TransportCommand::Previous => {
                if let Some(index) = self.current {
                    self.current = Some(index.saturating_sub(1));
                }
            }
        }
        self.transport
    }
}

impl Default for PlayerViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for the two-way data-binding service
pub trait UiBinder: Send {
    fn bind(&mut self, view_model: PlayerViewModel);
}

/// Binder that keeps the last bound view-model for inspection
#[derive(Debug, Clone, Default)]
pub struct CapturingBinder {
    bound: Arc<Mutex<Option<PlayerViewModel>>>,
}

impl CapturingBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound(&self) -> Option<PlayerViewModel> {
        self.bound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_bound(&self) -> bool {
        self.bound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl UiBinder for CapturingBinder {
    fn bind(&mut self, view_model: PlayerViewModel) {
        *self.bound.lock().unwrap_or_else(PoisonError::into_inner) = Some(view_model);
    }
}
