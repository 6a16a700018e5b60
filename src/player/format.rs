//! Audio format identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playback formats the player knows how to ask about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Ogg,
    Mp3,
    Aac,
    Wav,
}

impl AudioFormat {
    /// Format identifiers in the order the player prefers them
    pub const PREFERRED: [AudioFormat; 4] = [
        AudioFormat::Ogg,
        AudioFormat::Mp3,
        AudioFormat::Aac,
        AudioFormat::Wav,
    ];

    /// Order in which support is verified during bootstrap
    pub const VALIDATION_ORDER: [AudioFormat; 4] = [
        AudioFormat::Wav,
        AudioFormat::Ogg,
        AudioFormat::Aac,
        AudioFormat::Mp3,
    ];

    /// Lowercase identifier, also the usual file extension
    pub fn id(&self) -> &'static str {
        match self {
            AudioFormat::Ogg => "ogg",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Aac => "aac",
            AudioFormat::Wav => "wav",
        }
    }

    /// Guess the format of a track from its URL or path extension
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or(url);
        let (_, extension) = path.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "oga" => Some(AudioFormat::Ogg),
            "m4a" => Some(AudioFormat::Aac),
            other => other.parse().ok(),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id().to_ascii_uppercase())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ogg" => Ok(AudioFormat::Ogg),
            "mp3" => Ok(AudioFormat::Mp3),
            "aac" => Ok(AudioFormat::Aac),
            "wav" => Ok(AudioFormat::Wav),
            other => Err(format!("Unknown audio format: {}", other)),
        }
    }
}
