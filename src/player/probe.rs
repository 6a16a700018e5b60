//! Audio capability probe

use crate::player::format::AudioFormat;
use std::collections::BTreeSet;

/// Trait for platform audio capability queries
pub trait CapabilityProbe: Send {
    /// Whether audio playback is available at all
    fn is_available(&self) -> bool;

    /// Whether the given format can be played
    fn supports(&self, format: AudioFormat) -> bool;
}

/// Probe answering from a fixed table
///
/// Defaults to "everything is supported"; tests and the CLI switch
/// individual answers off.
#[derive(Debug, Clone)]
pub struct StaticProbe {
    available: bool,
    unsupported: BTreeSet<AudioFormat>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self {
            available: true,
            unsupported: BTreeSet::new(),
        }
    }

    /// A probe reporting that no audio playback exists
    pub fn unavailable() -> Self {
        Self {
            available: false,
            unsupported: BTreeSet::new(),
        }
    }

    pub fn with_unsupported(mut self, format: AudioFormat) -> Self {
        self.unsupported.insert(format);
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

impl Default for StaticProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityProbe for StaticProbe {
    fn is_available(&self) -> bool {
        self.available
    }

    fn supports(&self, format: AudioFormat) -> bool {
        self.available && !self.unsupported.contains(&format)
    }
}
