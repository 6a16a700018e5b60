//! Bootstrap steps for the player
//!
//! Each step is generic over the chain payload: none of them read it, they
//! talk to their collaborator instead.

use crate::core::{ChainContext, Step, Transition};
use crate::player::format::AudioFormat;
use crate::player::options::{keys, OptionStore, OptionValue, PlayerOptions};
use crate::player::probe::CapabilityProbe;
use crate::player::view_model::{PlayerViewModel, Track, UiBinder};
use tracing::{debug, info};

pub const UNAVAILABLE_MESSAGE: &str =
    "Audio playback is not available on this platform, time to update!";

/// Interruption message for an unsupported playback format
pub fn unsupported_message(format: AudioFormat) -> String {
    format!("Playback format {} is not supported.", format)
}

/// Verifies the platform can play every required format
pub struct ValidateCapabilitiesStep<C> {
    probe: C,
    required: Vec<AudioFormat>,
}

impl<C: CapabilityProbe> ValidateCapabilitiesStep<C> {
    /// Require all known formats, checked in validation order
    pub fn new(probe: C) -> Self {
        Self {
            probe,
            required: AudioFormat::VALIDATION_ORDER.to_vec(),
        }
    }

    pub fn with_required(mut self, required: Vec<AudioFormat>) -> Self {
        self.required = required;
        self
    }

    pub fn required(&self) -> &[AudioFormat] {
        &self.required
    }
}

impl<P, C: CapabilityProbe> Step<P> for ValidateCapabilitiesStep<C> {
    fn name(&self) -> &str {
        "validate-capabilities"
    }

    fn execute(&mut self, _ctx: &mut ChainContext<P>) -> Transition {
        if !self.probe.is_available() {
            return Transition::interrupt(UNAVAILABLE_MESSAGE);
        }

        for format in &self.required {
            if !self.probe.supports(*format) {
                return Transition::interrupt(unsupported_message(*format));
            }
            debug!("Format {} supported", format);
        }

        Transition::Advance
    }
}

/// Writes the player defaults into the audio library's option store
pub struct ConfigureOptionsStep<S> {
    store: S,
    options: PlayerOptions,
}

impl<S: OptionStore> ConfigureOptionsStep<S> {
    pub fn new(store: S, options: PlayerOptions) -> Self {
        Self { store, options }
    }
}

impl<P, S: OptionStore> Step<P> for ConfigureOptionsStep<S> {
    fn name(&self) -> &str {
        "configure-options"
    }

    fn execute(&mut self, _ctx: &mut ChainContext<P>) -> Transition {
        let options = &self.options;
        let formats = options
            .formats
            .iter()
            .map(|format| format.id().to_string())
            .collect();

        self.store
            .put(keys::PRELOAD, OptionValue::Text(options.preload.to_string()));
        self.store
            .put(keys::AUTOPLAY, OptionValue::Flag(options.autoplay));
        self.store
            .put(keys::LOOP, OptionValue::Flag(options.loop_playback));
        self.store
            .put(keys::PLACEHOLDER, OptionValue::Text(options.placeholder.clone()));
        self.store
            .put(keys::DURATION, OptionValue::Millis(options.fade_ms));
        self.store.put(keys::FORMATS, OptionValue::List(formats));

        info!("Player options configured");
        Transition::Advance
    }
}

/// Builds the playlist view-model and binds it to the UI
///
/// Always advances.
pub struct BuildViewModelStep<B> {
    binder: B,
    tracks: Vec<Track>,
}

impl<B: UiBinder> BuildViewModelStep<B> {
    pub fn new(binder: B, tracks: Vec<Track>) -> Self {
        Self { binder, tracks }
    }
}

impl<P, B: UiBinder> Step<P> for BuildViewModelStep<B> {
    fn name(&self) -> &str {
        "build-view-model"
    }

    fn execute(&mut self, _ctx: &mut ChainContext<P>) -> Transition {
        let mut view_model = PlayerViewModel::new();
        for track in &self.tracks {
            view_model.add_track(track.clone());
        }

        info!("Binding view-model with {} tracks", view_model.playlist().len());
        self.binder.bind(view_model);
        Transition::Advance
    }
}
