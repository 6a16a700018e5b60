//! Music player glue
//!
//! The collaborators (capability probe, option store, UI binder) are narrow
//! traits; the steps in [`steps`] drive them from a bootstrap chain.

pub mod bootstrap;
pub mod format;
pub mod options;
pub mod probe;
pub mod steps;
pub mod view_model;

pub use bootstrap::{BootReport, Bootstrap, Notification};
pub use format::AudioFormat;
pub use options::{InMemoryOptionStore, OptionStore, OptionValue, PlayerOptions, Preload};
pub use probe::{CapabilityProbe, StaticProbe};
pub use steps::{BuildViewModelStep, ConfigureOptionsStep, ValidateCapabilitiesStep};
pub use view_model::{
    CapturingBinder, PlayerViewModel, Track, TransportCommand, TransportState, UiBinder,
};
