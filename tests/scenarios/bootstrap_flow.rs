//! Test: Bootstrap Flow - YAML configuration through the player chain

use bootchain::core::config::BootstrapConfig;
use bootchain::core::ChainStatus;
use bootchain::player::options::keys;
use bootchain::player::{
    AudioFormat, Bootstrap, CapturingBinder, InMemoryOptionStore, Notification, OptionValue,
    StaticProbe, TransportCommand, TransportState,
};
use std::sync::{Arc, Mutex};

const CONFIG: &str = r#"
name: test-player
player:
  preload: metadata
  loop: true
  fade_ms: 1500
playlist:
  - name: Intro
    artist: Someone
    url: media/intro.ogg
  - name: Outro
    url: media/outro.mp3?v=2
"#;

fn notifications() -> (Arc<Mutex<Vec<Notification>>>, impl Fn(&Notification) + Send + Sync) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |n: &Notification| sink.lock().unwrap().push(n.clone()))
}

#[test]
fn test_bootstrap_from_yaml() {
    let config = BootstrapConfig::from_yaml(CONFIG).unwrap();
    config.validate().unwrap();

    let store = InMemoryOptionStore::new();
    let binder = CapturingBinder::new();
    let (seen, notify) = notifications();

    let report = Bootstrap::new(config, StaticProbe::new(), store.clone(), binder.clone())
        .on_notification(notify)
        .run()
        .unwrap();

    assert!(report.exit.success);
    assert_eq!(report.state.status, ChainStatus::Completed);
    assert_eq!(report.last_step_index, 2);
    assert_eq!(*seen.lock().unwrap(), vec![Notification::Ready]);

    assert_eq!(store.get(keys::PRELOAD), Some(OptionValue::Text("metadata".to_string())));
    assert_eq!(store.get(keys::LOOP), Some(OptionValue::Flag(true)));
    assert_eq!(store.get(keys::DURATION), Some(OptionValue::Millis(1500)));
    assert_eq!(store.snapshot().len(), keys::ALL.len());

    let mut view_model = binder.bound().unwrap();
    assert_eq!(view_model.playlist().len(), 2);
    assert_eq!(view_model.current_track().name, "Intro");
    assert_eq!(view_model.playlist()[1].format(), Some(AudioFormat::Mp3));
    assert_eq!(view_model.handle(TransportCommand::Play), TransportState::Playing);
}

/// The probe rejects AAC: nothing past validation runs
#[test]
fn test_bootstrap_unsupported_format() {
    let config = BootstrapConfig::from_yaml(CONFIG).unwrap();
    let store = InMemoryOptionStore::new();
    let binder = CapturingBinder::new();
    let (seen, notify) = notifications();

    let probe = StaticProbe::new().with_unsupported(AudioFormat::Aac);
    let report = Bootstrap::new(config, probe, store.clone(), binder.clone())
        .on_notification(notify)
        .run()
        .unwrap();

    assert!(!report.exit.success);
    assert_eq!(report.exit.message.as_deref(), Some("Playback format AAC is not supported."));
    assert_eq!(report.last_step_index, 0);
    assert!(store.is_empty());
    assert!(!binder.is_bound());

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].to_string(),
        "Couldn't complete bootstrap sequence: Playback format AAC is not supported."
    );
}

/// An unavailable audio backend fails before any format is checked
#[test]
fn test_bootstrap_audio_unavailable() {
    let store = InMemoryOptionStore::new();
    let report = Bootstrap::new(
        BootstrapConfig::default(),
        StaticProbe::unavailable(),
        store.clone(),
        CapturingBinder::new(),
    )
    .run()
    .unwrap();

    assert!(!report.exit.success);
    assert_eq!(report.state.status, ChainStatus::Interrupted);
    assert!(store.is_empty());
}

/// The caller's payload comes back untouched by the player steps
#[test]
fn test_bootstrap_payload_round_trip() {
    let payload = serde_json::json!({"session": "abc"});
    let report = Bootstrap::new(
        BootstrapConfig::default(),
        StaticProbe::new(),
        InMemoryOptionStore::new(),
        CapturingBinder::new(),
    )
    .with_payload(payload.clone())
    .run()
    .unwrap();

    assert_eq!(report.payload, payload);
}
