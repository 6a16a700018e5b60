//! CLI command definitions

use crate::player::{AudioFormat, Preload};
use clap::Args;
use serde_json::Value;

/// Run the bootstrap sequence
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to bootstrap YAML file (defaults to the per-user config)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Report a playback format as unsupported (repeatable)
    #[arg(long, value_parser = parse_format)]
    pub unsupported: Vec<AudioFormat>,

    /// Override the configured preload mode (auto, metadata, none)
    #[arg(long, value_parser = parse_preload)]
    pub preload: Option<Preload>,

    /// Report audio playback as unavailable
    #[arg(long)]
    pub unavailable: bool,

    /// Initial chain payload as JSON
    #[arg(long, value_parser = parse_json)]
    pub payload: Option<Value>,

    /// Output the result in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Validate a bootstrap configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to bootstrap YAML file (defaults to the per-user config)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Parse an audio format identifier
pub fn parse_format(s: &str) -> Result<AudioFormat, String> {
    s.parse()
}

/// Parse a preload mode
pub fn parse_preload(s: &str) -> Result<Preload, String> {
    s.parse()
}

/// Parse a JSON document
pub fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("Invalid JSON payload: {}", e))
}
