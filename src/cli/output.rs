//! CLI output formatting

use crate::{
    core::ChainStatus,
    execution::ChainEvent,
    player::{OptionValue, PlayerViewModel, Track},
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
pub static NOTE: Emoji<'_, '_> = Emoji("🎵 ", "* ");

/// Create a progress bar over the chain's steps
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress.set_style(style);
    progress
}

/// Horizontal rule spanning the terminal width (80 columns if unknown)
pub fn separator() -> String {
    let width = term_size::dimensions_stdout().map(|(w, _)| w).unwrap_or(80);
    style("─".repeat(width)).dim().to_string()
}

/// Format a chain status for display
pub fn format_status(status: ChainStatus) -> String {
    match status {
        ChainStatus::NotStarted => style("NOT STARTED").dim().to_string(),
        ChainStatus::Running => style("RUNNING").yellow().to_string(),
        ChainStatus::Completed => style("COMPLETED").green().to_string(),
        ChainStatus::Interrupted => style("INTERRUPTED").red().to_string(),
    }
}

/// Format a chain event for display
pub fn format_chain_event(event: &ChainEvent) -> String {
    match event {
        ChainEvent::ChainStarted {
            run_id,
            total_steps,
        } => format!(
            "{} Starting bootstrap ({} steps, {})",
            ROCKET,
            style(total_steps).cyan(),
            style(&run_id.to_string()[..8]).dim()
        ),
        ChainEvent::StepStarted { index, name } => {
            format!("{} [{}] {}", SPINNER, index + 1, style(name).cyan())
        }
        ChainEvent::StepAdvanced { index, name } => {
            format!("{} [{}] {}", CHECK, index + 1, style(name).green())
        }
        ChainEvent::StepInterrupted {
            index,
            name,
            message,
        } => format!(
            "{} [{}] {}: {}",
            CROSS,
            index + 1,
            style(name).red(),
            style(message).dim()
        ),
        ChainEvent::ChainFinished { run_id, status } => format!(
            "{} Bootstrap ({}) {}",
            INFO,
            style(&run_id.to_string()[..8]).dim(),
            format_status(*status)
        ),
    }
}

/// Format one option store entry
pub fn format_option(name: &str, value: &OptionValue) -> String {
    format!("  {} = {}", style(name).bold(), style(value).cyan())
}

/// Format a playlist entry
pub fn format_track(track: &Track, is_current: bool) -> String {
    let marker = if is_current { NOTE } else { Emoji("   ", "  ") };
    let format = track
        .format()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "?".to_string());

    if track.artist.is_empty() {
        format!("{}{} [{}]", marker, style(&track.name).bold(), style(format).dim())
    } else {
        format!(
            "{}{} - {} [{}]",
            marker,
            style(&track.name).bold(),
            track.artist,
            style(format).dim()
        )
    }
}

/// Format the bound view-model as a playlist listing
pub fn format_view_model(view_model: &PlayerViewModel) -> String {
    if view_model.playlist().is_empty() {
        return format!(
            "  {} (current: {})",
            style("Empty playlist").dim(),
            view_model.current_track().name
        );
    }

    view_model
        .playlist()
        .iter()
        .enumerate()
        .map(|(i, track)| format_track(track, view_model.current_index() == Some(i)))
        .collect::<Vec<_>>()
        .join("\n")
}
