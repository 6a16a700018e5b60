use anyhow::{Context, Result};
use bootchain::cli::commands::{RunCommand, ValidateCommand};
use bootchain::cli::output::*;
use bootchain::cli::{Cli, Command};
use bootchain::core::config::BootstrapConfig;
use bootchain::execution::ChainEvent;
use bootchain::player::{Bootstrap, CapturingBinder, InMemoryOptionStore, StaticProbe};
use std::path::Path;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_bootstrap(cmd)?,
        Command::Validate(cmd) => validate_config(cmd)?,
    }

    Ok(())
}

fn load_config(file: Option<&str>) -> Result<BootstrapConfig> {
    BootstrapConfig::load(file.map(Path::new)).context("Failed to load bootstrap config")
}

fn run_bootstrap(cmd: &RunCommand) -> Result<()> {
    let mut config = load_config(cmd.file.as_deref())?;
    let name = config.name.clone();
    if let Some(preload) = cmd.preload {
        config.player.preload = preload;
    }

    println!("{} Loaded player: {}", INFO, style(&name).bold());

    // Simulated platform capabilities
    let mut probe = StaticProbe::new().with_availability(!cmd.unavailable);
    for format in &cmd.unsupported {
        println!("{} Reporting {} as unsupported", WARN, style(format).yellow());
        probe = probe.with_unsupported(*format);
    }

    let store = InMemoryOptionStore::new();
    let binder = CapturingBinder::new();

    let mut bootstrap = Bootstrap::new(config, probe, store.clone(), binder.clone());
    if let Some(payload) = &cmd.payload {
        bootstrap = bootstrap.with_payload(payload.clone());
    }

    let mut runner = bootstrap
        .on_notification(|notification| {
            if notification.is_failure() {
                println!("{} {}", CROSS, style(notification).red());
            } else {
                println!("{} {}", CHECK, style(notification).green());
            }
        })
        .build()?;

    if !cmd.json {
        let progress = create_progress_bar(runner.len());
        runner.add_event_handler(move |event| {
            progress.println(format_chain_event(event));
            match event {
                ChainEvent::StepAdvanced { name, .. } => {
                    progress.inc(1);
                    progress.set_message(name.clone());
                }
                ChainEvent::ChainFinished { .. } => progress.finish_and_clear(),
                _ => {}
            }
        });
    }

    let exit = runner.process_chain()?;

    if cmd.json {
        let data = serde_json::json!({
            "player": name,
            "exit": exit,
            "state": runner.state(),
            "last_step_index": runner.last_run_step_index(),
            "options": store.snapshot(),
            "view_model": binder.bound(),
            "payload": runner.payload(),
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else if exit.success {
        println!("{}", separator());
        println!("{} Options written:", INFO);
        for (key, value) in store.snapshot() {
            println!("{}", format_option(&key, &value));
        }
        if let Some(view_model) = binder.bound() {
            println!("\n{} Playlist:", INFO);
            println!("{}", format_view_model(&view_model));
        }
    }

    if let Err(e) = exit.into_result() {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn validate_config(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating bootstrap config...", INFO);

    match load_config(cmd.file.as_deref()) {
        Ok(config) => {
            println!("{} Bootstrap configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!(
                "  Formats: {}",
                style(
                    config
                        .player
                        .formats
                        .iter()
                        .map(|f| f.id())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
                .cyan()
            );
            println!("  Required: {}", style(config.required_formats.len()).cyan());
            println!("  Tracks: {}", style(config.playlist.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}
