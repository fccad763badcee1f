//! CLI entry point for the ChatOps workflow demos.
//!
//! This binary provides the `chatops` command with subcommands for playing
//! a guided workflow demo, listing templates, and submitting a custom
//! template request against the mock backend.

mod cli;
mod render;

use anyhow::{Context, Result};
use chatops_demo::{DemoPlayer, DemoScript, PlaybackEvent, ScriptLibrary};
use chatops_services::{MockTemplateBackend, NewTemplateRequest, TemplateBackend};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::Demo { template, speed } => cmd_demo(&template, speed).await,
        cli::Commands::Templates => cmd_templates(),
        cli::Commands::Request(args) => cmd_request(args).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

// ---------------------------------------------------------------------------
// Subcommand: demo
// ---------------------------------------------------------------------------

async fn cmd_demo(template: &str, speed: f64) -> Result<()> {
    let library = ScriptLibrary::builtin();
    let script = library.get(template);
    if script.key != template {
        println!(
            "  Unknown template `{template}`, playing `{}` instead.",
            script.key
        );
    }
    let script = scale_durations(script.clone(), speed);
    info!(template = %script.key, speed, "starting demo playback");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut player = DemoPlayer::new(script).with_events(tx);

    println!("{}", render::script_header(player.script()));
    println!("{}", render::overview(player.script(), &player.snapshot().await));

    player.start().await;

    while let Some(event) = rx.recv().await {
        match event {
            PlaybackEvent::StepResolved { step_id } => {
                let position = player
                    .script()
                    .steps
                    .iter()
                    .position(|s| s.id == step_id)
                    .context("player resolved a step the script does not contain")?;
                let step = &player.script().steps[position];
                println!("{}", render::step_card(step, position + 1, player.script().len()));
            }
            PlaybackEvent::Completed => {
                println!("{}", render::completion_banner(player.script()));
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Scale every step duration by `speed`; 0 (or negative) disables delays.
fn scale_durations(mut script: DemoScript, speed: f64) -> DemoScript {
    for step in &mut script.steps {
        step.duration_ms = if speed <= 0.0 {
            0
        } else {
            (step.duration_ms as f64 / speed).round() as u64
        };
    }
    script
}

// ---------------------------------------------------------------------------
// Subcommand: templates
// ---------------------------------------------------------------------------

fn cmd_templates() -> Result<()> {
    let library = ScriptLibrary::builtin();
    println!("  Available workflow demos:\n");
    println!("{}", render::template_listing(&library));
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: request
// ---------------------------------------------------------------------------

async fn cmd_request(args: cli::RequestArgs) -> Result<()> {
    let backend = MockTemplateBackend::new();
    let stored = backend
        .submit(NewTemplateRequest {
            business_name: args.business_name,
            industry: args.industry,
            contact_name: args.contact_name,
            email: args.email,
            phone: args.phone,
            business_size: args.business_size,
            current_processes: args.current_processes,
            automation_needs: args.automation_needs,
            timeline: args.timeline,
            additional_info: args.additional_info,
        })
        .await
        .context("failed to submit template request")?;

    println!("  Request received — our templates team will be in touch.\n");
    println!(
        "{}",
        serde_json::to_string_pretty(&stored).context("failed to render stored request")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_durations_halves_at_double_speed() {
        let script = ScriptLibrary::builtin().get("salon").clone();
        let scaled = scale_durations(script.clone(), 2.0);
        assert_eq!(scaled.steps[0].duration_ms, script.steps[0].duration_ms / 2);
    }

    #[test]
    fn zero_speed_disables_delays() {
        let script = ScriptLibrary::builtin().get("clinic").clone();
        let scaled = scale_durations(script, 0.0);
        assert!(scaled.steps.iter().all(|s| s.duration_ms == 0));
    }
}
