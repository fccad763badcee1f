//! CLI argument definitions for the `chatops` binary.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use clap::{Args, Parser, Subcommand};

/// ChatOps — chat-driven business automation, demoed in your terminal.
#[derive(Parser)]
#[command(
    name = "chatops",
    version,
    about = "ChatOps — chat-driven business automation demos",
    long_about = "Replays the ChatOps guided workflow demos in the terminal: scripted \
                  automation steps with timed transitions and simulated cross-platform \
                  side effects (SMS, email, calendar, dashboards)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a workflow demo for a business template.
    Demo {
        /// Template key (salon, clinic, tutor, carwash).  Unknown keys fall
        /// back to the default template.
        #[arg(default_value = "salon")]
        template: String,

        /// Playback speed factor; 0 disables all delays.
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },

    /// List the available demo templates.
    Templates,

    /// Submit a custom template request to the (mock) templates team.
    Request(RequestArgs),
}

/// Fields of a custom template request.
#[derive(Args)]
pub struct RequestArgs {
    /// Name of your business.
    #[arg(long)]
    pub business_name: String,

    /// Industry your business operates in.
    #[arg(long)]
    pub industry: String,

    /// Contact person.
    #[arg(long)]
    pub contact_name: String,

    /// Contact email.
    #[arg(long)]
    pub email: String,

    /// Contact phone number.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Company size bracket.
    #[arg(long, default_value = "1-5")]
    pub business_size: String,

    /// Description of your current manual processes.
    #[arg(long, default_value = "")]
    pub current_processes: String,

    /// Automations you need (repeat the flag for more than one).
    #[arg(long = "need")]
    pub automation_needs: Vec<String>,

    /// Desired delivery timeline.
    #[arg(long, default_value = "flexible")]
    pub timeline: String,

    /// Anything else we should know.
    #[arg(long, default_value = "")]
    pub additional_info: String,
}
