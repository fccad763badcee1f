//! Guided workflow demo engine for ChatOps.
//!
//! This crate provides:
//!
//! - **Script model**: immutable demo scripts — ordered automation steps
//!   with chat commands, results, delays, and simulated cross-platform
//!   integration previews — via [`script::DemoScript`].
//! - **Script library**: builtin per-template scripts with a total lookup
//!   that falls back to a default for unknown keys, via
//!   [`library::ScriptLibrary`].
//! - **Playback engine**: the `Idle / Running / Paused / Complete` state
//!   machine replaying a script on a cancellable one-shot timer, via
//!   [`player::DemoPlayer`].

pub mod error;
pub mod library;
pub mod player;
pub mod script;

pub use error::{DemoError, Result};
pub use library::ScriptLibrary;
pub use player::{DemoPlayer, PlaybackEvent, PlaybackPhase, PlaybackSnapshot};
pub use script::{DemoScript, DemoStat, DemoStep, Integration, IntegrationKind};
