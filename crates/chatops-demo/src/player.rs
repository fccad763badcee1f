//! Demo playback engine.
//!
//! [`DemoPlayer`] drives a [`DemoScript`] through its steps on a cancellable
//! one-shot timer, exposing `start` / `pause` / `resume` / `reset` control
//! and emitting [`PlaybackEvent`]s through a tokio channel for a renderer to
//! observe.  Control calls that are invalid for the current phase are
//! silent no-ops; playback itself never fails.
//!
//! Cancellation is the one safety-critical invariant here: every transition
//! out of `Running` aborts the in-flight timer task *and* bumps a run
//! generation that the timer re-checks under the state lock before touching
//! anything, so a late-firing timer can never resurrect stale progress
//! after a `reset()`.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};

use crate::script::DemoScript;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The current phase of a demo playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Loaded but not started.
    Idle,
    /// A step timer is in flight.
    Running,
    /// Paused by the user; the current step will restart with its full
    /// duration on resume.
    Paused,
    /// All steps have resolved.  Terminal until `reset()`.
    Complete,
}

/// A read-only view of playback state, taken after any transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackSnapshot {
    /// Key of the loaded script.
    pub script_key: String,
    /// Current phase.
    pub phase: PlaybackPhase,
    /// Index of the step in flight or about to start (`0..=steps.len()`).
    pub cursor: usize,
    /// Ids of fully resolved steps, in completion order (equal to step
    /// order).
    pub completed: Vec<String>,
}

impl PlaybackSnapshot {
    /// Whether the step with `id` has resolved.
    pub fn is_step_completed(&self, id: &str) -> bool {
        self.completed.iter().any(|c| c == id)
    }
}

/// Event emitted after each playback transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Playback started from idle.
    Started,
    /// The step with `step_id` resolved.
    StepResolved { step_id: String },
    /// Playback was paused.
    Paused,
    /// Playback resumed at the current step.
    Resumed,
    /// Playback was reset to idle.
    Reset,
    /// The final step resolved; playback is complete.
    Completed,
}

/// Mutable playback state, owned by the player and shared with the timer
/// task.  `generation` is bumped on every transition out of `Running`, which
/// invalidates any timer still in flight for the previous run.
struct PlaybackState {
    phase: PlaybackPhase,
    cursor: usize,
    completed: Vec<String>,
    generation: u64,
}

// ---------------------------------------------------------------------------
// DemoPlayer
// ---------------------------------------------------------------------------

/// The playback controller: a state machine advancing one script over time
/// under user pause/resume/reset control.
///
/// Not tied to any rendering surface; callers observe state through
/// [`DemoPlayer::snapshot`] or the optional event channel.
pub struct DemoPlayer {
    /// The loaded script.  Immutable for the player's lifetime.
    script: Arc<DemoScript>,
    /// Shared mutable state.
    state: Arc<Mutex<PlaybackState>>,
    /// Optional event sink for renderers.
    events: Option<mpsc::UnboundedSender<PlaybackEvent>>,
    /// Handle to the in-flight timer task, if any.
    driver: Option<tokio::task::JoinHandle<()>>,
}

impl DemoPlayer {
    /// Create a player for `script`, starting in `Idle` with an empty
    /// completed set.
    pub fn new(script: DemoScript) -> Self {
        Self {
            script: Arc::new(script),
            state: Arc::new(Mutex::new(PlaybackState {
                phase: PlaybackPhase::Idle,
                cursor: 0,
                completed: Vec::new(),
                generation: 0,
            })),
            events: None,
            driver: None,
        }
    }

    /// Attach an event sink.  Delivery is best-effort: a dropped receiver
    /// never affects playback.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<PlaybackEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// The loaded script.
    pub fn script(&self) -> &DemoScript {
        &self.script
    }

    /// Take a snapshot of the current playback state.
    pub async fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.state.lock().await;
        PlaybackSnapshot {
            script_key: self.script.key.clone(),
            phase: state.phase,
            cursor: state.cursor,
            completed: state.completed.clone(),
        }
    }

    /// Begin playback from idle.  A no-op in any other phase, including
    /// `Complete` (call [`DemoPlayer::reset`] first to replay).
    ///
    /// The first step resolves asynchronously even when its duration is
    /// zero; control returns immediately.
    pub async fn start(&mut self) {
        let generation = {
            let mut state = self.state.lock().await;
            if state.phase != PlaybackPhase::Idle {
                debug!(phase = ?state.phase, "start ignored: playback is not idle");
                return;
            }
            state.phase = PlaybackPhase::Running;
            state.generation += 1;
            state.generation
        };
        info!(script = %self.script.key, steps = self.script.len(), "demo playback started");
        self.emit(PlaybackEvent::Started);
        self.spawn_driver(generation);
    }

    /// Pause playback.  A no-op unless running.
    ///
    /// Cancels the in-flight step timer without marking the step complete;
    /// the cursor is unchanged, so resume restarts the step with its full
    /// original duration.
    pub async fn pause(&mut self) {
        {
            let mut state = self.state.lock().await;
            if state.phase != PlaybackPhase::Running {
                debug!(phase = ?state.phase, "pause ignored: playback is not running");
                return;
            }
            state.phase = PlaybackPhase::Paused;
            state.generation += 1;
        }
        self.abort_driver();
        debug!(script = %self.script.key, "demo playback paused");
        self.emit(PlaybackEvent::Paused);
    }

    /// Resume playback at the current step.  A no-op unless paused.
    pub async fn resume(&mut self) {
        let generation = {
            let mut state = self.state.lock().await;
            if state.phase != PlaybackPhase::Paused {
                debug!(phase = ?state.phase, "resume ignored: playback is not paused");
                return;
            }
            state.phase = PlaybackPhase::Running;
            state.generation += 1;
            state.generation
        };
        debug!(script = %self.script.key, "demo playback resumed");
        self.emit(PlaybackEvent::Resumed);
        self.spawn_driver(generation);
    }

    /// Return to idle from any phase: cancel any outstanding timer, clear
    /// completed steps, and move the cursor back to the first step.
    pub async fn reset(&mut self) {
        {
            let mut state = self.state.lock().await;
            state.phase = PlaybackPhase::Idle;
            state.cursor = 0;
            state.completed.clear();
            state.generation += 1;
        }
        self.abort_driver();
        debug!(script = %self.script.key, "demo playback reset");
        self.emit(PlaybackEvent::Reset);
    }

    /// Spawn the timer task for the run identified by `generation`.
    ///
    /// The task resolves steps strictly in order: it sleeps the current
    /// step's duration, marks it complete, and re-arms for the next step
    /// until the script is exhausted.  Before every mutation it re-checks
    /// the generation under the state lock; a mismatch means the run was
    /// paused or reset while the timer slept, and the task exits without
    /// touching anything.
    fn spawn_driver(&mut self, generation: u64) {
        let script = Arc::clone(&self.script);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();

        self.driver = Some(tokio::spawn(async move {
            loop {
                let duration = {
                    let mut state = state.lock().await;
                    if state.generation != generation {
                        return;
                    }
                    match script.steps.get(state.cursor) {
                        Some(step) => Duration::from_millis(step.duration_ms),
                        // Unreachable for valid scripts; treat an exhausted
                        // cursor as an already-finished run.
                        None => {
                            state.phase = PlaybackPhase::Complete;
                            send(&events, PlaybackEvent::Completed);
                            return;
                        }
                    }
                };

                tokio::time::sleep(duration).await;

                let mut state = state.lock().await;
                if state.generation != generation {
                    // Paused or reset while the timer was in flight.
                    return;
                }
                let step_id = script.steps[state.cursor].id.clone();
                state.completed.push(step_id.clone());
                state.cursor += 1;
                debug!(step_id = %step_id, cursor = state.cursor, "demo step resolved");
                send(&events, PlaybackEvent::StepResolved { step_id });

                if state.cursor == script.steps.len() {
                    state.phase = PlaybackPhase::Complete;
                    info!(script = %script.key, "demo playback complete");
                    send(&events, PlaybackEvent::Completed);
                    return;
                }
            }
        }));
    }

    /// Abort the in-flight timer task, if any.  The generation bump made by
    /// the caller already invalidated it; aborting just stops the sleep
    /// early.
    fn abort_driver(&mut self) {
        if let Some(handle) = self.driver.take() {
            handle.abort();
        }
    }

    fn emit(&self, event: PlaybackEvent) {
        send(&self.events, event);
    }
}

fn send(events: &Option<mpsc::UnboundedSender<PlaybackEvent>>, event: PlaybackEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

impl Drop for DemoPlayer {
    fn drop(&mut self) {
        self.abort_driver();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{DemoScript, DemoStep};
    use tokio::time::advance;

    fn step(id: &str, duration_ms: u64) -> DemoStep {
        DemoStep {
            id: id.into(),
            title: id.to_uppercase(),
            description: format!("step {id}"),
            action_text: format!("\"run {id}\""),
            result_text: format!("{id} done"),
            duration_ms,
            integrations: Vec::new(),
        }
    }

    fn script(steps: Vec<DemoStep>) -> DemoScript {
        DemoScript {
            key: "test".into(),
            title: "Test Demo".into(),
            description: "test".into(),
            steps,
            stats: Vec::new(),
        }
    }

    /// [A(500ms), B(0ms), C(1000ms)] — the reference scenario.
    fn abc_script() -> DemoScript {
        script(vec![step("a", 500), step("b", 0), step("c", 1000)])
    }

    /// Let spawned timer tasks run up to their next sleep.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    /// Advance virtual time in 100ms ticks so sequentially armed timers
    /// fire at their intended offsets.
    async fn advance_ticks(total_ms: u64) {
        for _ in 0..total_ms / 100 {
            advance(Duration::from_millis(100)).await;
            settle().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_resolves_all_steps_in_order() {
        let mut player = DemoPlayer::new(abc_script());
        player.start().await;
        settle().await;

        advance_ticks(1600).await;

        let snap = player.snapshot().await;
        assert_eq!(snap.phase, PlaybackPhase::Complete);
        assert_eq!(snap.cursor, 3);
        assert_eq!(snap.completed, vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn steps_resolve_at_their_cumulative_offsets() {
        let mut player = DemoPlayer::new(abc_script());
        player.start().await;
        settle().await;

        // t=400: nothing resolved yet.
        advance_ticks(400).await;
        assert_eq!(player.snapshot().await.completed, Vec::<String>::new());

        // t=500: A resolves, and B (0ms) resolves on the next scheduling
        // opportunity without any further time.
        advance_ticks(100).await;
        let snap = player.snapshot().await;
        assert_eq!(snap.completed, vec!["a", "b"]);
        assert_eq!(snap.phase, PlaybackPhase::Running);

        // t=1400: C (armed at t=500, 1000ms) still pending.
        advance_ticks(900).await;
        assert_eq!(player.snapshot().await.completed, vec!["a", "b"]);

        // t=1500: C resolves and playback completes.
        advance_ticks(100).await;
        let snap = player.snapshot().await;
        assert_eq!(snap.completed, vec!["a", "b", "c"]);
        assert_eq!(snap.phase, PlaybackPhase::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn single_step_script_runs_to_complete() {
        let mut player = DemoPlayer::new(script(vec![step("only", 300)]));
        player.start().await;
        settle().await;

        advance_ticks(300).await;

        let snap = player.snapshot().await;
        assert_eq!(snap.phase, PlaybackPhase::Complete);
        assert_eq!(snap.completed, vec!["only"]);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_step_does_not_resolve_synchronously() {
        let mut player = DemoPlayer::new(script(vec![step("zero", 0)]));
        player.start().await;

        // No yield yet: the step must not have resolved inside start().
        let snap = player.snapshot().await;
        assert_eq!(snap.phase, PlaybackPhase::Running);
        assert!(snap.completed.is_empty());

        settle().await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_state_and_resume_rearms_full_duration() {
        let mut player = DemoPlayer::new(script(vec![step("slow", 500)]));
        player.start().await;
        settle().await;

        // Pause at t=100, well before the step resolves.
        advance_ticks(100).await;
        player.pause().await;
        settle().await;

        // Nothing completes while paused, no matter how long.
        advance_ticks(2000).await;
        let snap = player.snapshot().await;
        assert_eq!(snap.phase, PlaybackPhase::Paused);
        assert_eq!(snap.cursor, 0);
        assert!(snap.completed.is_empty());

        // Resume re-arms the full 500ms, not the remaining 400ms.
        player.resume().await;
        settle().await;
        advance_ticks(400).await;
        assert!(player.snapshot().await.completed.is_empty());

        advance_ticks(100).await;
        let snap = player.snapshot().await;
        assert_eq!(snap.phase, PlaybackPhase::Complete);
        // Resolved exactly once: no double-completion, no skipped step.
        assert_eq!(snap.completed, vec!["slow"]);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_idle_from_every_phase() {
        // Idle.
        let mut player = DemoPlayer::new(abc_script());
        player.reset().await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Idle);

        // Running.
        player.start().await;
        settle().await;
        advance_ticks(600).await;
        assert!(!player.snapshot().await.completed.is_empty());
        player.reset().await;
        let snap = player.snapshot().await;
        assert_eq!(
            (snap.phase, snap.cursor, snap.completed.len()),
            (PlaybackPhase::Idle, 0, 0)
        );

        // Paused.
        player.start().await;
        settle().await;
        player.pause().await;
        player.reset().await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Idle);

        // Complete.
        player.start().await;
        settle().await;
        advance_ticks(1600).await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Complete);
        player.reset().await;
        let snap = player.snapshot().await;
        assert_eq!(
            (snap.phase, snap.cursor, snap.completed.len()),
            (PlaybackPhase::Idle, 0, 0)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn timer_armed_before_reset_never_mutates_reset_state() {
        let mut player = DemoPlayer::new(script(vec![step("stale", 500)]));
        player.start().await;
        settle().await;

        advance_ticks(100).await;
        player.reset().await;

        // Advance well past the old timer's deadline.  If the stale timer
        // still fired it would push "stale" into completed.
        advance_ticks(5000).await;

        let snap = player.snapshot().await;
        assert_eq!(snap.phase, PlaybackPhase::Idle);
        assert_eq!(snap.cursor, 0);
        assert!(snap.completed.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn replay_after_reset_completes_again() {
        let mut player = DemoPlayer::new(abc_script());
        player.start().await;
        settle().await;
        advance_ticks(1600).await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Complete);

        player.reset().await;
        player.start().await;
        settle().await;
        advance_ticks(1600).await;

        let snap = player.snapshot().await;
        assert_eq!(snap.phase, PlaybackPhase::Complete);
        assert_eq!(snap.completed, vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_control_calls_are_noops() {
        let mut player = DemoPlayer::new(abc_script());

        // pause/resume from idle do nothing.
        player.pause().await;
        player.resume().await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Idle);

        // start while running does not restart the current step.
        player.start().await;
        settle().await;
        advance_ticks(400).await;
        player.start().await;
        settle().await;
        advance_ticks(100).await;
        assert_eq!(player.snapshot().await.completed, vec!["a", "b"]);

        // resume while running does nothing.
        player.resume().await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Running);

        // start while complete stays complete.
        advance_ticks(1100).await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Complete);
        player.start().await;
        settle().await;
        assert_eq!(player.snapshot().await.phase, PlaybackPhase::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn events_trace_the_full_lifecycle() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut player = DemoPlayer::new(abc_script()).with_events(tx);

        player.start().await;
        settle().await;
        advance_ticks(300).await;
        player.pause().await;
        player.resume().await;
        settle().await;
        advance_ticks(1600).await;
        player.reset().await;

        let mut seen = Vec::new();
        while let Ok(event) = rx.try_recv() {
            seen.push(event);
        }
        assert_eq!(
            seen,
            vec![
                PlaybackEvent::Started,
                PlaybackEvent::Paused,
                PlaybackEvent::Resumed,
                PlaybackEvent::StepResolved { step_id: "a".into() },
                PlaybackEvent::StepResolved { step_id: "b".into() },
                PlaybackEvent::StepResolved { step_id: "c".into() },
                PlaybackEvent::Completed,
                PlaybackEvent::Reset,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_helpers_report_completion() {
        let mut player = DemoPlayer::new(abc_script());
        player.start().await;
        settle().await;
        advance_ticks(600).await;

        let snap = player.snapshot().await;
        assert!(snap.is_step_completed("a"));
        assert!(snap.is_step_completed("b"));
        assert!(!snap.is_step_completed("c"));
        assert_eq!(snap.script_key, "test");
    }
}
