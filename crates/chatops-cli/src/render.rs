//! Terminal rendering for demo playback.
//!
//! Every function here is a pure mapping from script data and a
//! [`PlaybackSnapshot`] to text; all timing and state live in the player.
//! Completed steps show their result and integration previews, the step at
//! the cursor shows as active, everything after it as pending.

use chatops_demo::{DemoScript, DemoStep, PlaybackPhase, PlaybackSnapshot, ScriptLibrary};

/// Title block printed before playback starts.
pub fn script_header(script: &DemoScript) -> String {
    format!(
        "  {}\n  {}\n  {} steps, ~{:.1}s\n",
        script.title,
        script.description,
        script.len(),
        script.total_duration_ms() as f64 / 1000.0
    )
}

/// One line per step, badged according to the snapshot.
pub fn overview(script: &DemoScript, snapshot: &PlaybackSnapshot) -> String {
    let mut out = String::new();
    for (index, step) in script.steps.iter().enumerate() {
        let badge = if snapshot.is_step_completed(&step.id) {
            "✔"
        } else if index == snapshot.cursor && snapshot.phase == PlaybackPhase::Running {
            "▶"
        } else {
            "·"
        };
        out.push_str(&format!(
            "  {badge} {}. {} — {}\n",
            index + 1,
            step.title,
            step.description
        ));
    }
    out
}

/// Full card for a resolved step: command, result, and how it appears
/// across platforms.
pub fn step_card(step: &DemoStep, position: usize, total: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n  [{position}/{total}] {}\n", step.title));
    out.push_str(&format!("  You: {}\n", step.action_text));
    out.push_str(&format!("  ChatOps: {}\n", step.result_text));
    if !step.integrations.is_empty() {
        out.push_str("  Across your platforms:\n");
        for integration in &step.integrations {
            out.push_str(&format!("    {} {}\n", integration.icon, integration.platform));
            for line in integration.content.lines() {
                out.push_str(&format!("      {line}\n"));
            }
        }
    }
    out
}

/// Banner printed when the demo completes, with the script's headline
/// metrics.
pub fn completion_banner(script: &DemoScript) -> String {
    let mut out = String::new();
    out.push_str("\n  Demo complete!\n");
    out.push_str(&format!(
        "  You've seen how ChatOps automates a {} workflow.\n",
        script.key
    ));
    if !script.stats.is_empty() {
        let stats: Vec<String> = script
            .stats
            .iter()
            .map(|s| format!("{}: {}", s.label, s.value))
            .collect();
        out.push_str(&format!("  {}\n", stats.join("  |  ")));
    }
    out
}

/// Listing of all templates in the library.
pub fn template_listing(library: &ScriptLibrary) -> String {
    let mut out = String::new();
    for key in library.keys() {
        let script = library.get(key);
        let default_marker = if key == library.default_key() {
            " (default)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {key:<10} {} — {} steps{default_marker}\n",
            script.title,
            script.len()
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
