//! Demo script data model.
//!
//! A [`DemoScript`] is the fixed, ordered list of automation steps replayed
//! for one business template.  Each [`DemoStep`] carries the chat command
//! being simulated, the result shown once the step resolves, a processing
//! delay, and the cross-platform [`Integration`] previews rendered as side
//! effects.  Scripts are pure data: all timing lives in the player.

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};

// ---------------------------------------------------------------------------
// Integrations
// ---------------------------------------------------------------------------

/// The channel a simulated integration preview renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationKind {
    /// Text message to the customer's phone.
    Sms,
    /// WhatsApp chat message.
    Whatsapp,
    /// Outbound email.
    Email,
    /// Calendar entry (Google Calendar, Outlook, ...).
    Calendar,
    /// Entry on an internal dashboard or portal.
    Dashboard,
    /// Push / in-app notification.
    Notification,
    /// Generated PDF document (invoice, report).
    Pdf,
}

impl std::fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sms => write!(f, "sms"),
            Self::Whatsapp => write!(f, "whatsapp"),
            Self::Email => write!(f, "email"),
            Self::Calendar => write!(f, "calendar"),
            Self::Dashboard => write!(f, "dashboard"),
            Self::Notification => write!(f, "notification"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}

/// A simulated side-channel notification produced by a resolved step.
///
/// Purely descriptive; the player never inspects these, the renderer shows
/// them once the owning step has resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Display name of the receiving platform (e.g. "Google Calendar").
    pub platform: String,
    /// Emoji glyph shown next to the platform name.
    pub icon: String,
    /// The message body as it would appear on that platform.
    pub content: String,
    /// The channel category.
    pub kind: IntegrationKind,
}

impl Integration {
    /// Create a new integration preview.
    pub fn new(
        platform: impl Into<String>,
        icon: impl Into<String>,
        content: impl Into<String>,
        kind: IntegrationKind,
    ) -> Self {
        Self {
            platform: platform.into(),
            icon: icon.into(),
            content: content.into(),
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Steps and scripts
// ---------------------------------------------------------------------------

/// One simulated automation step within a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoStep {
    /// Unique id within the owning script.
    pub id: String,
    /// Short display title (e.g. "Appointment Booking").
    pub title: String,
    /// One-line description of what the step demonstrates.
    pub description: String,
    /// The natural-language command simulated as sent by the user.
    pub action_text: String,
    /// The message displayed once the step resolves.
    pub result_text: String,
    /// Simulated processing delay before the step resolves.
    pub duration_ms: u64,
    /// Side-channel previews rendered after the step resolves.
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

/// A headline metric shown when a demo completes ("Time Saved: 15 min").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoStat {
    /// Metric label.
    pub label: String,
    /// Pre-formatted metric value.
    pub value: String,
}

impl DemoStat {
    /// Create a new stat entry.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A complete demo script for one business template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoScript {
    /// Template key identifying the script (e.g. "salon", "clinic").
    pub key: String,
    /// Display title of the demo.
    pub title: String,
    /// Subtitle describing what the demo shows.
    pub description: String,
    /// The ordered steps; order is the only execution order.
    pub steps: Vec<DemoStep>,
    /// Headline metrics for the completion screen.
    #[serde(default)]
    pub stats: Vec<DemoStat>,
}

impl DemoScript {
    /// Parse a script from JSON and validate its invariants.
    pub fn from_json(data: &str) -> Result<Self> {
        let script: DemoScript = serde_json::from_str(data)?;
        script.validate()?;
        Ok(script)
    }

    /// Check the structural invariants: a non-empty key, at least one step,
    /// and unique step ids.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(DemoError::InvalidKey {
                reason: "script key must not be empty".into(),
            });
        }
        if self.steps.is_empty() {
            return Err(DemoError::EmptyScript {
                key: self.key.clone(),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id.as_str()) {
                return Err(DemoError::DuplicateStepId {
                    key: self.key.clone(),
                    step_id: step.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Number of steps in the script.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no steps.  Valid scripts never are.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all step durations in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.duration_ms).sum()
    }

    /// The ids of all steps, in step order.
    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
