//! Builtin demo script library.
//!
//! [`ScriptLibrary`] maps business template keys to their [`DemoScript`].
//! Lookup is total: an unrecognized key resolves to the default script
//! (the salon template) instead of failing, so the player never observes a
//! missing script during normal operation.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::script::{DemoScript, DemoStat, DemoStep, Integration, IntegrationKind};

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// Immutable lookup from template key to demo script, with a designated
/// default for unknown keys.
pub struct ScriptLibrary {
    /// The fallback script, kept out of the map so lookup can never fail.
    default: DemoScript,
    /// All remaining scripts, keyed by template key.
    scripts: HashMap<String, DemoScript>,
}

impl ScriptLibrary {
    /// Create a library containing only `default`.
    pub fn new(default: DemoScript) -> Self {
        Self {
            default,
            scripts: HashMap::new(),
        }
    }

    /// The library shipped with ChatOps: salon (default), clinic, tutor,
    /// and car wash workflow demos.
    pub fn builtin() -> Self {
        let mut library = Self::new(salon_script());
        for script in [clinic_script(), tutor_script(), carwash_script()] {
            // Builtin scripts are statically valid; insert cannot fail.
            let _ = library.insert(script);
        }
        library
    }

    /// Look up the script for `key`.
    ///
    /// Total function: unknown keys deterministically resolve to the
    /// default script.
    pub fn get(&self, key: &str) -> &DemoScript {
        if key == self.default.key {
            return &self.default;
        }
        self.scripts.get(key).unwrap_or_else(|| {
            debug!(key, default = %self.default.key, "unknown template key, using default script");
            &self.default
        })
    }

    /// The template key of the default script.
    pub fn default_key(&self) -> &str {
        &self.default.key
    }

    /// All template keys, sorted, default included.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.scripts.keys().map(String::as_str).collect();
        keys.push(self.default.key.as_str());
        keys.sort_unstable();
        keys
    }

    /// Add a script to the library, validating it first.  Replaces any
    /// existing script with the same key (the default cannot be replaced).
    pub fn insert(&mut self, script: DemoScript) -> Result<()> {
        script.validate()?;
        self.scripts.insert(script.key.clone(), script);
        Ok(())
    }
}

impl Default for ScriptLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Builtin scripts
// ---------------------------------------------------------------------------

fn step(
    id: &str,
    title: &str,
    description: &str,
    action_text: &str,
    result_text: &str,
    duration_ms: u64,
    integrations: Vec<Integration>,
) -> DemoStep {
    DemoStep {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        action_text: action_text.into(),
        result_text: result_text.into(),
        duration_ms,
        integrations,
    }
}

fn salon_script() -> DemoScript {
    DemoScript {
        key: "salon".into(),
        title: "Hair Salon Workflow Demo".into(),
        description: "See how ChatOps automates your salon operations".into(),
        steps: vec![
            step(
                "booking",
                "Appointment Booking",
                "Client requests appointment via chat",
                "\"Book Sarah for highlights at 2PM tomorrow\"",
                "✅ Appointment confirmed for Sarah at 2:00 PM tomorrow. SMS confirmation sent.",
                2000,
                vec![
                    Integration::new(
                        "SMS",
                        "📱",
                        "Hi Sarah! Your highlights appointment is confirmed for tomorrow at 2:00 PM. Reply STOP to cancel.",
                        IntegrationKind::Sms,
                    ),
                    Integration::new(
                        "Google Calendar",
                        "📅",
                        "Sarah - Highlights Appointment\nTomorrow 2:00 PM - 3:30 PM\nHair Salon & Spa",
                        IntegrationKind::Calendar,
                    ),
                    Integration::new(
                        "Dashboard",
                        "🖥️",
                        "New appointment: Sarah - Highlights - Tomorrow 2:00 PM\nStatus: Confirmed",
                        IntegrationKind::Dashboard,
                    ),
                ],
            ),
            step(
                "reminder",
                "Reminder Sent",
                "Automated reminder 24h before appointment",
                "System: \"Sending reminder to Sarah\"",
                "📱 Reminder sent to Sarah: \"Your highlights appointment is tomorrow at 2PM. Reply STOP to cancel.\"",
                1500,
                vec![
                    Integration::new(
                        "WhatsApp",
                        "💬",
                        "Hi Sarah! Just a friendly reminder: your highlights appointment is tomorrow at 2:00 PM. Looking forward to seeing you! 💇‍♀️",
                        IntegrationKind::Whatsapp,
                    ),
                    Integration::new(
                        "Email",
                        "📧",
                        "Subject: Appointment Reminder - Tomorrow 2:00 PM\nHi Sarah, this is a reminder for your highlights appointment tomorrow at 2:00 PM...",
                        IntegrationKind::Email,
                    ),
                ],
            ),
            step(
                "completion",
                "Service Completion",
                "Mark service as completed",
                "\"Complete Sarah's highlights service\"",
                "✨ Service marked complete. Follow-up survey sent to Sarah.",
                1800,
                vec![
                    Integration::new(
                        "Dashboard",
                        "🖥️",
                        "Service completed: Sarah - Highlights\nDuration: 1h 30m\nRevenue: $85\nNext: Follow-up survey sent",
                        IntegrationKind::Dashboard,
                    ),
                    Integration::new(
                        "Email Survey",
                        "📊",
                        "Hi Sarah! How was your highlights experience? Rate us 1-5 stars and share your feedback...",
                        IntegrationKind::Email,
                    ),
                ],
            ),
            step(
                "invoice",
                "Invoice Generation",
                "Generate and send invoice",
                "\"Generate invoice for Sarah, $85\"",
                "📄 Invoice generated: $85 for highlights service. Payment link sent to Sarah.",
                1600,
                vec![
                    Integration::new(
                        "PDF Invoice",
                        "📄",
                        "INVOICE #2024-001\nSarah Johnson\nHighlights Service: $85\nDue: Immediately\nPayment Link: pay.chatops.com/abc123",
                        IntegrationKind::Pdf,
                    ),
                    Integration::new(
                        "Payment Link",
                        "💳",
                        "Payment Request: $85\nService: Highlights\nDue: Now\nClick to pay securely",
                        IntegrationKind::Notification,
                    ),
                ],
            ),
        ],
        stats: vec![
            DemoStat::new("Time Saved", "15 min"),
            DemoStat::new("Automations", "4"),
            DemoStat::new("Customer Touchpoints", "3"),
        ],
    }
}

fn clinic_script() -> DemoScript {
    DemoScript {
        key: "clinic".into(),
        title: "Medical Clinic Workflow Demo".into(),
        description: "Streamline patient care with intelligent automation".into(),
        steps: vec![
            step(
                "scheduling",
                "Patient Scheduling",
                "Schedule new patient appointment",
                "\"Schedule John for annual checkup Friday 10AM\"",
                "🏥 Appointment scheduled: John Smith, Annual Checkup, Friday 10:00 AM. Intake form sent.",
                2000,
                vec![
                    Integration::new(
                        "Outlook Calendar",
                        "📅",
                        "John Smith - Annual Checkup\nFriday 10:00 AM - 11:00 AM\nMedical Clinic\nRoom: 2A",
                        IntegrationKind::Calendar,
                    ),
                    Integration::new(
                        "Patient Portal",
                        "🏥",
                        "Appointment confirmed: Friday 10:00 AM\nPlease complete intake form before arrival",
                        IntegrationKind::Dashboard,
                    ),
                ],
            ),
            step(
                "intake",
                "Intake Form",
                "Patient completes digital intake",
                "System: \"John completed intake form\"",
                "📋 Intake form completed. Medical history reviewed. Ready for appointment.",
                1500,
                vec![
                    Integration::new(
                        "Patient Database",
                        "💾",
                        "John Smith - Intake Complete\nMedical History: Updated\nAllergies: None\nReady for appointment",
                        IntegrationKind::Dashboard,
                    ),
                    Integration::new(
                        "Email Confirmation",
                        "📧",
                        "Hi John, your intake form has been received and reviewed. You're all set for Friday's appointment!",
                        IntegrationKind::Email,
                    ),
                ],
            ),
            step(
                "follow-up",
                "Follow-up Care",
                "Schedule follow-up appointment",
                "\"Schedule John for 3-month follow-up\"",
                "📅 Follow-up scheduled: John Smith, 3-month follow-up, March 15th.",
                1800,
                vec![
                    Integration::new(
                        "SMS Reminder",
                        "📱",
                        "Hi John, your 3-month follow-up is scheduled for March 15th at 10:00 AM. Reply to confirm.",
                        IntegrationKind::Sms,
                    ),
                    Integration::new(
                        "Doctor Dashboard",
                        "👨‍⚕️",
                        "Follow-up scheduled: John Smith\nDate: March 15th\nTime: 10:00 AM\nNotes: Monitor progress",
                        IntegrationKind::Dashboard,
                    ),
                ],
            ),
        ],
        stats: vec![
            DemoStat::new("Time Saved", "20 min"),
            DemoStat::new("Automations", "3"),
            DemoStat::new("Patient Touchpoints", "2"),
        ],
    }
}

fn tutor_script() -> DemoScript {
    DemoScript {
        key: "tutor".into(),
        title: "Private Tutor Workflow Demo".into(),
        description: "Manage lessons and track student progress automatically".into(),
        steps: vec![
            step(
                "lesson",
                "Lesson Scheduling",
                "Schedule tutoring session",
                "\"Schedule Emma for math lesson Tuesday 4PM\"",
                "📚 Lesson scheduled: Emma, Math, Tuesday 4:00 PM. Reminder sent to parents.",
                2000,
                vec![
                    Integration::new(
                        "Parent Email",
                        "📧",
                        "Hi Mr. & Mrs. Johnson, Emma's math lesson is scheduled for Tuesday at 4:00 PM. Please confirm attendance.",
                        IntegrationKind::Email,
                    ),
                    Integration::new(
                        "Tutor Calendar",
                        "📅",
                        "Emma Johnson - Math Lesson\nTuesday 4:00 PM - 5:00 PM\nSubject: Fractions & Decimals",
                        IntegrationKind::Calendar,
                    ),
                ],
            ),
            step(
                "progress",
                "Progress Tracking",
                "Update student progress",
                "\"Update Emma's math progress: Fractions mastered\"",
                "📊 Progress updated: Emma mastered fractions. Progress report generated for parents.",
                1500,
                vec![
                    Integration::new(
                        "Progress Report",
                        "📊",
                        "Emma Johnson - Math Progress Report\nFractions: ✅ Mastered\nDecimals: 🔄 In Progress\nNext Goal: Percentages",
                        IntegrationKind::Pdf,
                    ),
                    Integration::new(
                        "Parent Portal",
                        "👨‍👩‍👧‍👦",
                        "Emma's Progress Update\nFractions: Completed!\nNew goal: Percentages\nKeep up the great work!",
                        IntegrationKind::Dashboard,
                    ),
                ],
            ),
            step(
                "invoice",
                "Invoice Generation",
                "Generate monthly invoice",
                "\"Generate invoice for Emma's lessons this month\"",
                "💰 Invoice generated: $120 for 4 math lessons. Sent to parents via email.",
                1800,
                vec![
                    Integration::new(
                        "Monthly Invoice",
                        "💰",
                        "INVOICE #TUT-2024-003\nEmma Johnson - Math Tutoring\n4 lessons × $30 = $120\nDue: March 31st",
                        IntegrationKind::Pdf,
                    ),
                    Integration::new(
                        "Payment Reminder",
                        "💳",
                        "Payment due: $120 for Emma's math lessons\nDue date: March 31st\nClick to pay online",
                        IntegrationKind::Email,
                    ),
                ],
            ),
        ],
        stats: vec![
            DemoStat::new("Time Saved", "12 min"),
            DemoStat::new("Automations", "3"),
            DemoStat::new("Parent Touchpoints", "2"),
        ],
    }
}

fn carwash_script() -> DemoScript {
    DemoScript {
        key: "carwash".into(),
        title: "Car Wash Service Workflow Demo".into(),
        description: "Automate bookings and loyalty programs".into(),
        steps: vec![
            step(
                "booking",
                "Service Booking",
                "Book car wash service",
                "\"Book sedan wash for tomorrow 10AM\"",
                "🚗 Booking confirmed: Sedan wash, tomorrow 10:00 AM. Confirmation SMS sent.",
                2000,
                vec![
                    Integration::new(
                        "SMS Confirmation",
                        "📱",
                        "Your sedan wash is confirmed for tomorrow at 10:00 AM. Arrive 5 min early. Reply STOP to cancel.",
                        IntegrationKind::Sms,
                    ),
                    Integration::new(
                        "Service Dashboard",
                        "🖥️",
                        "New booking: Sedan wash\nTime: Tomorrow 10:00 AM\nCustomer: Regular client\nStatus: Confirmed",
                        IntegrationKind::Dashboard,
                    ),
                ],
            ),
            step(
                "loyalty",
                "Loyalty Program",
                "Apply loyalty discount",
                "\"Apply loyalty discount to regular customer\"",
                "🎯 Loyalty discount applied: 15% off for regular customer. Updated total: $17.",
                1500,
                vec![
                    Integration::new(
                        "Loyalty App",
                        "🎯",
                        "Loyalty Reward Applied!\n15% discount on sedan wash\nNew total: $17\nPoints earned: +25",
                        IntegrationKind::Notification,
                    ),
                    Integration::new(
                        "Customer Portal",
                        "👤",
                        "Welcome back, valued customer!\nLoyalty discount: 15% off\nCurrent points: 275\nNext reward: Free wash at 300 points",
                        IntegrationKind::Dashboard,
                    ),
                ],
            ),
            step(
                "update",
                "Service Update",
                "Send service completion update",
                "\"Send service completion update\"",
                "✨ Service completed! Update sent: \"Your car wash is ready. Thank you for choosing us!\"",
                1800,
                vec![
                    Integration::new(
                        "WhatsApp Update",
                        "💬",
                        "✨ Your car wash is complete and ready for pickup!\nThank you for choosing us. Rate your experience: ⭐⭐⭐⭐⭐",
                        IntegrationKind::Whatsapp,
                    ),
                    Integration::new(
                        "Email Receipt",
                        "📧",
                        "Service Complete: Sedan Wash\nDate: Today\nTotal: $17 (with loyalty discount)\nThank you for your business!",
                        IntegrationKind::Email,
                    ),
                ],
            ),
        ],
        stats: vec![
            DemoStat::new("Time Saved", "8 min"),
            DemoStat::new("Automations", "3"),
            DemoStat::new("Customer Touchpoints", "2"),
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
