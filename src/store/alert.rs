use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a user-facing alert banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertLevel::Info => "info",
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// Current alert banner.
///
/// `generation` increases with every shown alert. A scheduled hide carries the
/// generation it was scheduled for and is ignored once a newer alert exists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlertState {
    pub message: String,
    pub level: AlertLevel,
    pub visible: bool,
    pub generation: u64,
}

impl AlertState {
    /// Show a new alert and return its generation
    pub fn show(&mut self, message: impl Into<String>, level: AlertLevel) -> u64 {
        self.generation += 1;
        self.message = message.into();
        self.level = level;
        self.visible = true;
        self.generation
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Hide only if `generation` still names the shown alert.
    pub fn hide_if_current(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }
}
