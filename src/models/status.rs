use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// Slack attachment color bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "danger")]
    Danger,
    #[serde(rename = "#000000")]
    Default,
}

/// CloudFormation stack statuses and the color each one is shown with.
/// Anything missing from this table falls back to [`Color::Default`].
pub const STATUS_COLORS: &[(&str, Color)] = &[
    ("CREATE_COMPLETE", Color::Good),
    ("CREATE_IN_PROGRESS", Color::Warning),
    ("CREATE_FAILED", Color::Danger),
    ("DELETE_COMPLETE", Color::Good),
    ("DELETE_FAILED", Color::Danger),
    ("DELETE_IN_PROGRESS", Color::Warning),
    ("ROLLBACK_COMPLETE", Color::Danger),
    ("ROLLBACK_FAILED", Color::Danger),
    ("ROLLBACK_IN_PROGRESS", Color::Warning),
    ("UPDATE_COMPLETE", Color::Good),
    ("UPDATE_COMPLETE_CLEANUP_IN_PROGRESS", Color::Warning),
    ("UPDATE_IN_PROGRESS", Color::Warning),
    ("UPDATE_ROLLBACK_COMPLETE", Color::Good),
    ("UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS", Color::Danger),
    ("UPDATE_ROLLBACK_FAILED", Color::Danger),
    ("UPDATE_ROLLBACK_IN_PROGRESS", Color::Danger),
];

impl Color {
    pub fn for_status(status: &str) -> Self {
        STATUS_COLORS
            .iter()
            .find(|(known, _)| *known == status)
            .map(|(_, color)| *color)
            .unwrap_or(Color::Default)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Color::Good => write!(f, "good"),
            Color::Warning => write!(f, "warning"),
            Color::Danger => write!(f, "danger"),
            Color::Default => write!(f, "#000000"),
        }
    }
}
