//! Status enumerations for roadmaps and steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of roadmap statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapStatus {
    /// Roadmap is in progress
    #[default]
    Active,

    /// Roadmap is parked; it can be resumed later
    Paused,

    /// Every step has been completed
    Completed,

    /// Terminal state: the roadmap was deleted or demoted and can never be
    /// resumed or reactivated
    Abandoned,
}

impl FromStr for RoadmapStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(RoadmapStatus::Active),
            "paused" => Ok(RoadmapStatus::Paused),
            "completed" => Ok(RoadmapStatus::Completed),
            "abandoned" => Ok(RoadmapStatus::Abandoned),
            _ => Err(format!("Invalid roadmap status: {s}")),
        }
    }
}

impl RoadmapStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadmapStatus::Active => "active",
            RoadmapStatus::Paused => "paused",
            RoadmapStatus::Completed => "completed",
            RoadmapStatus::Abandoned => "abandoned",
        }
    }

    /// Whether the status permits any further lifecycle transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoadmapStatus::Abandoned)
    }
}

/// Type-safe enumeration of step statuses.
///
/// Step statuses within one roadmap always form a contiguous partition: a
/// prefix of `Completed` steps, at most one `Current` step, then a suffix of
/// `Locked` steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step is not yet reachable; a predecessor must complete first
    Locked,

    /// The single step the learner is working on right now
    Current,

    /// Step has been completed (terminal for the step)
    Completed,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "locked" => Ok(StepStatus::Locked),
            "current" => Ok(StepStatus::Current),
            "completed" => Ok(StepStatus::Completed),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Locked => "locked",
            StepStatus::Current => "current",
            StepStatus::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Icons Used
    /// - `✓ Completed` - Checkmark for finished steps
    /// - `➤ Current` - Arrow for the step in progress
    /// - `○ Locked` - Circle for steps not yet unlocked
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✓ Completed",
            StepStatus::Current => "➤ Current",
            StepStatus::Locked => "○ Locked",
        }
    }
}
