//! Roadmap model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{RoadmapStatus, Step, Vision};

/// Represents one learning plan belonging to one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Roadmap {
    /// Unique identifier for the roadmap
    pub id: u64,

    /// Identifier of the owning user
    pub user_id: String,

    /// The learning goal, free text
    pub goal: String,

    /// Title of the roadmap
    pub title: String,

    /// Subject area, opaque payload
    pub subject: Option<String>,

    /// Goal type tag, opaque payload
    pub goal_type: Option<String>,

    /// Multi-line overview of the plan
    pub overview: Option<String>,

    /// Pitfalls the learner should watch for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pitfalls: Vec<String>,

    /// What success looks like, free text
    pub success_looks_like: Option<String>,

    /// Optional richer vision bundle, never interpreted by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<Vision>,

    /// Lifecycle status of the roadmap
    #[serde(default)]
    pub status: RoadmapStatus,

    /// Whether this is the owner's single active roadmap
    pub is_active: bool,

    /// 0-based position of the current step, or the last index once the
    /// roadmap completes
    pub current_step_index: u32,

    /// Total number of steps
    pub total_steps: u32,

    /// Count of steps with completed status; kept consistent by every
    /// mutating operation
    pub completed_steps: u32,

    /// Estimated total minutes across all steps
    pub estimated_minutes: u32,

    /// Minutes the learner has actually reported
    pub actual_minutes_spent: u32,

    /// Timestamp when the roadmap was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp of the last progression or lifecycle activity (UTC)
    pub last_activity_at: Timestamp,

    /// Timestamp when the roadmap completed, if it has
    pub completed_at: Option<Timestamp>,

    /// Associated steps, ordered by step order (eagerly loaded on fetch)
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Roadmap {
    /// Completion ratio in `[0, 1]`; 0 for a roadmap with no steps.
    pub fn completion_ratio(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            f64::from(self.completed_steps) / f64::from(self.total_steps)
        }
    }

    /// The step currently in progress, if any.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps
            .iter()
            .find(|step| step.status == super::StepStatus::Current)
    }
}
