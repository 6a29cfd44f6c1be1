//! Roadmap summary types and per-user statistics.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Roadmap, RoadmapStatus};

/// Lightweight roadmap view for list displays; carries no step payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapSummary {
    /// Roadmap ID
    pub id: u64,
    /// Identifier of the owning user
    pub user_id: String,
    /// Title of the roadmap
    pub title: String,
    /// The learning goal
    pub goal: String,
    /// Subject area
    pub subject: Option<String>,
    /// Lifecycle status
    pub status: RoadmapStatus,
    /// Whether this is the owner's active roadmap
    pub is_active: bool,
    /// 0-based position of the current step
    pub current_step_index: u32,
    /// Total number of steps
    pub total_steps: u32,
    /// Number of completed steps
    pub completed_steps: u32,
    /// Estimated total minutes
    pub estimated_minutes: u32,
    /// Minutes actually reported
    pub actual_minutes_spent: u32,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last activity timestamp
    pub last_activity_at: Timestamp,
    /// Completion timestamp, if completed
    pub completed_at: Option<Timestamp>,
}

impl RoadmapSummary {
    /// Completion ratio in `[0, 1]`; 0 for a roadmap with no steps.
    pub fn completion_ratio(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            f64::from(self.completed_steps) / f64::from(self.total_steps)
        }
    }
}

impl From<&Roadmap> for RoadmapSummary {
    fn from(roadmap: &Roadmap) -> Self {
        Self {
            id: roadmap.id,
            user_id: roadmap.user_id.clone(),
            title: roadmap.title.clone(),
            goal: roadmap.goal.clone(),
            subject: roadmap.subject.clone(),
            status: roadmap.status,
            is_active: roadmap.is_active,
            current_step_index: roadmap.current_step_index,
            total_steps: roadmap.total_steps,
            completed_steps: roadmap.completed_steps,
            estimated_minutes: roadmap.estimated_minutes,
            actual_minutes_spent: roadmap.actual_minutes_spent,
            created_at: roadmap.created_at,
            last_activity_at: roadmap.last_activity_at,
            completed_at: roadmap.completed_at,
        }
    }
}

/// One page of roadmap summaries with pagination bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapPage {
    /// Summaries in the requested sort order
    pub summaries: Vec<RoadmapSummary>,
    /// Total rows matching the filter, ignoring pagination
    pub total: u32,
    /// Whether rows exist past the end of this page
    pub has_more: bool,
}

/// Aggregate statistics for one user's roadmaps.
///
/// Abandoned roadmaps are excluded throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerStats {
    /// Count of non-abandoned roadmaps
    pub total_roadmaps: u32,
    /// Count of completed roadmaps
    pub completed_roadmaps: u32,
    /// The currently active roadmap, if any
    pub active_roadmap: Option<RoadmapSummary>,
    /// Total minutes reported across all non-abandoned roadmaps
    pub total_minutes_spent: u32,
    /// Mean completion ratio across non-abandoned roadmaps; 0 when the user
    /// has none
    pub average_completion: f64,
}

impl LearnerStats {
    /// Fold per-roadmap summaries into aggregate statistics.
    ///
    /// Roadmaps with zero steps contribute a ratio of 0 rather than dividing
    /// by zero, and the mean over an empty set is 0.
    pub fn from_summaries(summaries: &[RoadmapSummary]) -> Self {
        let total_roadmaps = summaries.len() as u32;
        let completed_roadmaps = summaries
            .iter()
            .filter(|s| s.status == RoadmapStatus::Completed)
            .count() as u32;
        let total_minutes_spent = summaries.iter().map(|s| s.actual_minutes_spent).sum();
        let average_completion = if summaries.is_empty() {
            0.0
        } else {
            summaries.iter().map(RoadmapSummary::completion_ratio).sum::<f64>()
                / summaries.len() as f64
        };
        let active_roadmap = summaries.iter().find(|s| s.is_active).cloned();

        Self {
            total_roadmaps,
            completed_roadmaps,
            active_roadmap,
            total_minutes_spent,
            average_completion,
        }
    }
}
