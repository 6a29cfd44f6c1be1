//! Parameter structures for tracker operations
//!
//! Shared parameter structures that a request-handling layer can pass into
//! the engine without framework-specific derives. Each mutating operation
//! has one struct here; anything that needs validation validates *before* a
//! transaction is opened, so malformed input never touches the store.
//!
//! Interface layers that need JSON schemas can enable the `schema` feature,
//! which adds `schemars::JsonSchema` derives to every struct in this module.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::models::{Pedagogy, Vision};

/// Default per-step estimate when a descriptor supplies no duration.
pub const DEFAULT_STEP_MINUTES: u32 = 5;

/// Descriptor for one step of a new roadmap.
///
/// Only the title is required. A blank description is backfilled from the
/// title, never rejected. `order` is assigned from array position when not
/// supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepDescriptor {
    /// Title of the step (required)
    pub title: String,
    /// Detailed description; defaults to the title when blank
    pub description: Option<String>,
    /// Suggested timeframe
    pub timeframe: Option<String>,
    /// How to approach the step
    pub method: Option<String>,
    /// What to avoid
    pub avoid: Option<String>,
    /// Completion criteria
    pub done_when: Option<String>,
    /// Estimated minutes; defaults to [`DEFAULT_STEP_MINUTES`]
    pub duration_minutes: Option<u32>,
    /// Attached resource references
    #[serde(default)]
    pub resources: Vec<String>,
    /// Optional pedagogy metadata bundle
    pub pedagogy: Option<Pedagogy>,
    /// Optional micro-task descriptors (inert sub-units)
    #[serde(default)]
    pub micro_tasks: Vec<MicroTaskDescriptor>,
    /// Explicit 1-based order; array position is used when absent
    pub order: Option<u32>,
}

impl StepDescriptor {
    /// The step's duration estimate, falling back to the default.
    pub fn duration_or_default(&self) -> u32 {
        self.duration_minutes.unwrap_or(DEFAULT_STEP_MINUTES)
    }

    /// The step's description, backfilled from the title when blank.
    pub fn description_or_title(&self) -> String {
        match &self.description {
            Some(desc) if !desc.trim().is_empty() => desc.clone(),
            _ => self.title.clone(),
        }
    }
}

/// Descriptor for one micro-task of a new step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MicroTaskDescriptor {
    /// Title of the micro-task (required)
    pub title: String,
    /// Optional detail text
    pub description: Option<String>,
}

/// Parameters for creating a new roadmap.
///
/// The step list is ordered and must be non-empty. Creating a roadmap makes
/// it the owner's active one; any previously active roadmap of the same
/// owner is abandoned in the same transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateRoadmap {
    /// Identifier of the owning user (required)
    pub user_id: String,
    /// The learning goal (required)
    pub goal: String,
    /// Title of the roadmap (required)
    pub title: String,
    /// Subject area
    pub subject: Option<String>,
    /// Goal type tag
    pub goal_type: Option<String>,
    /// Multi-line overview
    pub overview: Option<String>,
    /// Pitfalls to watch for
    #[serde(default)]
    pub pitfalls: Vec<String>,
    /// What success looks like
    pub success_looks_like: Option<String>,
    /// Optional richer vision bundle
    pub vision: Option<Vision>,
    /// Total estimate in minutes; defaults to the sum of per-step estimates
    pub estimated_minutes: Option<u32>,
    /// Ordered, non-empty list of step descriptors
    #[serde(default)]
    pub steps: Vec<StepDescriptor>,
}

impl CreateRoadmap {
    /// Validate creation input before any transaction is opened.
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - missing owner, goal, or title; empty
    ///   step list; or a step without a usable title
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(TrackerError::invalid_input("user_id")
                .with_reason("An owner is required to create a roadmap"));
        }
        if self.goal.trim().is_empty() {
            return Err(
                TrackerError::invalid_input("goal").with_reason("Goal cannot be empty")
            );
        }
        if self.title.trim().is_empty() {
            return Err(
                TrackerError::invalid_input("title").with_reason("Title cannot be empty")
            );
        }
        if self.steps.is_empty() {
            return Err(TrackerError::invalid_input("steps")
                .with_reason("A roadmap requires at least one step"));
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.title.trim().is_empty() {
                return Err(TrackerError::invalid_input("steps").with_reason(format!(
                    "Step at position {index} has no usable title"
                )));
            }
        }

        // Explicit orders must form the same contiguous 1-based sequence
        // positional assignment would produce, or the roadmap ends up with
        // no current step (or a gap the progression logic cannot cross).
        let mut orders: Vec<u32> = self
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| step.order.unwrap_or(index as u32 + 1))
            .collect();
        orders.sort_unstable();
        for (index, order) in orders.iter().enumerate() {
            if *order != index as u32 + 1 {
                return Err(TrackerError::invalid_input("steps").with_reason(
                    "Step orders must form a contiguous sequence starting at 1",
                ));
            }
        }

        Ok(())
    }

    /// Total estimate: the caller's value, or the sum of per-step estimates
    /// with the 5-minute default for steps that carry none.
    pub fn resolved_estimate(&self) -> u32 {
        self.estimated_minutes
            .unwrap_or_else(|| self.steps.iter().map(StepDescriptor::duration_or_default).sum())
    }
}

/// Owner-scoped reference to a roadmap.
///
/// Used for lifecycle operations (pause, resume, archive, set-active,
/// delete) and for ownership-checked fetches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RoadmapRef {
    /// The roadmap to operate on
    pub roadmap_id: u64,
    /// The caller; must own the roadmap
    pub user_id: String,
}

/// Parameters for completing the current step of a roadmap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompleteStep {
    /// The roadmap the step belongs to
    pub roadmap_id: u64,
    /// The step to complete; must be the current step
    pub step_id: u64,
    /// The caller; must own the roadmap
    pub user_id: String,
    /// Optional learner notes recorded with the completion
    pub notes: Option<String>,
    /// Optional difficulty rating recorded with the completion
    pub difficulty_rating: Option<u8>,
    /// Actual minutes spent; defaults to the step's estimate when absent
    pub minutes_spent: Option<u32>,
}

/// Parameters for incremental time tracking on an in-progress step.
///
/// Distinct from the final `minutes_spent` recorded at completion: this adds
/// to the running totals without touching step status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LogStepTime {
    /// The roadmap the step belongs to
    pub roadmap_id: u64,
    /// The step to log time against
    pub step_id: u64,
    /// The caller; must own the roadmap
    pub user_id: String,
    /// Minutes to add
    pub minutes: u32,
}

/// Parameters for listing a user's roadmaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListRoadmaps {
    /// The owner whose roadmaps to list
    pub user_id: String,
    /// Status filter: 'active', 'paused', 'completed', or 'all' (default)
    pub status: Option<String>,
    /// Case-insensitive free-text search over goal, title, and subject
    pub search: Option<String>,
    /// Sort order: 'recent' (default), 'oldest', 'progress', or 'name'
    pub sort: Option<String>,
    /// Number of rows to skip
    #[serde(default)]
    pub offset: u32,
    /// Maximum number of rows to return
    pub limit: Option<u32>,
    /// Include abandoned roadmaps (excluded by default)
    #[serde(default)]
    pub include_abandoned: bool,
}
