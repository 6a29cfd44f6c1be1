//! Step model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{MicroTask, Pedagogy, StepStatus};

/// Represents one ordered unit of work within a roadmap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the parent roadmap
    pub roadmap_id: u64,

    /// Order of the step within the roadmap (1-based, immutable)
    pub order: u32,

    /// Brief title of the step
    pub title: String,

    /// Detailed description; backfilled from the title when the caller
    /// leaves it blank
    pub description: String,

    /// Suggested timeframe, free text
    pub timeframe: Option<String>,

    /// How to approach the step, free text
    pub method: Option<String>,

    /// What to avoid while working the step
    pub avoid: Option<String>,

    /// Completion criteria, free text
    pub done_when: Option<String>,

    /// Estimated minutes for the step
    pub duration_minutes: u32,

    /// Attached resource references (URLs etc.), opaque payload
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,

    /// Optional pedagogy metadata bundle, never interpreted by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pedagogy: Option<Pedagogy>,

    /// Current status of the step
    pub status: StepStatus,

    /// When the step became current
    pub started_at: Option<Timestamp>,

    /// When the step was completed
    pub completed_at: Option<Timestamp>,

    /// Minutes the learner has reported on this step
    pub minutes_spent: u32,

    /// Learner notes recorded at completion
    pub user_notes: Option<String>,

    /// Learner difficulty rating recorded at completion
    pub difficulty_rating: Option<u8>,

    /// Inert sub-units; progression logic never consults them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub micro_tasks: Vec<MicroTask>,
}
