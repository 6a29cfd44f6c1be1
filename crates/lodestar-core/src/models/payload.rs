//! Opaque payload bundles attached to roadmaps and steps.
//!
//! These structs hold metadata produced by the external content-generation
//! process. They are a sealed set of optional, independently-versionable
//! value types rather than a dynamic map, so the engine's invariants never
//! couple to payload shape. The engine persists them as JSON columns and
//! never branches on their contents.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Richer "vision" bundle optionally attached to a roadmap.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Vision {
    /// Free-text vision statement
    pub vision: Option<String>,

    /// Who the plan is for
    pub target_user: Option<String>,

    /// Success metrics, free text per entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_metrics: Vec<String>,

    /// Explicitly excluded topics
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub out_of_scope: Vec<String>,

    /// Optional headline warning for the learner
    pub critical_warning: Option<CriticalWarning>,

    /// Estimated calendar days to finish the roadmap
    pub estimated_days: Option<u32>,

    /// Suggested daily time commitment, free text
    pub daily_commitment: Option<String>,

    /// Milestone descriptions, free text per entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<String>,
}

/// A warning with its consequence, part of the vision bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CriticalWarning {
    pub warning: String,
    pub consequence: String,
    pub severity: Option<String>,
}

/// Pedagogy metadata optionally attached to a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Pedagogy {
    /// Which phase of the plan the step belongs to
    pub phase: Option<String>,

    /// Why this step comes first
    pub why_first: Option<String>,

    /// Why this step follows its predecessor
    pub why_after_previous: Option<String>,

    /// How the estimated time breaks down
    pub time_breakdown: Option<String>,

    /// Mistakes learners commonly make on this step
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_mistakes: Vec<String>,

    /// Self-test prompt for the learner
    pub self_test: Option<String>,

    /// Abilities the step builds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<String>,

    /// Milestone the step contributes to
    pub milestone: Option<String>,

    /// Risk note for the step
    pub risk: Option<String>,
}

/// Finer-grained sub-unit of a step.
///
/// Micro-tasks exist in the schema but are inert: step completion never
/// consults them. Informational-only until product intent says otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MicroTask {
    /// Unique identifier for the micro-task
    pub id: u64,

    /// ID of the parent step
    pub step_id: u64,

    /// Order of the micro-task within the step (1-based)
    pub order: u32,

    /// Brief title of the micro-task
    pub title: String,

    /// Optional detail text
    pub description: Option<String>,

    /// Whether the learner has ticked it off
    pub done: bool,
}
