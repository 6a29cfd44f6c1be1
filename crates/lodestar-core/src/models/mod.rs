//! Data models for roadmaps and steps.
//!
//! This module contains the core domain models of the roadmap progression
//! engine. Display implementations live in [`crate::display::models`] to keep
//! data structures and presentation logic apart.
//!
//! The two record types carry both descriptive payload (goal text, pedagogy
//! metadata, vision bundles, produced by an external content-generation
//! process and treated as opaque here) and progress state, which is what the
//! engine actually governs:
//!
//! - A [`Roadmap`] is Active, Paused, Completed, or Abandoned, and at most
//!   one roadmap per user is the active one (`is_active`).
//! - [`Step`]s within a roadmap form a contiguous partition ordered by
//!   `order`: completed prefix, at most one current step, locked suffix.

pub mod filters;
pub mod payload;
pub mod roadmap;
pub mod status;
pub mod step;
pub mod summary;


// Re-export all public types at the models level
pub use filters::{RoadmapFilter, SortOrder, StatusFilter};
pub use payload::{CriticalWarning, MicroTask, Pedagogy, Vision};
pub use roadmap::Roadmap;
pub use status::{RoadmapStatus, StepStatus};
pub use step::Step;
pub use summary::{LearnerStats, RoadmapPage, RoadmapSummary};
