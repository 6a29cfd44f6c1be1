//! Core library for the Lodestar roadmap progression engine.
//!
//! This crate manages personalized learning roadmaps: ordered plans of
//! small steps that unlock one at a time as the learner completes them. It
//! provides the progression state machine, the data models, SQLite-backed
//! persistence, and error handling.
//!
//! # Progression Model
//!
//! A roadmap is an ordered list of steps with exactly one frontier: every
//! step before it is completed, the frontier step is current, everything
//! after it is locked. Completing the current step advances the frontier;
//! completing the last step completes the roadmap. Each user has at most one
//! active roadmap at a time, and activating one roadmap demotes whichever
//! was active before.
//!
//! All multi-record changes run inside a single database transaction, so
//! these invariants hold at every commit point.
//!
//! # Quick Start
//!
//! ```rust
//! use lodestar_core::{
//!     params::{CompleteStep, CreateRoadmap, StepDescriptor},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("roadmaps.db"))
//!     .build()
//!     .await?;
//!
//! // Create a roadmap; it becomes the user's active one
//! let roadmap = tracker
//!     .create_roadmap(&CreateRoadmap {
//!         user_id: "learner-1".to_string(),
//!         goal: "Play my first chess tournament".to_string(),
//!         title: "Chess Fundamentals".to_string(),
//!         steps: vec![
//!             StepDescriptor {
//!                 title: "Learn how each piece moves".to_string(),
//!                 ..Default::default()
//!             },
//!             StepDescriptor {
//!                 title: "Practice basic checkmates".to_string(),
//!                 ..Default::default()
//!             },
//!         ],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // Complete the current step; the next one unlocks
//! let refreshed = tracker
//!     .complete_step(&CompleteStep {
//!         roadmap_id: roadmap.id,
//!         step_id: roadmap.steps[0].id,
//!         user_id: "learner-1".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{refreshed}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod tracker;

// Re-export commonly used types
pub use db::Database;
pub use display::{LocalDateTime, RoadmapSummaries, Steps};
pub use error::{Result, TrackerError};
pub use models::{
    LearnerStats, MicroTask, Pedagogy, Roadmap, RoadmapFilter, RoadmapPage, RoadmapStatus,
    RoadmapSummary, SortOrder, StatusFilter, Step, StepStatus, Vision,
};
pub use params::{
    CompleteStep, CreateRoadmap, ListRoadmaps, LogStepTime, MicroTaskDescriptor, RoadmapRef,
    StepDescriptor,
};
pub use tracker::{Tracker, TrackerBuilder};
