//! High-level progression API for managing roadmaps and steps.
//!
//! This module provides the main [`Tracker`] interface of the roadmap
//! progression engine. The tracker coordinates between callers and the
//! database, implementing the progression rules for roadmaps, steps, and
//! time tracking.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances with configuration
//! - [`roadmap_ops`]: Roadmap lifecycle operations (create, pause, resume, etc.)
//! - [`step_ops`]: Step progression operations (complete, log time, list)
//! - [`query_ops`]: Read-side queries (listing, statistics)
//!
//! # Usage Examples
//!
//! ## Creating a Tracker
//!
//! ```rust
//! use lodestar_core::TrackerBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create with default database path
//! let tracker = TrackerBuilder::new().build().await?;
//!
//! // Or specify custom database path
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("/custom/path/roadmaps.db"))
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Roadmap Operations
//!
//! ```rust
//! use lodestar_core::{
//!     params::{CompleteStep, CreateRoadmap, StepDescriptor},
//!     TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new().build().await?;
//!
//! // Create a roadmap; it becomes the user's active one
//! let roadmap = tracker
//!     .create_roadmap(&CreateRoadmap {
//!         user_id: "learner-1".to_string(),
//!         goal: "Learn to read sheet music".to_string(),
//!         title: "Sheet Music Basics".to_string(),
//!         steps: vec![StepDescriptor {
//!             title: "Learn the staff".to_string(),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // Complete the current step
//! let step_id = roadmap.steps[0].id;
//! let refreshed = tracker
//!     .complete_step(&CompleteStep {
//!         roadmap_id: roadmap.id,
//!         step_id,
//!         user_id: "learner-1".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

// Module declarations
pub mod builder;
pub mod query_ops;
pub mod roadmap_ops;
pub mod step_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::TrackerBuilder;

/// Main tracker interface for managing roadmaps and steps.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
}

impl Tracker {
    /// Creates a new tracker with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
