//! Display formatting for roadmaps, steps, and summaries.
//!
//! Domain models carry their own Display implementations producing
//! markdown-formatted output; newtype wrappers cover collections so empty
//! lists render a sensible message instead of nothing.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (RoadmapSummaries, Steps)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;

pub use collections::{RoadmapSummaries, Steps};
pub use datetime::LocalDateTime;
