//! Database operations and SQLite management for roadmaps and steps.
//!
//! This module provides the low-level storage operations of the progression
//! engine. It handles the SQLite connection, schema management, and the
//! transactional query interfaces for roadmaps, steps, and micro-tasks.
//!
//! Every mutating operation runs inside a single transaction and re-reads
//! the records it is about to change, so the multi-record invariants (single
//! active roadmap per owner, contiguous step statuses, consistent progress
//! counters) are never observable in a partially-applied state.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod roadmap_queries;
pub mod step_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
