//! Roadmap lifecycle operations and queries.
//!
//! All mutating operations here open one transaction, re-read the roadmap's
//! state inside it, and apply every record change before committing, so the
//! single-active invariant and the progress counters are never observable
//! half-applied.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    db::utils::{
        json_col, list_to_json_col, opt_json_col, opt_timestamp_col, status_col, timestamp_col,
        to_json_col,
    },
    error::{DatabaseResultExt, Result, TrackerError},
    models::{LearnerStats, Roadmap, RoadmapFilter, RoadmapPage, RoadmapStatus, RoadmapSummary},
    params::CreateRoadmap,
};

const ROADMAP_COLUMNS: &str = "id, user_id, goal, title, subject, goal_type, overview, pitfalls, \
     success_looks_like, vision, status, is_active, current_step_index, total_steps, \
     completed_steps, estimated_minutes, actual_minutes_spent, created_at, last_activity_at, \
     completed_at";

const SUMMARY_COLUMNS: &str = "id, user_id, title, goal, subject, status, is_active, \
     current_step_index, total_steps, completed_steps, estimated_minutes, actual_minutes_spent, \
     created_at, last_activity_at, completed_at";

const INSERT_ROADMAP_SQL: &str = "INSERT INTO roadmaps (user_id, goal, title, subject, \
     goal_type, overview, pitfalls, success_looks_like, vision, status, is_active, \
     current_step_index, total_steps, completed_steps, estimated_minutes, actual_minutes_spent, \
     created_at, last_activity_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)";

// Demotion clears the active slot on every sibling, but only a roadmap that
// is still in progress gets abandoned; paused and completed siblings that
// happen to hold the slot keep their status.
const DEMOTE_ACTIVE_SQL: &str = "UPDATE roadmaps SET is_active = 0, \
     status = CASE WHEN status = 'active' THEN 'abandoned' ELSE status END, \
     last_activity_at = ?1 WHERE user_id = ?2 AND is_active = 1";

const DEMOTE_OTHER_ACTIVE_SQL: &str = "UPDATE roadmaps SET is_active = 0, \
     status = CASE WHEN status = 'active' THEN 'abandoned' ELSE status END, \
     last_activity_at = ?1 WHERE user_id = ?2 AND is_active = 1 AND id != ?3";

const SELECT_ROADMAP_STATUS_SQL: &str =
    "SELECT status FROM roadmaps WHERE id = ?1 AND user_id = ?2";

const SELECT_ACTIVE_ROADMAP_ID_SQL: &str =
    "SELECT id FROM roadmaps WHERE user_id = ?1 AND is_active = 1 LIMIT 1";

// Pause, archive, and activate never regress a completed roadmap's status.
const PAUSE_ROADMAP_SQL: &str = "UPDATE roadmaps SET \
     status = CASE WHEN status = 'completed' THEN status ELSE 'paused' END, \
     last_activity_at = ?1 WHERE id = ?2";

const ARCHIVE_ROADMAP_SQL: &str = "UPDATE roadmaps SET \
     status = CASE WHEN status = 'completed' THEN status ELSE 'paused' END, \
     is_active = 0, last_activity_at = ?1 WHERE id = ?2";

const ACTIVATE_ROADMAP_SQL: &str = "UPDATE roadmaps SET \
     status = CASE WHEN status = 'completed' THEN status ELSE 'active' END, \
     is_active = 1, last_activity_at = ?1 WHERE id = ?2";

const ABANDON_ROADMAP_SQL: &str = "UPDATE roadmaps SET status = 'abandoned', is_active = 0, \
     last_activity_at = ?1 WHERE id = ?2 AND user_id = ?3";

impl super::Database {
    /// Helper function to construct a Roadmap from a database row (steps are
    /// loaded separately).
    fn build_roadmap_from_row(row: &rusqlite::Row) -> rusqlite::Result<Roadmap> {
        Ok(Roadmap {
            id: row.get::<_, i64>(0)? as u64,
            user_id: row.get(1)?,
            goal: row.get(2)?,
            title: row.get(3)?,
            subject: row.get(4)?,
            goal_type: row.get(5)?,
            overview: row.get(6)?,
            pitfalls: json_col(row, 7)?,
            success_looks_like: row.get(8)?,
            vision: opt_json_col(row, 9)?,
            status: status_col(row, 10)?,
            is_active: row.get(11)?,
            current_step_index: row.get::<_, i64>(12)? as u32,
            total_steps: row.get::<_, i64>(13)? as u32,
            completed_steps: row.get::<_, i64>(14)? as u32,
            estimated_minutes: row.get::<_, i64>(15)? as u32,
            actual_minutes_spent: row.get::<_, i64>(16)? as u32,
            created_at: timestamp_col(row, 17)?,
            last_activity_at: timestamp_col(row, 18)?,
            completed_at: opt_timestamp_col(row, 19)?,
            steps: Vec::new(),
        })
    }

    /// Helper function to construct a RoadmapSummary from a database row.
    fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<RoadmapSummary> {
        Ok(RoadmapSummary {
            id: row.get::<_, i64>(0)? as u64,
            user_id: row.get(1)?,
            title: row.get(2)?,
            goal: row.get(3)?,
            subject: row.get(4)?,
            status: status_col(row, 5)?,
            is_active: row.get(6)?,
            current_step_index: row.get::<_, i64>(7)? as u32,
            total_steps: row.get::<_, i64>(8)? as u32,
            completed_steps: row.get::<_, i64>(9)? as u32,
            estimated_minutes: row.get::<_, i64>(10)? as u32,
            actual_minutes_spent: row.get::<_, i64>(11)? as u32,
            created_at: timestamp_col(row, 12)?,
            last_activity_at: timestamp_col(row, 13)?,
            completed_at: opt_timestamp_col(row, 14)?,
        })
    }

    /// Fetch a roadmap by ID with its steps eagerly loaded. No ownership
    /// check; callers that act on behalf of a user go through
    /// [`Self::fetch_owned_roadmap`].
    pub(crate) fn fetch_roadmap(conn: &Connection, id: u64) -> Result<Option<Roadmap>> {
        let sql = format!("SELECT {ROADMAP_COLUMNS} FROM roadmaps WHERE id = ?1");
        let mut roadmap = conn
            .prepare(&sql)
            .db_context("Failed to prepare roadmap query")?
            .query_row(params![id as i64], Self::build_roadmap_from_row)
            .optional()
            .db_context("Failed to query roadmap")?;

        if let Some(ref mut roadmap) = roadmap {
            roadmap.steps = Self::fetch_steps(conn, roadmap.id)?;
        }

        Ok(roadmap)
    }

    /// Fetch a roadmap by ID and owner. Absence and non-ownership are
    /// indistinguishable: both return None.
    pub(crate) fn fetch_owned_roadmap(
        conn: &Connection,
        id: u64,
        user_id: &str,
    ) -> Result<Option<Roadmap>> {
        match Self::fetch_roadmap(conn, id)? {
            Some(roadmap) if roadmap.user_id == user_id => Ok(Some(roadmap)),
            _ => Ok(None),
        }
    }

    /// Read just the status of an owned roadmap, for transition guards.
    fn roadmap_status(
        conn: &Connection,
        id: u64,
        user_id: &str,
    ) -> Result<Option<RoadmapStatus>> {
        conn.prepare(SELECT_ROADMAP_STATUS_SQL)
            .db_context("Failed to prepare status query")?
            .query_row(params![id as i64, user_id], |row| status_col(row, 0))
            .optional()
            .db_context("Failed to query roadmap status")
    }

    /// Creates a new roadmap with its steps, atomically taking over the
    /// owner's active slot. A sibling still in progress is abandoned;
    /// paused and completed siblings just lose the slot.
    ///
    /// Input is expected to be validated already (the engine layer calls
    /// [`CreateRoadmap::validate`] before any transaction opens).
    pub fn create_roadmap(&mut self, create: &CreateRoadmap) -> Result<Roadmap> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        // A new roadmap becomes the owner's single active one; demote the
        // rest in the same transaction.
        tx.execute(DEMOTE_ACTIVE_SQL, params![&now_str, &create.user_id])
            .db_context("Failed to demote active roadmaps")?;

        let pitfalls_json = list_to_json_col(&create.pitfalls)?;
        let vision_json = to_json_col(create.vision.as_ref())?;
        let total_steps = create.steps.len() as i64;
        let estimated_minutes = create.resolved_estimate();

        tx.execute(
            INSERT_ROADMAP_SQL,
            params![
                &create.user_id,
                &create.goal,
                &create.title,
                create.subject.as_deref(),
                create.goal_type.as_deref(),
                create.overview.as_deref(),
                pitfalls_json.as_deref(),
                create.success_looks_like.as_deref(),
                vision_json.as_deref(),
                RoadmapStatus::Active.as_str(),
                true,
                0i64,
                total_steps,
                0i64,
                estimated_minutes as i64,
                0i64,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert roadmap")?;

        let roadmap_id = tx.last_insert_rowid() as u64;

        Self::insert_steps(&tx, roadmap_id, &create.steps, &now)?;

        let roadmap = Self::fetch_roadmap(&tx, roadmap_id)?
            .ok_or(TrackerError::RoadmapNotFound { id: roadmap_id })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(roadmap)
    }

    /// Retrieves a roadmap by ID with an ownership check. Returns None for
    /// an absent roadmap and for one owned by somebody else.
    pub fn get_roadmap(&self, id: u64, user_id: &str) -> Result<Option<Roadmap>> {
        Self::fetch_owned_roadmap(&self.connection, id, user_id)
    }

    /// Retrieves the owner's single active roadmap, if any.
    pub fn get_active_roadmap(&self, user_id: &str) -> Result<Option<Roadmap>> {
        let id: Option<i64> = self
            .connection
            .prepare(SELECT_ACTIVE_ROADMAP_ID_SQL)
            .db_context("Failed to prepare active roadmap query")?
            .query_row(params![user_id], |row| row.get(0))
            .optional()
            .db_context("Failed to query active roadmap")?;

        match id {
            Some(id) => Self::fetch_roadmap(&self.connection, id as u64),
            None => Ok(None),
        }
    }

    /// Lists the owner's roadmaps as summaries with filtering, sorting, and
    /// offset/limit pagination. Abandoned roadmaps are excluded unless the
    /// filter explicitly asks for them.
    pub fn list_roadmaps(&self, user_id: &str, filter: &RoadmapFilter) -> Result<RoadmapPage> {
        let mut conditions = vec!["user_id = ?"];
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

        if !filter.include_abandoned {
            conditions.push("status != 'abandoned'");
        }

        if let Some(status) = filter.status.as_status() {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str().to_string()));
        }

        if let Some(ref term) = filter.search {
            conditions.push("(goal LIKE ? OR title LIKE ? OR subject LIKE ?)");
            let pattern = format!("%{term}%");
            params_vec.push(Box::new(pattern.clone()));
            params_vec.push(Box::new(pattern.clone()));
            params_vec.push(Box::new(pattern));
        }

        let where_clause = conditions.join(" AND ");
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let count_sql = format!("SELECT COUNT(*) FROM roadmaps WHERE {where_clause}");
        let total: i64 = self
            .connection
            .prepare(&count_sql)
            .db_context("Failed to prepare count query")?
            .query_row(&params_refs[..], |row| row.get(0))
            .db_context("Failed to count roadmaps")?;

        let page_sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM roadmaps WHERE {where_clause} ORDER BY {} \
             LIMIT {} OFFSET {}",
            filter.sort.order_clause(),
            filter.limit.map_or(-1, i64::from),
            i64::from(filter.offset),
        );

        let summaries: Vec<RoadmapSummary> = self
            .connection
            .prepare(&page_sql)
            .db_context("Failed to prepare list query")?
            .query_map(&params_refs[..], Self::build_summary_from_row)
            .db_context("Failed to query roadmaps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch roadmaps")?;

        let has_more = i64::from(filter.offset) + (summaries.len() as i64) < total;

        Ok(RoadmapPage {
            summaries,
            total: total as u32,
            has_more,
        })
    }

    /// Aggregate statistics across the owner's non-abandoned roadmaps.
    pub fn learner_stats(&self, user_id: &str) -> Result<LearnerStats> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM roadmaps WHERE user_id = ?1 AND status != 'abandoned'"
        );
        let summaries: Vec<RoadmapSummary> = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare statistics query")?
            .query_map(params![user_id], Self::build_summary_from_row)
            .db_context("Failed to query roadmaps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch roadmaps")?;

        Ok(LearnerStats::from_summaries(&summaries))
    }

    /// Pauses a roadmap. `is_active` stays as it is: pausing the active
    /// roadmap does not hand activity to another plan.
    pub fn pause_roadmap(&mut self, id: u64, user_id: &str) -> Result<Roadmap> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let status = Self::roadmap_status(&tx, id, user_id)?
            .ok_or(TrackerError::RoadmapNotFound { id })?;
        if status.is_terminal() {
            return Err(TrackerError::invalid_transition(
                "pause_roadmap",
                format!("roadmap {id} is abandoned and cannot be paused"),
            ));
        }

        let now_str = Timestamp::now().to_string();
        tx.execute(PAUSE_ROADMAP_SQL, params![&now_str, id as i64])
            .db_context("Failed to pause roadmap")?;

        let roadmap =
            Self::fetch_roadmap(&tx, id)?.ok_or(TrackerError::RoadmapNotFound { id })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(roadmap)
    }

    /// Archives a roadmap: parks it as paused and clears `is_active`,
    /// without marking it abandoned.
    pub fn archive_roadmap(&mut self, id: u64, user_id: &str) -> Result<Roadmap> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let status = Self::roadmap_status(&tx, id, user_id)?
            .ok_or(TrackerError::RoadmapNotFound { id })?;
        if status.is_terminal() {
            return Err(TrackerError::invalid_transition(
                "archive_roadmap",
                format!("roadmap {id} is abandoned and cannot be archived"),
            ));
        }

        let now_str = Timestamp::now().to_string();
        tx.execute(ARCHIVE_ROADMAP_SQL, params![&now_str, id as i64])
            .db_context("Failed to archive roadmap")?;

        let roadmap =
            Self::fetch_roadmap(&tx, id)?.ok_or(TrackerError::RoadmapNotFound { id })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(roadmap)
    }

    /// Resumes a roadmap, making it the owner's single active one. A
    /// sibling still in progress is abandoned in the same transaction. An
    /// abandoned target cannot be resumed.
    pub fn resume_roadmap(&mut self, id: u64, user_id: &str) -> Result<Roadmap> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let status = Self::roadmap_status(&tx, id, user_id)?
            .ok_or(TrackerError::RoadmapNotFound { id })?;
        if status.is_terminal() {
            return Err(TrackerError::invalid_transition(
                "resume_roadmap",
                format!("roadmap {id} is abandoned and cannot be resumed"),
            ));
        }

        let now_str = Timestamp::now().to_string();
        tx.execute(
            DEMOTE_OTHER_ACTIVE_SQL,
            params![&now_str, user_id, id as i64],
        )
        .db_context("Failed to demote active roadmaps")?;

        tx.execute(ACTIVATE_ROADMAP_SQL, params![&now_str, id as i64])
            .db_context("Failed to resume roadmap")?;

        let roadmap =
            Self::fetch_roadmap(&tx, id)?.ok_or(TrackerError::RoadmapNotFound { id })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(roadmap)
    }

    /// Makes a roadmap the owner's active one while preserving a completed
    /// roadmap's status: switching focus is not a state regression.
    pub fn set_active_roadmap(&mut self, id: u64, user_id: &str) -> Result<Roadmap> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let status = Self::roadmap_status(&tx, id, user_id)?
            .ok_or(TrackerError::RoadmapNotFound { id })?;
        if status.is_terminal() {
            return Err(TrackerError::invalid_transition(
                "set_active_roadmap",
                format!("roadmap {id} is abandoned and cannot be reactivated"),
            ));
        }

        let now_str = Timestamp::now().to_string();
        tx.execute(
            DEMOTE_OTHER_ACTIVE_SQL,
            params![&now_str, user_id, id as i64],
        )
        .db_context("Failed to demote active roadmaps")?;

        tx.execute(ACTIVATE_ROADMAP_SQL, params![&now_str, id as i64])
            .db_context("Failed to activate roadmap")?;

        let roadmap =
            Self::fetch_roadmap(&tx, id)?.ok_or(TrackerError::RoadmapNotFound { id })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(roadmap)
    }

    /// Soft-deletes a roadmap: marks it abandoned and inactive. Terminal; no
    /// engine operation reactivates it afterwards.
    pub fn delete_roadmap(&mut self, id: u64, user_id: &str) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(ABANDON_ROADMAP_SQL, params![&now_str, id as i64, user_id])
            .db_context("Failed to abandon roadmap")?;

        if rows_affected == 0 {
            return Err(TrackerError::RoadmapNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
