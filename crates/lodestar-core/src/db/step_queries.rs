//! Step progression operations and queries.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    db::utils::{
        json_col, list_to_json_col, opt_json_col, opt_timestamp_col, status_col, to_json_col,
    },
    error::{DatabaseResultExt, Result, TrackerError},
    models::{MicroTask, Roadmap, Step, StepStatus},
    params::{CompleteStep, LogStepTime, StepDescriptor},
};

const STEP_COLUMNS: &str = "id, roadmap_id, step_order, title, description, timeframe, method, \
     avoid, done_when, duration_minutes, resources, pedagogy, status, started_at, completed_at, \
     minutes_spent, user_notes, difficulty_rating";

const INSERT_STEP_SQL: &str = "INSERT INTO steps (roadmap_id, step_order, title, description, \
     timeframe, method, avoid, done_when, duration_minutes, resources, pedagogy, status, \
     started_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

const INSERT_MICRO_TASK_SQL: &str = "INSERT INTO micro_tasks (step_id, task_order, title, \
     description, done) VALUES (?1, ?2, ?3, ?4, 0)";

const SELECT_STEP_STATE_SQL: &str = "SELECT step_order, status, duration_minutes FROM steps \
     WHERE id = ?1 AND roadmap_id = ?2";

const COMPLETE_STEP_SQL: &str = "UPDATE steps SET status = 'completed', completed_at = ?1, \
     minutes_spent = minutes_spent + ?2, user_notes = COALESCE(?3, user_notes), \
     difficulty_rating = COALESCE(?4, difficulty_rating) WHERE id = ?5";

const UNLOCK_NEXT_STEP_SQL: &str = "UPDATE steps SET status = 'current', started_at = ?1 \
     WHERE roadmap_id = ?2 AND step_order = ?3";

const ADVANCE_ROADMAP_SQL: &str = "UPDATE roadmaps SET completed_steps = completed_steps + 1, \
     current_step_index = current_step_index + 1, \
     actual_minutes_spent = actual_minutes_spent + ?1, last_activity_at = ?2 WHERE id = ?3";

const FINISH_ROADMAP_SQL: &str = "UPDATE roadmaps SET status = 'completed', \
     completed_steps = total_steps, actual_minutes_spent = actual_minutes_spent + ?1, \
     last_activity_at = ?2, completed_at = ?2 WHERE id = ?3";

const LOG_STEP_TIME_SQL: &str = "UPDATE steps SET minutes_spent = minutes_spent + ?1 \
     WHERE id = ?2 AND roadmap_id = ?3";

const LOG_ROADMAP_TIME_SQL: &str = "UPDATE roadmaps SET \
     actual_minutes_spent = actual_minutes_spent + ?1, last_activity_at = ?2 WHERE id = ?3";

impl super::Database {
    /// Helper function to construct a Step from a database row (micro-tasks
    /// are loaded separately).
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        Ok(Step {
            id: row.get::<_, i64>(0)? as u64,
            roadmap_id: row.get::<_, i64>(1)? as u64,
            order: row.get::<_, i64>(2)? as u32,
            title: row.get(3)?,
            description: row.get(4)?,
            timeframe: row.get(5)?,
            method: row.get(6)?,
            avoid: row.get(7)?,
            done_when: row.get(8)?,
            duration_minutes: row.get::<_, i64>(9)? as u32,
            resources: json_col(row, 10)?,
            pedagogy: opt_json_col(row, 11)?,
            status: status_col(row, 12)?,
            started_at: opt_timestamp_col(row, 13)?,
            completed_at: opt_timestamp_col(row, 14)?,
            minutes_spent: row.get::<_, i64>(15)? as u32,
            user_notes: row.get(16)?,
            difficulty_rating: row.get::<_, Option<i64>>(17)?.map(|r| r as u8),
            micro_tasks: Vec::new(),
        })
    }

    fn build_micro_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<MicroTask> {
        Ok(MicroTask {
            id: row.get::<_, i64>(0)? as u64,
            step_id: row.get::<_, i64>(1)? as u64,
            order: row.get::<_, i64>(2)? as u32,
            title: row.get(3)?,
            description: row.get(4)?,
            done: row.get(5)?,
        })
    }

    /// Fetch all steps of a roadmap in step order, micro-tasks included.
    pub(crate) fn fetch_steps(conn: &Connection, roadmap_id: u64) -> Result<Vec<Step>> {
        let sql = format!(
            "SELECT {STEP_COLUMNS} FROM steps WHERE roadmap_id = ?1 ORDER BY step_order ASC"
        );
        let mut steps: Vec<Step> = conn
            .prepare(&sql)
            .db_context("Failed to prepare steps query")?
            .query_map(params![roadmap_id as i64], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;

        for step in &mut steps {
            step.micro_tasks = Self::fetch_micro_tasks(conn, step.id)?;
        }

        Ok(steps)
    }

    fn fetch_micro_tasks(conn: &Connection, step_id: u64) -> Result<Vec<MicroTask>> {
        conn.prepare(
            "SELECT id, step_id, task_order, title, description, done FROM micro_tasks \
             WHERE step_id = ?1 ORDER BY task_order ASC",
        )
        .db_context("Failed to prepare micro-tasks query")?
        .query_map(params![step_id as i64], Self::build_micro_task_from_row)
        .db_context("Failed to query micro-tasks")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch micro-tasks")
    }

    /// Insert a roadmap's steps with contiguous 1-based ordering. The first
    /// step starts out current, the rest locked. Descriptors may carry
    /// explicit order values; positional order is the fallback.
    pub(crate) fn insert_steps(
        conn: &Connection,
        roadmap_id: u64,
        steps: &[StepDescriptor],
        now: &Timestamp,
    ) -> Result<()> {
        let now_str = now.to_string();

        for (position, descriptor) in steps.iter().enumerate() {
            let order = descriptor.order.unwrap_or(position as u32 + 1);
            let status = if order == 1 {
                StepStatus::Current
            } else {
                StepStatus::Locked
            };
            let started_at = (order == 1).then_some(now_str.as_str());

            let resources_json = list_to_json_col(&descriptor.resources)?;
            let pedagogy_json = to_json_col(descriptor.pedagogy.as_ref())?;

            conn.execute(
                INSERT_STEP_SQL,
                params![
                    roadmap_id as i64,
                    i64::from(order),
                    &descriptor.title,
                    descriptor.description_or_title(),
                    descriptor.timeframe.as_deref(),
                    descriptor.method.as_deref(),
                    descriptor.avoid.as_deref(),
                    descriptor.done_when.as_deref(),
                    i64::from(descriptor.duration_or_default()),
                    resources_json.as_deref(),
                    pedagogy_json.as_deref(),
                    status.as_str(),
                    started_at
                ],
            )
            .db_context("Failed to insert step")?;

            let step_id = conn.last_insert_rowid();
            for (task_position, task) in descriptor.micro_tasks.iter().enumerate() {
                conn.execute(
                    INSERT_MICRO_TASK_SQL,
                    params![
                        step_id,
                        task_position as i64 + 1,
                        &task.title,
                        task.description.as_deref()
                    ],
                )
                .db_context("Failed to insert micro-task")?;
            }
        }

        Ok(())
    }

    /// Completes the current step of a roadmap and advances progression.
    ///
    /// Only the step whose status is `current` can be completed; completing
    /// a locked step (skipping ahead) or an already completed one is an
    /// invalid transition. When the last step completes, the roadmap itself
    /// becomes completed; otherwise the next step in order unlocks. Either
    /// way the step update, the unlock, and the roadmap counter updates
    /// commit together or not at all.
    pub fn complete_step(&mut self, complete: &CompleteStep) -> Result<Roadmap> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let roadmap_id = complete.roadmap_id;
        let roadmap: Option<(i64, String)> = tx
            .prepare("SELECT total_steps, status FROM roadmaps WHERE id = ?1 AND user_id = ?2")
            .db_context("Failed to prepare roadmap probe")?
            .query_row(params![roadmap_id as i64, &complete.user_id], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to probe roadmap")?;

        let (total_steps, roadmap_status) =
            roadmap.ok_or(TrackerError::RoadmapNotFound { id: roadmap_id })?;
        if roadmap_status == "abandoned" {
            return Err(TrackerError::invalid_transition(
                "complete_step",
                format!("roadmap {roadmap_id} is abandoned"),
            ));
        }

        let step: Option<(i64, StepStatus, i64)> = tx
            .prepare(SELECT_STEP_STATE_SQL)
            .db_context("Failed to prepare step probe")?
            .query_row(params![complete.step_id as i64, roadmap_id as i64], |row| {
                Ok((row.get(0)?, status_col(row, 1)?, row.get(2)?))
            })
            .optional()
            .db_context("Failed to probe step")?;

        let (step_order, step_status, duration_minutes) = step.ok_or(
            TrackerError::StepNotFound {
                id: complete.step_id,
            },
        )?;

        match step_status {
            StepStatus::Current => {}
            StepStatus::Locked => {
                return Err(TrackerError::invalid_transition(
                    "complete_step",
                    format!(
                        "step {} is locked; steps must be completed in order",
                        complete.step_id
                    ),
                ));
            }
            StepStatus::Completed => {
                return Err(TrackerError::invalid_transition(
                    "complete_step",
                    format!("step {} is already completed", complete.step_id),
                ));
            }
        }

        let minutes = complete
            .minutes_spent
            .map_or(duration_minutes, i64::from);
        let now_str = Timestamp::now().to_string();

        tx.execute(
            COMPLETE_STEP_SQL,
            params![
                &now_str,
                minutes,
                complete.notes.as_deref(),
                complete.difficulty_rating.map(i64::from),
                complete.step_id as i64
            ],
        )
        .db_context("Failed to complete step")?;

        if step_order >= total_steps {
            tx.execute(FINISH_ROADMAP_SQL, params![minutes, &now_str, roadmap_id as i64])
                .db_context("Failed to finish roadmap")?;
        } else {
            tx.execute(
                UNLOCK_NEXT_STEP_SQL,
                params![&now_str, roadmap_id as i64, step_order + 1],
            )
            .db_context("Failed to unlock next step")?;
            tx.execute(
                ADVANCE_ROADMAP_SQL,
                params![minutes, &now_str, roadmap_id as i64],
            )
            .db_context("Failed to advance roadmap")?;
        }

        let roadmap = Self::fetch_roadmap(&tx, roadmap_id)?
            .ok_or(TrackerError::RoadmapNotFound { id: roadmap_id })?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(roadmap)
    }

    /// Records time against a step without changing its status. The minutes
    /// accumulate on both the step and the roadmap total.
    pub fn log_step_time(&mut self, log: &LogStepTime) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if Self::fetch_owned_roadmap(&tx, log.roadmap_id, &log.user_id)?.is_none() {
            return Err(TrackerError::RoadmapNotFound { id: log.roadmap_id });
        }

        let minutes = i64::from(log.minutes);
        let now_str = Timestamp::now().to_string();

        let rows_affected = tx
            .execute(
                LOG_STEP_TIME_SQL,
                params![minutes, log.step_id as i64, log.roadmap_id as i64],
            )
            .db_context("Failed to log step time")?;
        if rows_affected == 0 {
            return Err(TrackerError::StepNotFound { id: log.step_id });
        }

        tx.execute(
            LOG_ROADMAP_TIME_SQL,
            params![minutes, &now_str, log.roadmap_id as i64],
        )
        .db_context("Failed to log roadmap time")?;

        let sql = format!("SELECT {STEP_COLUMNS} FROM steps WHERE id = ?1");
        let mut step = tx
            .prepare(&sql)
            .db_context("Failed to prepare step query")?
            .query_row(params![log.step_id as i64], Self::build_step_from_row)
            .db_context("Failed to query step")?;
        step.micro_tasks = Self::fetch_micro_tasks(&tx, step.id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(step)
    }

    /// Retrieves the ordered steps of an owned roadmap.
    pub fn get_steps(&self, roadmap_id: u64, user_id: &str) -> Result<Vec<Step>> {
        let owned: Option<i64> = self
            .connection
            .prepare("SELECT id FROM roadmaps WHERE id = ?1 AND user_id = ?2")
            .db_context("Failed to prepare ownership probe")?
            .query_row(params![roadmap_id as i64, user_id], |row| row.get(0))
            .optional()
            .db_context("Failed to probe roadmap")?;

        if owned.is_none() {
            return Err(TrackerError::RoadmapNotFound { id: roadmap_id });
        }

        Self::fetch_steps(&self.connection, roadmap_id)
    }
}
