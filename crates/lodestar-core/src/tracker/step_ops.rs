//! Step progression operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{Roadmap, Step},
    params::{CompleteStep, LogStepTime, RoadmapRef},
};

impl Tracker {
    /// Completes the current step of a roadmap.
    ///
    /// Steps complete strictly in order: only the step whose status is
    /// current may be completed, and doing so unlocks the next one. When the
    /// last step completes, the roadmap itself becomes completed. Returns
    /// the refreshed roadmap with its full step list.
    pub async fn complete_step(&self, params: &CompleteStep) -> Result<Roadmap> {
        if let Some(rating) = params.difficulty_rating {
            if !(1..=5).contains(&rating) {
                return Err(TrackerError::invalid_input("difficulty_rating")
                    .with_reason("must be between 1 and 5"));
            }
        }

        let db_path = self.db_path.clone();
        let params = params.clone();

        let roadmap = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.complete_step(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::info!(
            "Completed step on roadmap {} ({}/{})",
            roadmap.id,
            roadmap.completed_steps,
            roadmap.total_steps
        );

        Ok(roadmap)
    }

    /// Records minutes spent on a step without completing it. The minutes
    /// accumulate on the step and on the roadmap total.
    pub async fn log_step_time(&self, params: &LogStepTime) -> Result<Step> {
        if params.minutes == 0 {
            return Err(TrackerError::invalid_input("minutes")
                .with_reason("must be greater than zero"));
        }

        let db_path = self.db_path.clone();
        let minutes = params.minutes;
        let params = params.clone();

        let step = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.log_step_time(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::debug!(
            "Logged {minutes} minutes on step {} (total {})",
            step.id,
            step.minutes_spent
        );

        Ok(step)
    }

    /// Retrieves the ordered steps of a roadmap owned by the user.
    pub async fn get_steps(&self, params: &RoadmapRef) -> Result<Vec<Step>> {
        let db_path = self.db_path.clone();
        let roadmap_id = params.roadmap_id;
        let user_id = params.user_id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_steps(roadmap_id, &user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
