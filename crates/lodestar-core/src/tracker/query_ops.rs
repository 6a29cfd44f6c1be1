//! Read-side queries for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{LearnerStats, RoadmapFilter, RoadmapPage},
    params::ListRoadmaps,
};

impl Tracker {
    /// Lists the user's roadmaps as summaries, with filtering, sorting, and
    /// pagination. Abandoned roadmaps are hidden unless requested.
    pub async fn list_roadmaps(&self, params: &ListRoadmaps) -> Result<RoadmapPage> {
        let filter = RoadmapFilter::try_from(params)?;

        let db_path = self.db_path.clone();
        let user_id = params.user_id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_roadmaps(&user_id, &filter)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Aggregates statistics across the user's non-abandoned roadmaps.
    pub async fn learner_stats(&self, user_id: &str) -> Result<LearnerStats> {
        let db_path = self.db_path.clone();
        let user_id = user_id.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.learner_stats(&user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
