//! Roadmap lifecycle operations for the Tracker.

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::Roadmap,
    params::{CreateRoadmap, RoadmapRef},
};

impl Tracker {
    /// Creates a new roadmap from the given blueprint.
    ///
    /// The roadmap is created with its full step list in one transaction:
    /// the first step starts out current, the rest locked, and the user's
    /// active slot moves over. A sibling still in progress is abandoned;
    /// paused and completed siblings keep their status. The returned
    /// roadmap is the user's new active one.
    pub async fn create_roadmap(&self, params: &CreateRoadmap) -> Result<Roadmap> {
        params.validate()?;

        let db_path = self.db_path.clone();
        let params = params.clone();

        let roadmap = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_roadmap(&params)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::info!(
            "Created roadmap {} ({} steps) for user {}",
            roadmap.id,
            roadmap.total_steps,
            roadmap.user_id
        );

        Ok(roadmap)
    }

    /// Retrieves a roadmap by ID, with its steps. Returns `None` when the
    /// roadmap does not exist or belongs to another user.
    pub async fn get_roadmap(&self, params: &RoadmapRef) -> Result<Option<Roadmap>> {
        let db_path = self.db_path.clone();
        let roadmap_id = params.roadmap_id;
        let user_id = params.user_id.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_roadmap(roadmap_id, &user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves the user's active roadmap, if any.
    pub async fn get_active_roadmap(&self, user_id: &str) -> Result<Option<Roadmap>> {
        let db_path = self.db_path.clone();
        let user_id = user_id.to_string();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_active_roadmap(&user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Pauses a roadmap without surrendering its active slot.
    pub async fn pause_roadmap(&self, params: &RoadmapRef) -> Result<Roadmap> {
        let db_path = self.db_path.clone();
        let roadmap_id = params.roadmap_id;
        let user_id = params.user_id.clone();

        let roadmap = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.pause_roadmap(roadmap_id, &user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::info!("Paused roadmap {}", roadmap.id);

        Ok(roadmap)
    }

    /// Archives a roadmap: paused and no longer the active one.
    pub async fn archive_roadmap(&self, params: &RoadmapRef) -> Result<Roadmap> {
        let db_path = self.db_path.clone();
        let roadmap_id = params.roadmap_id;
        let user_id = params.user_id.clone();

        let roadmap = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.archive_roadmap(roadmap_id, &user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::info!("Archived roadmap {}", roadmap.id);

        Ok(roadmap)
    }

    /// Resumes a roadmap, making it the user's single active one. A
    /// sibling still in progress is abandoned.
    pub async fn resume_roadmap(&self, params: &RoadmapRef) -> Result<Roadmap> {
        let db_path = self.db_path.clone();
        let roadmap_id = params.roadmap_id;
        let user_id = params.user_id.clone();

        let roadmap = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.resume_roadmap(roadmap_id, &user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::info!("Resumed roadmap {}", roadmap.id);

        Ok(roadmap)
    }

    /// Switches the user's active roadmap. A completed roadmap keeps its
    /// completed status while holding the active slot.
    pub async fn set_active_roadmap(&self, params: &RoadmapRef) -> Result<Roadmap> {
        let db_path = self.db_path.clone();
        let roadmap_id = params.roadmap_id;
        let user_id = params.user_id.clone();

        let roadmap = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_active_roadmap(roadmap_id, &user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::info!("Switched active roadmap to {}", roadmap.id);

        Ok(roadmap)
    }

    /// Soft-deletes a roadmap (marks it abandoned). The record and its time
    /// history are kept; the roadmap can no longer be resumed.
    pub async fn delete_roadmap(&self, params: &RoadmapRef) -> Result<()> {
        let db_path = self.db_path.clone();
        let roadmap_id = params.roadmap_id;
        let user_id = params.user_id.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_roadmap(roadmap_id, &user_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::info!("Abandoned roadmap {roadmap_id}");

        Ok(())
    }
}
