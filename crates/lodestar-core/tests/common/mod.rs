use lodestar_core::params::{CreateRoadmap, StepDescriptor};
use lodestar_core::TrackerBuilder;
use tempfile::TempDir;

/// Helper function to create a test tracker
pub async fn create_test_tracker() -> (TempDir, lodestar_core::Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

/// Helper function to build creation params with numbered steps
pub fn roadmap_params(user_id: &str, title: &str, step_count: usize) -> CreateRoadmap {
    CreateRoadmap {
        user_id: user_id.to_string(),
        goal: format!("Goal for {title}"),
        title: title.to_string(),
        steps: (1..=step_count)
            .map(|n| StepDescriptor {
                title: format!("Step {n}"),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}
