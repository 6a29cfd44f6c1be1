//! Tests for the tracker module.

use super::*;
use crate::error::TrackerError;
use crate::models::{RoadmapStatus, StepStatus};
use crate::params::{CompleteStep, CreateRoadmap, RoadmapRef, StepDescriptor};
use tempfile::TempDir;

/// Helper function to create a test tracker
async fn create_test_tracker() -> (TempDir, Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}

fn sample_roadmap(user_id: &str, title: &str, step_count: usize) -> CreateRoadmap {
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

#[tokio::test]
async fn test_create_roadmap_initial_state() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&sample_roadmap("alice", "Guitar", 3))
        .await
        .expect("Failed to create roadmap");

    assert_eq!(roadmap.status, RoadmapStatus::Active);
    assert!(roadmap.is_active);
    assert_eq!(roadmap.total_steps, 3);
    assert_eq!(roadmap.completed_steps, 0);
    assert_eq!(roadmap.current_step_index, 0);
    // Default of 5 minutes per step
    assert_eq!(roadmap.estimated_minutes, 15);

    assert_eq!(roadmap.steps[0].status, StepStatus::Current);
    assert!(roadmap.steps[0].started_at.is_some());
    assert_eq!(roadmap.steps[1].status, StepStatus::Locked);
    assert_eq!(roadmap.steps[2].status, StepStatus::Locked);
    // Description backfills from the title
    assert_eq!(roadmap.steps[0].description, "Step 1");
}

#[tokio::test]
async fn test_create_roadmap_rejects_empty_steps() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let result = tracker.create_roadmap(&sample_roadmap("alice", "Empty", 0)).await;

    assert!(matches!(
        result,
        Err(TrackerError::InvalidInput { ref field, .. }) if field == "steps"
    ));
}

#[tokio::test]
async fn test_create_roadmap_rejects_gapped_orders() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    // Explicit orders that skip 1 would produce a roadmap with no current
    // step; they must be refused before anything is written
    let mut params = sample_roadmap("alice", "Gapped", 0);
    params.steps = vec![
        StepDescriptor {
            title: "Step 2".to_string(),
            order: Some(2),
            ..Default::default()
        },
        StepDescriptor {
            title: "Step 3".to_string(),
            order: Some(3),
            ..Default::default()
        },
    ];

    let result = tracker.create_roadmap(&params).await;
    assert!(matches!(
        result,
        Err(TrackerError::InvalidInput { ref field, .. }) if field == "steps"
    ));

    // Explicit but complete orders still produce a well-formed roadmap
    let mut params = sample_roadmap("alice", "Reordered", 0);
    params.steps = vec![
        StepDescriptor {
            title: "Second".to_string(),
            order: Some(2),
            ..Default::default()
        },
        StepDescriptor {
            title: "First".to_string(),
            order: Some(1),
            ..Default::default()
        },
    ];
    let roadmap = tracker
        .create_roadmap(&params)
        .await
        .expect("Failed to create roadmap");
    let current = roadmap
        .current_step()
        .expect("Active roadmap must have a current step");
    assert_eq!(current.order, 1);
    assert_eq!(current.title, "First");
}

#[tokio::test]
async fn test_create_demotes_previous_active() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let first = tracker
        .create_roadmap(&sample_roadmap("alice", "First", 2))
        .await
        .expect("Failed to create roadmap");
    let second = tracker
        .create_roadmap(&sample_roadmap("alice", "Second", 2))
        .await
        .expect("Failed to create roadmap");

    let first = tracker
        .get_roadmap(&RoadmapRef {
            roadmap_id: first.id,
            user_id: "alice".to_string(),
        })
        .await
        .expect("Failed to get roadmap")
        .expect("Roadmap should exist");

    assert_eq!(first.status, RoadmapStatus::Abandoned);
    assert!(!first.is_active);
    assert!(second.is_active);

    let active = tracker
        .get_active_roadmap("alice")
        .await
        .expect("Failed to get active roadmap")
        .expect("Active roadmap should exist");
    assert_eq!(active.id, second.id);
}

#[tokio::test]
async fn test_complete_step_advances_progression() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&sample_roadmap("alice", "Guitar", 2))
        .await
        .expect("Failed to create roadmap");

    let refreshed = tracker
        .complete_step(&CompleteStep {
            roadmap_id: roadmap.id,
            step_id: roadmap.steps[0].id,
            user_id: "alice".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to complete step");

    assert_eq!(refreshed.completed_steps, 1);
    assert_eq!(refreshed.current_step_index, 1);
    assert_eq!(refreshed.steps[0].status, StepStatus::Completed);
    assert_eq!(refreshed.steps[1].status, StepStatus::Current);
    assert!(refreshed.steps[1].started_at.is_some());
    // No explicit minutes: the step estimate is credited
    assert_eq!(refreshed.actual_minutes_spent, 5);
}

#[tokio::test]
async fn test_complete_step_rejects_invalid_rating() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&sample_roadmap("alice", "Guitar", 1))
        .await
        .expect("Failed to create roadmap");

    let result = tracker
        .complete_step(&CompleteStep {
            roadmap_id: roadmap.id,
            step_id: roadmap.steps[0].id,
            user_id: "alice".to_string(),
            difficulty_rating: Some(9),
            ..Default::default()
        })
        .await;

    assert!(matches!(
        result,
        Err(TrackerError::InvalidInput { ref field, .. }) if field == "difficulty_rating"
    ));
}

#[tokio::test]
async fn test_get_roadmap_hides_other_users() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&sample_roadmap("alice", "Guitar", 1))
        .await
        .expect("Failed to create roadmap");

    let fetched = tracker
        .get_roadmap(&RoadmapRef {
            roadmap_id: roadmap.id,
            user_id: "mallory".to_string(),
        })
        .await
        .expect("Failed to get roadmap");

    assert!(fetched.is_none());
}
