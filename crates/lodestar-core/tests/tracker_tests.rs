//! Integration tests for the roadmap progression rules.

mod common;

use common::{create_test_tracker, roadmap_params};
use lodestar_core::{
    params::{CompleteStep, LogStepTime, RoadmapRef},
    RoadmapStatus, StepStatus, TrackerError,
};

fn roadmap_ref(roadmap_id: u64, user_id: &str) -> RoadmapRef {
    RoadmapRef {
        roadmap_id,
        user_id: user_id.to_string(),
    }
}

fn complete(roadmap_id: u64, step_id: u64, user_id: &str) -> CompleteStep {
    CompleteStep {
        roadmap_id,
        step_id,
        user_id: user_id.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_full_roadmap_run() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 3))
        .await
        .expect("Failed to create roadmap");
    assert_eq!(roadmap.estimated_minutes, 15);

    // Complete the three steps in order
    let mut current = roadmap;
    for n in 0..3 {
        let step_id = current
            .current_step()
            .expect("Roadmap should have a current step")
            .id;
        current = tracker
            .complete_step(&complete(current.id, step_id, "alice"))
            .await
            .expect("Failed to complete step");
        assert_eq!(current.completed_steps, n + 1);
    }

    assert_eq!(current.status, RoadmapStatus::Completed);
    assert!(current.completed_at.is_some());
    assert_eq!(current.completed_steps, current.total_steps);
    assert!(current.steps.iter().all(|s| s.status == StepStatus::Completed));
    // A completed roadmap keeps its active slot until the user moves on
    assert!(current.is_active);
    assert!(current.current_step().is_none());
    assert_eq!(current.actual_minutes_spent, 15);
}

#[tokio::test]
async fn test_skipping_ahead_is_rejected() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 3))
        .await
        .expect("Failed to create roadmap");
    let locked_step_id = roadmap.steps[2].id;

    let result = tracker
        .complete_step(&complete(roadmap.id, locked_step_id, "alice"))
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidTransition { .. })));

    // Nothing changed
    let refreshed = tracker
        .get_roadmap(&roadmap_ref(roadmap.id, "alice"))
        .await
        .expect("Failed to get roadmap")
        .expect("Roadmap should exist");
    assert_eq!(refreshed.completed_steps, 0);
    assert_eq!(refreshed.steps[0].status, StepStatus::Current);
    assert_eq!(refreshed.steps[2].status, StepStatus::Locked);
}

#[tokio::test]
async fn test_double_completion_is_rejected() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 2))
        .await
        .expect("Failed to create roadmap");
    let first_step_id = roadmap.steps[0].id;

    tracker
        .complete_step(&complete(roadmap.id, first_step_id, "alice"))
        .await
        .expect("Failed to complete step");

    let result = tracker
        .complete_step(&complete(roadmap.id, first_step_id, "alice"))
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidTransition { .. })));

    // Progress was not double-counted
    let refreshed = tracker
        .get_roadmap(&roadmap_ref(roadmap.id, "alice"))
        .await
        .expect("Failed to get roadmap")
        .expect("Roadmap should exist");
    assert_eq!(refreshed.completed_steps, 1);
    assert_eq!(refreshed.current_step_index, 1);
}

#[tokio::test]
async fn test_completion_records_notes_and_rating() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 2))
        .await
        .expect("Failed to create roadmap");

    let refreshed = tracker
        .complete_step(&CompleteStep {
            roadmap_id: roadmap.id,
            step_id: roadmap.steps[0].id,
            user_id: "alice".to_string(),
            notes: Some("Harder than expected".to_string()),
            difficulty_rating: Some(4),
            minutes_spent: Some(25),
        })
        .await
        .expect("Failed to complete step");

    let step = &refreshed.steps[0];
    assert_eq!(step.user_notes.as_deref(), Some("Harder than expected"));
    assert_eq!(step.difficulty_rating, Some(4));
    assert_eq!(step.minutes_spent, 25);
    // Reported minutes override the estimate in the roadmap total
    assert_eq!(refreshed.actual_minutes_spent, 25);
}

#[tokio::test]
async fn test_switching_active_demotes_previous() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let first = tracker
        .create_roadmap(&roadmap_params("alice", "First", 2))
        .await
        .expect("Failed to create roadmap");
    let second = tracker
        .create_roadmap(&roadmap_params("alice", "Second", 2))
        .await
        .expect("Failed to create roadmap");

    // Creating the second abandoned the first; switching back is impossible
    let result = tracker
        .set_active_roadmap(&roadmap_ref(first.id, "alice"))
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidTransition { .. })));

    let active = tracker
        .get_active_roadmap("alice")
        .await
        .expect("Failed to get active roadmap")
        .expect("Active roadmap should exist");
    assert_eq!(active.id, second.id);
}

#[tokio::test]
async fn test_resume_paused_roadmap_demotes_active_sibling() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let first = tracker
        .create_roadmap(&roadmap_params("alice", "First", 2))
        .await
        .expect("Failed to create roadmap");

    // Pause keeps the active slot; creating the second takes the slot but
    // must not abandon the paused roadmap
    tracker
        .pause_roadmap(&roadmap_ref(first.id, "alice"))
        .await
        .expect("Failed to pause roadmap");

    let second = tracker
        .create_roadmap(&roadmap_params("alice", "Second", 2))
        .await
        .expect("Failed to create roadmap");

    let first_after_create = tracker
        .get_roadmap(&roadmap_ref(first.id, "alice"))
        .await
        .expect("Failed to get roadmap")
        .expect("Roadmap should exist");
    assert_eq!(first_after_create.status, RoadmapStatus::Paused);
    assert!(!first_after_create.is_active);

    let resumed = tracker
        .resume_roadmap(&roadmap_ref(first.id, "alice"))
        .await
        .expect("Failed to resume roadmap");
    assert_eq!(resumed.status, RoadmapStatus::Active);
    assert!(resumed.is_active);

    // The in-progress roadmap that held the active slot got abandoned
    let second = tracker
        .get_roadmap(&roadmap_ref(second.id, "alice"))
        .await
        .expect("Failed to get roadmap")
        .expect("Roadmap should exist");
    assert_eq!(second.status, RoadmapStatus::Abandoned);
    assert!(!second.is_active);
}

#[tokio::test]
async fn test_create_keeps_completed_sibling_status() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    // Complete a one-step roadmap; it keeps the active slot as completed
    let finished = tracker
        .create_roadmap(&roadmap_params("alice", "Short", 1))
        .await
        .expect("Failed to create roadmap");
    let finished = tracker
        .complete_step(&complete(finished.id, finished.steps[0].id, "alice"))
        .await
        .expect("Failed to complete step");
    assert_eq!(finished.status, RoadmapStatus::Completed);
    assert!(finished.is_active);

    tracker
        .create_roadmap(&roadmap_params("alice", "Next", 2))
        .await
        .expect("Failed to create roadmap");

    // The completed roadmap lost the slot but was not regressed
    let finished = tracker
        .get_roadmap(&roadmap_ref(finished.id, "alice"))
        .await
        .expect("Failed to get roadmap")
        .expect("Roadmap should exist");
    assert_eq!(finished.status, RoadmapStatus::Completed);
    assert!(!finished.is_active);

    let stats = tracker
        .learner_stats("alice")
        .await
        .expect("Failed to get stats");
    assert_eq!(stats.completed_roadmaps, 1);
    assert_eq!(stats.total_roadmaps, 2);
}

#[tokio::test]
async fn test_pause_keeps_active_slot() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 2))
        .await
        .expect("Failed to create roadmap");

    let paused = tracker
        .pause_roadmap(&roadmap_ref(roadmap.id, "alice"))
        .await
        .expect("Failed to pause roadmap");
    assert_eq!(paused.status, RoadmapStatus::Paused);
    assert!(paused.is_active);

    let archived = tracker
        .archive_roadmap(&roadmap_ref(roadmap.id, "alice"))
        .await
        .expect("Failed to archive roadmap");
    assert_eq!(archived.status, RoadmapStatus::Paused);
    assert!(!archived.is_active);
}

#[tokio::test]
async fn test_abandoned_roadmap_is_terminal() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 2))
        .await
        .expect("Failed to create roadmap");

    tracker
        .delete_roadmap(&roadmap_ref(roadmap.id, "alice"))
        .await
        .expect("Failed to delete roadmap");

    // The record survives as abandoned but no lifecycle op revives it
    let abandoned = tracker
        .get_roadmap(&roadmap_ref(roadmap.id, "alice"))
        .await
        .expect("Failed to get roadmap")
        .expect("Roadmap should exist");
    assert_eq!(abandoned.status, RoadmapStatus::Abandoned);

    for result in [
        tracker.resume_roadmap(&roadmap_ref(roadmap.id, "alice")).await,
        tracker.pause_roadmap(&roadmap_ref(roadmap.id, "alice")).await,
        tracker
            .set_active_roadmap(&roadmap_ref(roadmap.id, "alice"))
            .await,
    ] {
        assert!(matches!(result, Err(TrackerError::InvalidTransition { .. })));
    }

    // Completing steps on an abandoned roadmap fails too
    let result = tracker
        .complete_step(&complete(roadmap.id, abandoned.steps[0].id, "alice"))
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidTransition { .. })));
}

#[tokio::test]
async fn test_completed_roadmap_can_hold_active_slot() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let finished = tracker
        .create_roadmap(&roadmap_params("alice", "Short", 1))
        .await
        .expect("Failed to create roadmap");
    let finished = tracker
        .complete_step(&complete(finished.id, finished.steps[0].id, "alice"))
        .await
        .expect("Failed to complete step");
    assert_eq!(finished.status, RoadmapStatus::Completed);

    tracker
        .archive_roadmap(&roadmap_ref(finished.id, "alice"))
        .await
        .expect("Failed to archive roadmap");

    tracker
        .create_roadmap(&roadmap_params("alice", "Next", 1))
        .await
        .expect("Failed to create roadmap");

    // Switching back to the completed roadmap keeps its completed status
    let reactivated = tracker
        .set_active_roadmap(&roadmap_ref(finished.id, "alice"))
        .await
        .expect("Failed to set active roadmap");
    assert_eq!(reactivated.status, RoadmapStatus::Completed);
    assert!(reactivated.is_active);
}

#[tokio::test]
async fn test_log_step_time_accumulates() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 2))
        .await
        .expect("Failed to create roadmap");
    let step_id = roadmap.steps[0].id;

    for _ in 0..2 {
        tracker
            .log_step_time(&LogStepTime {
                roadmap_id: roadmap.id,
                step_id,
                user_id: "alice".to_string(),
                minutes: 10,
            })
            .await
            .expect("Failed to log time");
    }

    let refreshed = tracker
        .get_roadmap(&roadmap_ref(roadmap.id, "alice"))
        .await
        .expect("Failed to get roadmap")
        .expect("Roadmap should exist");
    assert_eq!(refreshed.steps[0].minutes_spent, 20);
    assert_eq!(refreshed.actual_minutes_spent, 20);
    // Logging time does not complete the step
    assert_eq!(refreshed.steps[0].status, StepStatus::Current);

    // Zero minutes is rejected
    let result = tracker
        .log_step_time(&LogStepTime {
            roadmap_id: roadmap.id,
            step_id,
            user_id: "alice".to_string(),
            minutes: 0,
        })
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_users_are_isolated() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let alice_roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 2))
        .await
        .expect("Failed to create roadmap");
    let bob_roadmap = tracker
        .create_roadmap(&roadmap_params("bob", "Chess", 2))
        .await
        .expect("Failed to create roadmap");

    // Creating bob's roadmap did not touch alice's active slot
    let alice_active = tracker
        .get_active_roadmap("alice")
        .await
        .expect("Failed to get active roadmap")
        .expect("Active roadmap should exist");
    assert_eq!(alice_active.id, alice_roadmap.id);

    // Another user acting on the roadmap sees not-found, not forbidden
    let result = tracker
        .pause_roadmap(&roadmap_ref(bob_roadmap.id, "alice"))
        .await;
    assert!(matches!(result, Err(TrackerError::RoadmapNotFound { .. })));

    let result = tracker
        .complete_step(&complete(bob_roadmap.id, bob_roadmap.steps[0].id, "alice"))
        .await;
    assert!(matches!(result, Err(TrackerError::RoadmapNotFound { .. })));

    let steps = tracker.get_steps(&roadmap_ref(bob_roadmap.id, "alice")).await;
    assert!(matches!(steps, Err(TrackerError::RoadmapNotFound { .. })));
}

#[tokio::test]
async fn test_get_steps_returns_ordered_frontier() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let roadmap = tracker
        .create_roadmap(&roadmap_params("alice", "Guitar", 3))
        .await
        .expect("Failed to create roadmap");
    tracker
        .complete_step(&complete(roadmap.id, roadmap.steps[0].id, "alice"))
        .await
        .expect("Failed to complete step");

    let steps = tracker
        .get_steps(&roadmap_ref(roadmap.id, "alice"))
        .await
        .expect("Failed to get steps");

    assert_eq!(steps.len(), 3);
    let orders: Vec<u32> = steps.iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    let statuses: Vec<StepStatus> = steps.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![StepStatus::Completed, StepStatus::Current, StepStatus::Locked]
    );
}
