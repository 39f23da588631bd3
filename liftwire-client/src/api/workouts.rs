//! Workout CRUD endpoints.

use liftwire_core::{Workout, WorkoutDraft};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::ApiClient;
use crate::engine::RequestOptions;
use crate::error::ApiError;

/// Workouts collection path.
const WORKOUTS_ENDPOINT: &str = "workouts";

#[derive(Debug, Deserialize)]
struct WorkoutListResponse {
    workouts: Vec<Workout>,
}

#[derive(Debug, Deserialize)]
struct WorkoutResponse {
    workout: Workout,
}

fn workout_path(id: &str) -> String {
    format!("{WORKOUTS_ENDPOINT}/{id}")
}

fn draft_body(draft: &WorkoutDraft) -> Result<Value, ApiError> {
    serde_json::to_value(draft)
        .map_err(|e| ApiError::InvalidRequest(format!("unserializable workout draft: {e}")))
}

impl ApiClient {
    /// Lists the user's workouts.
    #[instrument(skip(self))]
    pub async fn list_workouts(&self) -> Result<Vec<Workout>, ApiError> {
        let outcome = self
            .engine()
            .get(WORKOUTS_ENDPOINT, RequestOptions::new())
            .await;
        let response: WorkoutListResponse = outcome.parse()?;
        Ok(response.workouts)
    }

    /// Fetches one workout by id.
    #[instrument(skip(self))]
    pub async fn workout(&self, id: &str) -> Result<Workout, ApiError> {
        let outcome = self
            .engine()
            .get(&workout_path(id), RequestOptions::new())
            .await;
        let response: WorkoutResponse = outcome.parse()?;
        Ok(response.workout)
    }

    /// Creates a workout.
    #[instrument(skip(self, draft))]
    pub async fn create_workout(&self, draft: &WorkoutDraft) -> Result<Workout, ApiError> {
        let body = draft_body(draft)?;
        let outcome = self
            .engine()
            .post(WORKOUTS_ENDPOINT, Some(body), RequestOptions::new())
            .await;
        let response: WorkoutResponse = outcome.parse()?;
        Ok(response.workout)
    }

    /// Updates a workout. Fields left unset in the draft keep their
    /// current values.
    #[instrument(skip(self, draft))]
    pub async fn update_workout(&self, id: &str, draft: &WorkoutDraft) -> Result<Workout, ApiError> {
        let body = draft_body(draft)?;
        let outcome = self
            .engine()
            .patch(&workout_path(id), Some(body), RequestOptions::new())
            .await;
        let response: WorkoutResponse = outcome.parse()?;
        Ok(response.workout)
    }

    /// Deletes a workout.
    #[instrument(skip(self))]
    pub async fn delete_workout(&self, id: &str) -> Result<(), ApiError> {
        let outcome = self
            .engine()
            .delete(&workout_path(id), RequestOptions::new())
            .await;
        outcome.into_result().map(|_| ())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use liftwire_core::ActivityKind;

    #[test]
    fn test_workout_path() {
        assert_eq!(workout_path("w1"), "workouts/w1");
    }

    #[test]
    fn test_list_response_parses() {
        let json = r#"{
            "workouts": [
                {"id": "w1", "title": "Morning run", "activity": "running",
                 "started_at": "2026-03-01T06:30:00Z", "duration_secs": 1800,
                 "distance_m": 5000.0}
            ]
        }"#;
        let response: WorkoutListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.workouts.len(), 1);
        assert_eq!(response.workouts[0].activity, ActivityKind::Running);
    }

    #[test]
    fn test_draft_body_omits_unset_fields() {
        let body = draft_body(&WorkoutDraft::new("Intervals", ActivityKind::Running)).unwrap();
        let object = body.as_object().unwrap();
        assert!(object.contains_key("title"));
        assert!(!object.contains_key("notes"));
    }
}
