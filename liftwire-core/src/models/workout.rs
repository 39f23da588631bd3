//! Workout types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Activity Kind
// ============================================================================

/// The kind of activity a workout records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Running, indoor or outdoor.
    Running,
    /// Cycling.
    Cycling,
    /// Swimming.
    Swimming,
    /// Strength training.
    Strength,
    /// Walking or hiking.
    Walking,
    /// Anything the platform reports that we don't model explicitly.
    Other,
}

impl ActivityKind {
    /// Returns the display name for this activity.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
            Self::Swimming => "Swimming",
            Self::Strength => "Strength",
            Self::Walking => "Walking",
            Self::Other => "Other",
        }
    }
}

impl Default for ActivityKind {
    fn default() -> Self {
        Self::Other
    }
}

// ============================================================================
// Workout
// ============================================================================

/// A workout recorded on the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Platform workout identifier.
    pub id: String,
    /// Workout title.
    pub title: String,
    /// Activity kind.
    #[serde(default)]
    pub activity: ActivityKind,
    /// When the workout started.
    pub started_at: DateTime<Utc>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration_secs: u32,
    /// Distance in meters, where the activity has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for creating or updating a workout.
///
/// Fields left `None` in an update are not sent, so the platform keeps
/// the existing values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    /// Workout title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Activity kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityKind>,
    /// When the workout started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    /// Duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
    /// Distance in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutDraft {
    /// Creates a draft with a title and activity, the minimum the platform
    /// accepts for a new workout.
    pub fn new(title: impl Into<String>, activity: ActivityKind) -> Self {
        Self {
            title: Some(title.into()),
            activity: Some(activity),
            ..Self::default()
        }
    }

    /// Sets the start time.
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    /// Sets the duration.
    pub fn with_duration_secs(mut self, secs: u32) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Sets the distance.
    pub fn with_distance_m(mut self, meters: f64) -> Self {
        self.distance_m = Some(meters);
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_deserialize_defaults() {
        let json = r#"{
            "id": "w1",
            "title": "Morning run",
            "started_at": "2026-03-01T06:30:00Z"
        }"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.activity, ActivityKind::Other);
        assert_eq!(workout.duration_secs, 0);
        assert!(workout.distance_m.is_none());
    }

    #[test]
    fn test_draft_skips_unset_fields() {
        let draft = WorkoutDraft::new("Intervals", ActivityKind::Running);
        let json = serde_json::to_string(&draft).unwrap();
        assert!(json.contains("Intervals"));
        assert!(!json.contains("notes"));
        assert!(!json.contains("distance_m"));
    }

    #[test]
    fn test_activity_display_name() {
        assert_eq!(ActivityKind::Running.display_name(), "Running");
        assert_eq!(ActivityKind::Other.display_name(), "Other");
    }
}
