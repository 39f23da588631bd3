//! Output rendering for CLI results.

use anyhow::Result;
use liftwire_core::{User, Workout};
use serde::Serialize;

/// Prints a value as JSON to stdout.
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Renders a user profile as text.
pub fn render_user(user: &User) -> String {
    let mut out = String::new();
    out.push_str(&format!("User    {}\n", user.id));
    if !user.name.is_empty() {
        out.push_str(&format!("Name    {}\n", user.name));
    }
    if let Some(avatar) = &user.avatar {
        out.push_str(&format!("Avatar  {avatar}\n"));
    }
    out
}

/// Renders workouts as a text table.
pub fn render_workouts(workouts: &[Workout]) -> String {
    if workouts.is_empty() {
        return "No workouts.\n".to_string();
    }

    let mut out = String::new();
    for workout in workouts {
        let distance = workout
            .distance_m
            .map(|m| format!(" {:.1} km", m / 1000.0))
            .unwrap_or_default();
        out.push_str(&format!(
            "{}  {}  {}  {} min{}\n",
            workout.id,
            workout.started_at.format("%Y-%m-%d %H:%M"),
            workout.activity.display_name(),
            workout.duration_secs / 60,
            distance,
        ));
        if !workout.title.is_empty() {
            out.push_str(&format!("    {}\n", workout.title));
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use liftwire_core::ActivityKind;

    #[test]
    fn test_render_user() {
        let user = User {
            id: "123".to_string(),
            name: "Jo Runner".to_string(),
            avatar: None,
            preferences: None,
        };
        let text = render_user(&user);
        assert!(text.contains("123"));
        assert!(text.contains("Jo Runner"));
        assert!(!text.contains("Avatar"));
    }

    #[test]
    fn test_render_empty_workouts() {
        assert_eq!(render_workouts(&[]), "No workouts.\n");
    }

    #[test]
    fn test_render_workout_row() {
        let workout = Workout {
            id: "w1".to_string(),
            title: "Morning run".to_string(),
            activity: ActivityKind::Running,
            started_at: chrono::Utc.with_ymd_and_hms(2026, 3, 1, 6, 30, 0).unwrap(),
            duration_secs: 1800,
            distance_m: Some(5000.0),
            notes: None,
        };
        let text = render_workouts(&[workout]);
        assert!(text.contains("w1"));
        assert!(text.contains("Running"));
        assert!(text.contains("30 min"));
        assert!(text.contains("5.0 km"));
        assert!(text.contains("Morning run"));
    }
}
