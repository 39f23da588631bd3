//! Workouts command - CRUD against the workouts API.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use liftwire_core::{ActivityKind, WorkoutDraft};

use crate::commands::api_client;
use crate::output;
use crate::{Cli, OutputFormat};

/// Arguments for the workouts command.
#[derive(Args)]
pub struct WorkoutsArgs {
    /// Workout operation.
    #[command(subcommand)]
    pub command: WorkoutsCommand,
}

/// Workout operations.
#[derive(Subcommand)]
pub enum WorkoutsCommand {
    /// List workouts.
    List,
    /// Show one workout.
    Show {
        /// Workout id.
        id: String,
    },
    /// Create a workout.
    Add {
        /// Workout title.
        #[arg(long)]
        title: String,
        /// Activity (running, cycling, swimming, strength, walking, other).
        #[arg(long, default_value = "other")]
        activity: String,
        /// Duration in minutes.
        #[arg(long)]
        duration_mins: Option<u32>,
        /// Distance in kilometers.
        #[arg(long)]
        distance_km: Option<f64>,
        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a workout.
    Delete {
        /// Workout id.
        id: String,
    },
}

fn parse_activity(value: &str) -> Result<ActivityKind> {
    let kind = match value.to_ascii_lowercase().as_str() {
        "running" => ActivityKind::Running,
        "cycling" => ActivityKind::Cycling,
        "swimming" => ActivityKind::Swimming,
        "strength" => ActivityKind::Strength,
        "walking" => ActivityKind::Walking,
        "other" => ActivityKind::Other,
        other => bail!("Unknown activity: {other}"),
    };
    Ok(kind)
}

/// Runs the workouts command.
pub async fn run(args: &WorkoutsArgs, cli: &Cli) -> Result<()> {
    let api = api_client(cli)?;

    match &args.command {
        WorkoutsCommand::List => {
            let workouts = api.list_workouts().await.context("Could not list workouts")?;
            match cli.format {
                OutputFormat::Text => print!("{}", output::render_workouts(&workouts)),
                OutputFormat::Json => output::print_json(&workouts, cli.pretty)?,
            }
        }
        WorkoutsCommand::Show { id } => {
            let workout = api.workout(id).await.context("Could not fetch workout")?;
            match cli.format {
                OutputFormat::Text => print!("{}", output::render_workouts(&[workout])),
                OutputFormat::Json => output::print_json(&workout, cli.pretty)?,
            }
        }
        WorkoutsCommand::Add {
            title,
            activity,
            duration_mins,
            distance_km,
            notes,
        } => {
            let mut draft = WorkoutDraft::new(title.clone(), parse_activity(activity)?)
                .with_started_at(chrono::Utc::now());
            if let Some(mins) = duration_mins {
                draft = draft.with_duration_secs(mins * 60);
            }
            if let Some(km) = distance_km {
                draft = draft.with_distance_m(km * 1000.0);
            }
            if let Some(notes) = notes {
                draft = draft.with_notes(notes.clone());
            }

            let workout = api
                .create_workout(&draft)
                .await
                .context("Could not create workout")?;
            match cli.format {
                OutputFormat::Text => println!("Created workout {}", workout.id),
                OutputFormat::Json => output::print_json(&workout, cli.pretty)?,
            }
        }
        WorkoutsCommand::Delete { id } => {
            api.delete_workout(id)
                .await
                .context("Could not delete workout")?;
            match cli.format {
                OutputFormat::Text => println!("Deleted workout {id}"),
                OutputFormat::Json => {
                    output::print_json(&serde_json::json!({ "deleted": id }), cli.pretty)?;
                }
            }
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activity() {
        assert_eq!(parse_activity("running").unwrap(), ActivityKind::Running);
        assert_eq!(parse_activity("Strength").unwrap(), ActivityKind::Strength);
        assert!(parse_activity("juggling").is_err());
    }
}
