//! Commands
//!
//! Turns command line input into session operations and renders domain values as text.

use std::{collections::HashMap, fmt::Write, str::FromStr};

use chrono::{Local, NaiveDate};
use fitlog_domain::{
    Exercise, LocalID, Name, SetField, VideoKind, WeightUnit, Workout, WorkoutSession,
    WorkoutStats, format_clock, format_date, format_duration, format_time,
};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("invalid set \"{0}\": expected EXERCISE:REPS:WEIGHT[:UNIT][:done|:open]")]
    InvalidSet(String),
    #[error("invalid set \"{spec}\": unexpected \"{part}\"")]
    InvalidSetPart { spec: String, part: String },
    #[error("exercise \"{0}\" not found")]
    UnknownExercise(String),
    #[error("no sets given")]
    NoSets,
}

/// A set as given on the command line, e.g. `Bench Press:10:60:kg:done`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetSpec {
    pub exercise: String,
    pub reps: String,
    pub weight: String,
    pub weight_unit: Option<WeightUnit>,
    pub completed: bool,
}

impl FromStr for SetSpec {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(':').map(str::trim).collect::<Vec<_>>();
        let [exercise, reps, weight, options @ ..] = parts.as_slice() else {
            return Err(CommandError::InvalidSet(s.to_string()));
        };
        if exercise.is_empty() || options.len() > 2 {
            return Err(CommandError::InvalidSet(s.to_string()));
        }

        let mut weight_unit = None;
        let mut completed = None;
        for option in options {
            match option.to_lowercase().as_str() {
                "done" if completed.is_none() => completed = Some(true),
                "open" if completed.is_none() => completed = Some(false),
                unit if weight_unit.is_none() && completed.is_none() => {
                    weight_unit = Some(WeightUnit::from_str(unit).map_err(|_| {
                        CommandError::InvalidSetPart {
                            spec: s.to_string(),
                            part: (*option).to_string(),
                        }
                    })?);
                }
                _ => {
                    return Err(CommandError::InvalidSetPart {
                        spec: s.to_string(),
                        part: (*option).to_string(),
                    });
                }
            }
        }

        Ok(SetSpec {
            exercise: (*exercise).to_string(),
            reps: (*reps).to_string(),
            weight: (*weight).to_string(),
            weight_unit,
            completed: completed.unwrap_or(true),
        })
    }
}

/// Builds a session from the given sets.
///
/// Sets of the same exercise are grouped in the order the exercises first appear. Exercise names
/// are matched case-insensitively against the library and take the library's spelling.
pub fn build_session(
    sets: &[SetSpec],
    exercises: &[Exercise],
    weight_unit: WeightUnit,
) -> Result<WorkoutSession, CommandError> {
    if sets.is_empty() {
        return Err(CommandError::NoSets);
    }

    let mut session = WorkoutSession::new(weight_unit);
    let mut added: HashMap<Name, LocalID> = HashMap::new();

    for set in sets {
        let exercise = find_by_name(exercises, &set.exercise)
            .ok_or_else(|| CommandError::UnknownExercise(set.exercise.clone()))?;
        let exercise_id = *added
            .entry(exercise.name.clone())
            .or_insert_with(|| session.add_exercise(exercise.name.clone(), exercise.id.clone()));

        session.set_weight_unit(set.weight_unit.unwrap_or(weight_unit));
        if let Some(set_id) = session.add_set(exercise_id) {
            session.update_set(exercise_id, set_id, SetField::Reps, &set.reps);
            session.update_set(exercise_id, set_id, SetField::Weight, &set.weight);
            if set.completed {
                session.toggle_set_completion(exercise_id, set_id);
            }
        }
    }

    session.set_weight_unit(weight_unit);
    Ok(session)
}

fn find_by_name<'a>(exercises: &'a [Exercise], name: &str) -> Option<&'a Exercise> {
    let name = name.trim().to_lowercase();
    exercises
        .iter()
        .find(|e| e.name.as_ref().to_lowercase() == name)
}

#[must_use]
pub fn session_summary(session: &WorkoutSession, elapsed: u32) -> String {
    let mut out = format!(
        "Workout {}  {} exercises\n",
        format_clock(elapsed),
        session.distinct_exercise_count()
    );
    for exercise in session.exercises() {
        let _ = writeln!(
            out,
            "  {}  {}/{} sets completed",
            exercise.name,
            exercise.completed_sets(),
            exercise.sets.len()
        );
    }
    out
}

#[must_use]
pub fn exercise_list(exercises: &[&Exercise]) -> String {
    if exercises.is_empty() {
        return "No exercises found\n".to_string();
    }
    let width = exercises
        .iter()
        .map(|e| e.id.as_ref().len())
        .max()
        .unwrap_or_default();
    let mut out = String::new();
    for exercise in exercises {
        let _ = write!(
            out,
            "{:<width$}  {}  [{}]",
            exercise.id.as_ref(),
            exercise.name,
            exercise.difficulty
        );
        if !exercise.is_active {
            out.push_str("  (inactive)");
        }
        out.push('\n');
    }
    out
}

#[must_use]
pub fn exercise_details(exercise: &Exercise) -> String {
    let mut out = format!("{}\nDifficulty: {}\n", exercise.name, exercise.difficulty);
    if let Some(ref description) = exercise.description {
        let _ = writeln!(out, "\n{description}");
    }
    if let Some(ref url) = exercise.video_url {
        let kind = match exercise.video_kind() {
            Some(VideoKind::YouTube) => "YouTube",
            _ => "Video",
        };
        let _ = writeln!(out, "\n{kind}: {url}");
    }
    out
}

#[must_use]
pub fn workout_list(workouts: &[Workout], today: NaiveDate) -> String {
    if workouts.is_empty() {
        return "No workouts yet\n".to_string();
    }
    let mut out = String::new();
    for workout in workouts {
        let date = workout.date.with_timezone(&Local);
        let names = workout
            .exercise_names()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        let _ = writeln!(
            out,
            "{}  {} {}  {}  {} exercises, {} sets  {}",
            workout.id,
            format_date(date.date_naive(), today),
            format_time(date.time()),
            format_duration(workout.duration),
            workout.exercise_count(),
            workout.total_sets(),
            names.join(", ")
        );
    }
    out
}

#[must_use]
pub fn workout_details(workout: &Workout, today: NaiveDate) -> String {
    let date = workout.date.with_timezone(&Local);
    let mut out = format!(
        "{} {}\nDuration: {}\nExercises: {}  Sets: {}\n",
        format_date(date.date_naive(), today),
        format_time(date.time()),
        format_duration(workout.duration),
        workout.exercise_count(),
        workout.total_sets()
    );
    for group in workout.exercise_groups() {
        let name = group
            .exercise
            .name
            .as_ref()
            .map_or_else(|| group.exercise.id.to_string(), ToString::to_string);
        let _ = writeln!(out, "\n{name}");
        for (i, set) in group.sets.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} reps x {} {}",
                i + 1,
                set.reps,
                set.weight,
                set.weight_unit
            );
        }
        let volume = group.volume();
        let _ = writeln!(out, "  Volume: {} {}", volume.value, volume.unit);
    }
    let volume = workout.total_volume();
    let _ = writeln!(out, "\nTotal volume: {} {}", volume.value, volume.unit);
    out
}

#[must_use]
pub fn stats_summary(stats: &WorkoutStats, days_since_joined: Option<u64>) -> String {
    let duration = |seconds: u64| format_duration(u32::try_from(seconds).unwrap_or(u32::MAX));
    let mut out = format!(
        "Total workouts: {}\nTotal time: {}\nAverage duration: {}\n",
        stats.total_workouts,
        duration(stats.total_duration),
        duration(stats.average_duration)
    );
    if let Some(days) = days_since_joined {
        let _ = writeln!(out, "Days since joining: {days}");
    }
    out
}
