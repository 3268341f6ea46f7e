//! Submission
//!
//! Turns a [`WorkoutSession`] into the record that is stored. Only completed sets with reps and
//! weight are kept, exercises without such sets are dropped. Reps and weight are parsed at this
//! point from their leading number, input without one counts as zero.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    ExerciseID, ExerciseRef, Name, NewWorkout, SubmitError, UserID, WeightUnit, WorkoutID,
    WorkoutSession, WorkoutSet,
};

#[allow(async_fn_in_trait)]
pub trait SubmissionService {
    /// Stores the completed part of the session.
    ///
    /// The session itself is left untouched, resetting it after success is up to the caller.
    async fn submit_workout(
        &self,
        session: &WorkoutSession,
        user_id: &UserID,
        duration: u32,
    ) -> Result<WorkoutID, SubmitError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedExercise {
    pub name: Name,
    pub sets: Vec<CompletedSet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSet {
    pub reps: u32,
    pub weight: f32,
    pub weight_unit: WeightUnit,
}

/// Extracts the completed work of a session.
///
/// Fails with [`SubmitError::NoCompletedSets`] if nothing remains, so that no lookup or write
/// is started for a session without completed work.
pub fn completed_exercises(
    session: &WorkoutSession,
) -> Result<Vec<CompletedExercise>, SubmitError> {
    let exercises = session
        .exercises()
        .iter()
        .map(|e| CompletedExercise {
            name: e.name.clone(),
            sets: e
                .sets
                .iter()
                // Whitespace-only input counts as missing, not as zero.
                .filter(|s| s.completed && !s.reps.trim().is_empty() && !s.weight.trim().is_empty())
                .map(|s| CompletedSet {
                    reps: parse_reps(&s.reps),
                    weight: parse_weight(&s.weight),
                    weight_unit: s.weight_unit,
                })
                .collect::<Vec<_>>(),
        })
        .filter(|e| !e.sets.is_empty())
        .collect::<Vec<_>>();

    if exercises.is_empty() {
        return Err(SubmitError::NoCompletedSets);
    }

    Ok(exercises)
}

/// Builds the stored record from the completed work and the resolved exercise identifiers.
pub fn new_workout(
    exercises: &[CompletedExercise],
    exercise_ids: &BTreeMap<Name, ExerciseID>,
    user_id: UserID,
    date: DateTime<Utc>,
    duration: u32,
) -> Result<NewWorkout, SubmitError> {
    let mut sets = vec![];
    for exercise in exercises {
        let id = exercise_ids
            .get(&exercise.name)
            .ok_or_else(|| SubmitError::ExerciseNotFound(exercise.name.clone()))?;
        sets.extend(exercise.sets.iter().map(|s| WorkoutSet {
            key: set_key(),
            exercise: ExerciseRef {
                id: id.clone(),
                name: Some(exercise.name.clone()),
            },
            reps: s.reps,
            weight: s.weight,
            weight_unit: s.weight_unit,
        }));
    }

    Ok(NewWorkout {
        user_id,
        date,
        duration,
        sets,
    })
}

/// Parses the leading whole number, e.g. `"8 reps"` as 8 and `"7.5"` as 7.
#[must_use]
pub fn parse_reps(value: &str) -> u32 {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits = value.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return 0;
    }
    value[..digits].parse::<u32>().unwrap_or(u32::MAX)
}

/// Parses the leading decimal number, e.g. `"22.5kg"` as 22.5. Negative and non-finite weights
/// count as zero.
#[must_use]
pub fn parse_weight(value: &str) -> f32 {
    match decimal_prefix(value.trim_start()).parse::<f32>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => weight,
        _ => 0.0,
    }
}

fn decimal_prefix(value: &str) -> &str {
    let bytes = value.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits(end);
    end += integer;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(end + 1);
        end += 1 + fraction;
    }
    if integer == 0 && fraction == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    &value[..end]
}

fn set_key() -> String {
    Uuid::new_v4().simple().to_string()
}
