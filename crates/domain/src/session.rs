//! Workout session
//!
//! The in-memory workout that is being built while training. All changes go through the
//! operations of [`WorkoutSession`]; the session is never persisted and is discarded on
//! cancellation or after a successful submission.

use std::collections::BTreeSet;

use derive_more::Display;
use uuid::Uuid;

use crate::{ExerciseID, Name, WeightUnit};

/// Locally generated identifier of an exercise or set within a session.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalID(Uuid);

impl LocalID {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionExercise {
    pub id: LocalID,
    pub name: Name,
    pub exercise_id: ExerciseID,
    pub sets: Vec<SessionSet>,
}

impl SessionExercise {
    #[must_use]
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }
}

/// A set while it is edited. Reps and weight stay free text until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSet {
    pub id: LocalID,
    pub reps: String,
    pub weight: String,
    pub weight_unit: WeightUnit,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Reps,
    Weight,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutSession {
    exercises: Vec<SessionExercise>,
    weight_unit: WeightUnit,
}

impl WorkoutSession {
    #[must_use]
    pub fn new(weight_unit: WeightUnit) -> Self {
        Self {
            exercises: vec![],
            weight_unit,
        }
    }

    #[must_use]
    pub fn exercises(&self) -> &[SessionExercise] {
        &self.exercises
    }

    #[must_use]
    pub fn exercise(&self, exercise_id: LocalID) -> Option<&SessionExercise> {
        self.exercises.iter().find(|e| e.id == exercise_id)
    }

    #[must_use]
    pub fn weight_unit(&self) -> WeightUnit {
        self.weight_unit
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Appends an exercise with no sets. The same exercise may be added more than once.
    pub fn add_exercise(&mut self, name: Name, exercise_id: ExerciseID) -> LocalID {
        let id = LocalID::new();
        self.exercises.push(SessionExercise {
            id,
            name,
            exercise_id,
            sets: vec![],
        });
        id
    }

    pub fn remove_exercise(&mut self, exercise_id: LocalID) {
        self.exercises.retain(|e| e.id != exercise_id);
    }

    /// Appends an empty, incomplete set using the current weight unit.
    ///
    /// Returns `None` if the exercise is not part of the session.
    pub fn add_set(&mut self, exercise_id: LocalID) -> Option<LocalID> {
        let weight_unit = self.weight_unit;
        let exercise = self.exercises.iter_mut().find(|e| e.id == exercise_id)?;
        let id = LocalID::new();
        exercise.sets.push(SessionSet {
            id,
            reps: String::new(),
            weight: String::new(),
            weight_unit,
            completed: false,
        });
        Some(id)
    }

    pub fn update_set(
        &mut self,
        exercise_id: LocalID,
        set_id: LocalID,
        field: SetField,
        value: &str,
    ) {
        if let Some(set) = self.set_mut(exercise_id, set_id) {
            match field {
                SetField::Reps => set.reps = value.to_string(),
                SetField::Weight => set.weight = value.to_string(),
            }
        }
    }

    pub fn toggle_set_completion(&mut self, exercise_id: LocalID, set_id: LocalID) {
        if let Some(set) = self.set_mut(exercise_id, set_id) {
            set.completed = !set.completed;
        }
    }

    pub fn remove_set(&mut self, exercise_id: LocalID, set_id: LocalID) {
        if let Some(exercise) = self.exercises.iter_mut().find(|e| e.id == exercise_id) {
            exercise.sets.retain(|s| s.id != set_id);
        }
    }

    /// Changes the unit of sets added from now on. Existing sets keep their unit.
    pub fn set_weight_unit(&mut self, weight_unit: WeightUnit) {
        self.weight_unit = weight_unit;
    }

    pub fn reset(&mut self) {
        self.exercises.clear();
    }

    /// A workout can be completed once it contains an exercise and no set is left open.
    #[must_use]
    pub fn can_complete(&self) -> bool {
        !self.exercises.is_empty()
            && self
                .exercises
                .iter()
                .all(|e| e.sets.iter().all(|s| s.completed))
    }

    #[must_use]
    pub fn distinct_exercise_count(&self) -> usize {
        self.exercises
            .iter()
            .map(|e| &e.name)
            .collect::<BTreeSet<_>>()
            .len()
    }

    fn set_mut(&mut self, exercise_id: LocalID, set_id: LocalID) -> Option<&mut SessionSet> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)?
            .sets
            .iter_mut()
            .find(|s| s.id == set_id)
    }
}
