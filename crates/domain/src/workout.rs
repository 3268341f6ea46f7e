use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_more::{AsRef, Display};
use strum::{EnumString, IntoStaticStr};

use crate::{CreateError, DeleteError, ExerciseID, Name, ReadError, UserID};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, user_id: &UserID) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: &WorkoutID) -> Result<Option<Workout>, ReadError>;
    async fn delete_workout(&self, id: &WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    /// Workouts of the given user, most recent first.
    async fn read_workouts(&self, user_id: &UserID) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: &WorkoutID) -> Result<Option<Workout>, ReadError>;
    async fn create_workout(&self, workout: NewWorkout) -> Result<WorkoutID, CreateError>;
    async fn delete_workout(&self, id: &WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub sets: Vec<WorkoutSet>,
}

/// A workout as it is submitted to the store, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub user_id: UserID,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub key: String,
    pub exercise: ExerciseRef,
    pub reps: u32,
    pub weight: f32,
    pub weight_unit: WeightUnit,
}

impl WorkoutSet {
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let reps = self.reps as f32;
        reps * self.weight
    }

    fn contributes_volume(&self) -> bool {
        self.reps > 0 && self.weight > 0.0
    }
}

/// Reference to an exercise document, with the name if the store resolved it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRef {
    pub id: ExerciseID,
    pub name: Option<Name>,
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    pub value: f32,
    pub unit: WeightUnit,
}

/// Sets of one exercise within a workout, in the order they were performed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseGroup<'a> {
    pub exercise: &'a ExerciseRef,
    pub sets: Vec<&'a WorkoutSet>,
}

impl ExerciseGroup<'_> {
    #[must_use]
    pub fn volume(&self) -> Volume {
        Volume {
            value: self.sets.iter().map(|s| s.volume()).sum(),
            unit: self
                .sets
                .first()
                .map(|s| s.weight_unit)
                .unwrap_or_default(),
        }
    }
}

impl Workout {
    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.sets
            .iter()
            .map(|s| &s.exercise.id)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Distinct names of the performed exercises in the order of their first set.
    #[must_use]
    pub fn exercise_names(&self) -> Vec<&Name> {
        let mut seen = BTreeSet::new();
        self.sets
            .iter()
            .filter_map(|s| s.exercise.name.as_ref())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// The unit is taken from the last set that contributes to the volume.
    #[must_use]
    pub fn total_volume(&self) -> Volume {
        self.sets
            .iter()
            .filter(|s| s.contributes_volume())
            .fold(
                Volume {
                    value: 0.0,
                    unit: WeightUnit::default(),
                },
                |acc, s| Volume {
                    value: acc.value + s.volume(),
                    unit: s.weight_unit,
                },
            )
    }

    #[must_use]
    pub fn exercise_groups(&self) -> Vec<ExerciseGroup<'_>> {
        let mut groups: Vec<ExerciseGroup> = vec![];
        for set in &self.sets {
            match groups
                .iter_mut()
                .find(|g| g.exercise.id == set.exercise.id)
            {
                Some(group) => group.sets.push(set),
                None => groups.push(ExerciseGroup {
                    exercise: &set.exercise,
                    sets: vec![set],
                }),
            }
        }
        groups
    }
}
