//! Documents
//!
//! Shapes of the documents as they are stored in the content store and their conversion from and
//! into domain types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use fitlog_domain as domain;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DocumentError {
    #[error("invalid name in document {0}: {1}")]
    InvalidName(String, domain::NameError),
    #[error("invalid difficulty in document {0}: {1}")]
    InvalidDifficulty(String, String),
    #[error("invalid user ID in document {0}: {1}")]
    InvalidUserID(String, domain::UserIDError),
    #[error("invalid weight unit in document {0}: {1}")]
    InvalidWeightUnit(String, String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_type", default = "reference_type")]
    pub kind: String,
    #[serde(rename = "_ref")]
    pub id: String,
}

impl Reference {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            kind: reference_type(),
            id: id.to_string(),
        }
    }
}

fn reference_type() -> String {
    "reference".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub image: Option<ImageDocument>,
    pub video_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageDocument {
    pub asset: Option<Reference>,
    pub alt: Option<String>,
}

impl TryFrom<ExerciseDocument> for domain::Exercise {
    type Error = DocumentError;

    fn try_from(value: ExerciseDocument) -> Result<Self, Self::Error> {
        let name = domain::Name::new(&value.name)
            .map_err(|err| DocumentError::InvalidName(value.id.clone(), err))?;
        let difficulty = domain::Difficulty::from_str(&value.difficulty)
            .map_err(|_| DocumentError::InvalidDifficulty(value.id.clone(), value.difficulty))?;
        Ok(domain::Exercise {
            id: value.id.into(),
            name,
            description: value.description,
            difficulty,
            image: value.image.and_then(|image| {
                image.asset.map(|asset| domain::Image {
                    asset_ref: asset.id,
                    alt: image.alt,
                })
            }),
            video_url: value.video_url,
            is_active: value.is_active.unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub duration: Option<f64>,
    pub sets: Option<Vec<SetDocument>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDocument {
    #[serde(rename = "_key")]
    pub key: String,
    pub exercise: Option<ExerciseProjection>,
    pub reps: Option<f64>,
    pub weight: Option<f64>,
    pub weight_unit: Option<String>,
}

/// Dereferenced exercise of a set, only the projected fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExerciseProjection {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: Option<String>,
}

impl TryFrom<WorkoutDocument> for domain::Workout {
    type Error = DocumentError;

    fn try_from(value: WorkoutDocument) -> Result<Self, Self::Error> {
        let user_id = domain::UserID::new(&value.user_id)
            .map_err(|err| DocumentError::InvalidUserID(value.id.clone(), err))?;
        let mut sets = vec![];
        for set in value.sets.unwrap_or_default() {
            let Some(exercise) = set.exercise else {
                warn!("skipping set {} of workout {} without exercise", set.key, value.id);
                continue;
            };
            let weight_unit = match set.weight_unit {
                Some(ref unit) => domain::WeightUnit::from_str(unit)
                    .map_err(|_| DocumentError::InvalidWeightUnit(value.id.clone(), unit.clone()))?,
                None => domain::WeightUnit::default(),
            };
            sets.push(domain::WorkoutSet {
                key: set.key,
                exercise: domain::ExerciseRef {
                    id: exercise.id.into(),
                    name: exercise.name.and_then(|name| domain::Name::new(&name).ok()),
                },
                reps: to_u32(set.reps),
                weight: to_f32(set.weight),
                weight_unit,
            });
        }
        Ok(domain::Workout {
            id: value.id.into(),
            user_id,
            date: value.date,
            duration: to_u32(value.duration),
            sets,
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u32(value: Option<f64>) -> u32 {
    value
        .filter(|v| v.is_finite())
        .map_or(0, |v| v.round().clamp(0.0, f64::from(u32::MAX)) as u32)
}

#[allow(clippy::cast_possible_truncation)]
fn to_f32(value: Option<f64>) -> f32 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0) as f32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutDocument {
    #[serde(rename = "_type")]
    pub kind: &'static str,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub sets: Vec<NewSetDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSetDocument {
    #[serde(rename = "_type")]
    pub kind: &'static str,
    #[serde(rename = "_key")]
    pub key: String,
    pub exercise: Reference,
    pub reps: u32,
    pub weight: f32,
    pub weight_unit: &'static str,
}

impl From<&domain::NewWorkout> for NewWorkoutDocument {
    fn from(value: &domain::NewWorkout) -> Self {
        Self {
            kind: "workout",
            user_id: value.user_id.to_string(),
            date: value.date,
            duration: value.duration,
            sets: value
                .sets
                .iter()
                .map(|s| NewSetDocument {
                    kind: "set",
                    key: s.key.clone(),
                    exercise: Reference::new(&s.exercise.id.to_string()),
                    reps: s.reps,
                    weight: s.weight,
                    weight_unit: s.weight_unit.into(),
                })
                .collect(),
        }
    }
}
