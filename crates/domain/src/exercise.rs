use std::collections::HashSet;

use derive_more::{AsRef, Display};
use strum::{EnumString, IntoStaticStr};

use crate::{Name, ReadError};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn get_exercise(&self, id: &ExerciseID) -> Result<Option<Exercise>, ReadError>;
    async fn find_exercise(&self, name: &Name) -> Result<Option<Exercise>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn read_exercise(&self, id: &ExerciseID) -> Result<Option<Exercise>, ReadError>;
    async fn find_exercise(&self, name: &Name) -> Result<Option<Exercise>, ReadError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub description: Option<String>,
    pub difficulty: Difficulty,
    pub image: Option<Image>,
    pub video_url: Option<String>,
    pub is_active: bool,
}

impl Exercise {
    #[must_use]
    pub fn video_kind(&self) -> Option<VideoKind> {
        self.video_url.as_deref().map(|url| {
            if url.contains("youtube.com") || url.contains("youtu.be") {
                VideoKind::YouTube
            } else {
                VideoKind::Link
            }
        })
    }
}

/// Document identifier assigned by the content store.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(String);

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(
    Debug,
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
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub asset_ref: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoKind {
    YouTube,
    Link,
}

#[derive(Default, PartialEq)]
pub struct ExerciseFilter {
    pub name: String,
    pub difficulty: HashSet<Difficulty>,
    pub include_inactive: bool,
}

impl ExerciseFilter {
    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        exercises
            .filter(|e| {
                e.name.matches(&self.name)
                    && (self.include_inactive || e.is_active)
                    && (self.difficulty.is_empty() || self.difficulty.contains(&e.difficulty))
            })
            .collect()
    }
}
