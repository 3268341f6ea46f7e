use crate::Name;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum GuideError {
    #[error("Exercise name is required")]
    EmptyExerciseName,
    #[error("empty response")]
    EmptyResponse,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("Please complete at least one set before saving the workout")]
    NoCompletedSets,
    #[error("Please complete or remove all open sets before saving the workout")]
    OpenSets,
    #[error("Exercise \"{0}\" not found in database")]
    ExerciseNotFound(Name),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Create(#[from] CreateError),
}

/// The two ways a user-visible operation can fail.
///
/// Validation failures are corrected by the user changing their input,
/// transport failures by retrying. Neither is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Transport,
}

impl SubmitError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            SubmitError::NoCompletedSets | SubmitError::OpenSets => FailureKind::Validation,
            SubmitError::ExerciseNotFound(_) | SubmitError::Read(_) | SubmitError::Create(_) => {
                FailureKind::Transport
            }
        }
    }
}

impl GuideError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            GuideError::EmptyExerciseName => FailureKind::Validation,
            GuideError::EmptyResponse | GuideError::Storage(_) | GuideError::Other(_) => {
                FailureKind::Transport
            }
        }
    }
}

impl From<ReadError> for GuideError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => GuideError::Storage(storage),
            ReadError::Other(other) => GuideError::Other(other),
        }
    }
}
