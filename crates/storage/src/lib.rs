#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use fitlog_domain::{self as domain, ExerciseRepository, GuideRepository, WorkoutRepository};

pub mod completion;
pub mod config;
pub mod content_store;
pub mod documents;
pub mod rest;

#[cfg(test)]
mod tests;

pub use completion::CompletionClient;
pub use config::{CompletionConfig, StoreConfig};
pub use content_store::ContentStore;
pub use rest::{ReqwestSendRequest, SendRequest};

/// All remote backends behind a single repository.
pub struct Remote<S: SendRequest> {
    store: ContentStore<S>,
    completion: CompletionClient<S>,
}

impl<S: SendRequest> Remote<S> {
    pub fn new(store: ContentStore<S>, completion: CompletionClient<S>) -> Self {
        Self { store, completion }
    }
}

impl Remote<ReqwestSendRequest> {
    #[must_use]
    pub fn connect(store: StoreConfig, completion: CompletionConfig) -> Self {
        let sender = ReqwestSendRequest::default();
        Self::new(
            ContentStore::new(store, sender.clone()),
            CompletionClient::new(completion, sender),
        )
    }
}

impl<S: SendRequest> ExerciseRepository for Remote<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        self.store.read_exercises().await
    }

    async fn read_exercise(
        &self,
        id: &domain::ExerciseID,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        self.store.read_exercise(id).await
    }

    async fn find_exercise(
        &self,
        name: &domain::Name,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        self.store.find_exercise(name).await
    }
}

impl<S: SendRequest> WorkoutRepository for Remote<S> {
    async fn read_workouts(
        &self,
        user_id: &domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.store.read_workouts(user_id).await
    }

    async fn read_workout(
        &self,
        id: &domain::WorkoutID,
    ) -> Result<Option<domain::Workout>, domain::ReadError> {
        self.store.read_workout(id).await
    }

    async fn create_workout(
        &self,
        workout: domain::NewWorkout,
    ) -> Result<domain::WorkoutID, domain::CreateError> {
        self.store.create_workout(workout).await
    }

    async fn delete_workout(
        &self,
        id: &domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.store.delete_workout(id).await
    }
}

impl<S: SendRequest> GuideRepository for Remote<S> {
    async fn request_guide(&self, prompt: &str) -> Result<String, domain::GuideError> {
        self.completion.request_guide(prompt).await
    }
}
