use fitlog_domain as domain;
use log::{debug, warn};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

use crate::{
    config::StoreConfig,
    documents::{ExerciseDocument, NewWorkoutDocument, WorkoutDocument},
    rest::{Request, SendRequest, fetch},
};

const EXERCISES_QUERY: &str = r#"*[_type == "exercise"] | order(name asc)"#;
const EXERCISE_QUERY: &str = r#"*[_type == "exercise" && _id == $id][0]"#;
const FIND_EXERCISE_QUERY: &str = r#"*[_type == "exercise" && name == $name][0]"#;
const WORKOUTS_QUERY: &str = r#"*[_type == "workout" && userId == $userId] | order(date desc) {
  _id,
  userId,
  date,
  duration,
  sets[] { _key, exercise-> { _id, name }, reps, weight, weightUnit }
}"#;
const WORKOUT_QUERY: &str = r#"*[_type == "workout" && _id == $workoutId][0] {
  _id,
  userId,
  date,
  duration,
  sets[] { _key, exercise-> { _id, name }, reps, weight, weightUnit }
}"#;

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

#[derive(Deserialize)]
struct MutateResponse {
    results: Vec<MutationResult>,
}

#[derive(Deserialize)]
struct MutationResult {
    id: String,
}

/// Exercises and workouts kept in a hosted document store, queried with GROQ over HTTP.
pub struct ContentStore<S: SendRequest> {
    config: StoreConfig,
    sender: S,
}

impl<S: SendRequest> ContentStore<S> {
    pub fn new(config: StoreConfig, sender: S) -> Self {
        Self { config, sender }
    }

    /// Reads published documents only. The token is never sent with queries.
    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
    ) -> Result<T, domain::StorageError> {
        let mut request = Request::get(self.config.query_url())
            .query("query", query)
            .query("perspective", "published");
        for (name, value) in params {
            request = request.query(&format!("${name}"), json!(value).to_string());
        }
        let response: QueryResponse<T> = fetch(&self.sender, request).await?;
        Ok(response.result)
    }

    async fn mutate(&self, mutation: serde_json::Value) -> Result<String, domain::StorageError> {
        let Some(token) = self.config.token.as_deref() else {
            debug!("refusing to modify documents without token");
            return Err(domain::StorageError::Unauthorized);
        };
        let request = Request::post(
            self.config.mutate_url(),
            json!({ "mutations": [mutation] }),
        )
        .query("returnIds", "true")
        .bearer(Some(token));
        let response: MutateResponse = fetch(&self.sender, request).await?;
        response
            .results
            .into_iter()
            .next()
            .map(|result| result.id)
            .ok_or_else(|| domain::StorageError::Other("missing ID in mutation result".into()))
    }
}

fn convert_all<D, T>(documents: Vec<D>) -> Vec<T>
where
    T: TryFrom<D, Error = crate::documents::DocumentError>,
{
    documents
        .into_iter()
        .filter_map(|document| match T::try_from(document) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("skipping document: {err}");
                None
            }
        })
        .collect()
}

fn convert<D, T>(document: Option<D>) -> Result<Option<T>, domain::ReadError>
where
    T: TryFrom<D, Error = crate::documents::DocumentError>,
{
    document
        .map(T::try_from)
        .transpose()
        .map_err(|err| domain::ReadError::Other(err.into()))
}

impl<S: SendRequest> domain::ExerciseRepository for ContentStore<S> {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let documents: Vec<ExerciseDocument> = self.query(EXERCISES_QUERY, &[]).await?;
        Ok(convert_all(documents))
    }

    async fn read_exercise(
        &self,
        id: &domain::ExerciseID,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        let document: Option<ExerciseDocument> = self
            .query(EXERCISE_QUERY, &[("id", &id.to_string())])
            .await?;
        convert(document)
    }

    async fn find_exercise(
        &self,
        name: &domain::Name,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        let document: Option<ExerciseDocument> = self
            .query(FIND_EXERCISE_QUERY, &[("name", &name.to_string())])
            .await?;
        convert(document)
    }
}

impl<S: SendRequest> domain::WorkoutRepository for ContentStore<S> {
    async fn read_workouts(
        &self,
        user_id: &domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let documents: Vec<WorkoutDocument> = self
            .query(WORKOUTS_QUERY, &[("userId", &user_id.to_string())])
            .await?;
        Ok(convert_all(documents))
    }

    async fn read_workout(
        &self,
        id: &domain::WorkoutID,
    ) -> Result<Option<domain::Workout>, domain::ReadError> {
        let document: Option<WorkoutDocument> = self
            .query(WORKOUT_QUERY, &[("workoutId", &id.to_string())])
            .await?;
        convert(document)
    }

    async fn create_workout(
        &self,
        workout: domain::NewWorkout,
    ) -> Result<domain::WorkoutID, domain::CreateError> {
        let document = serde_json::to_value(NewWorkoutDocument::from(&workout))
            .map_err(|err| domain::CreateError::Other(err.into()))?;
        Ok(self.mutate(json!({ "create": document })).await?.into())
    }

    async fn delete_workout(
        &self,
        id: &domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        Ok(self
            .mutate(json!({ "delete": { "id": id.to_string() } }))
            .await?
            .into())
    }
}
