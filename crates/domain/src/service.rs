use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use futures_util::future::try_join_all;
use log::{debug, error, info};

use crate::{
    CreateError, DeleteError, Exercise, ExerciseID, ExerciseRepository, ExerciseService, GuideError,
    GuideRepository, GuideService, Name, ReadError, SubmissionService, SubmitError, UserID,
    Workout, WorkoutID, WorkoutRepository, WorkoutService, WorkoutSession, completed_exercises,
    guide_prompt, new_workout,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn get_exercise(&self, id: &ExerciseID) -> Result<Option<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercise(id),
            ReadError,
            "get",
            "exercise"
        )
    }

    async fn find_exercise(&self, name: &Name) -> Result<Option<Exercise>, ReadError> {
        log_on_error!(
            self.repository.find_exercise(name),
            ReadError,
            "find",
            "exercise"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self, user_id: &UserID) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(user_id),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(&self, id: &WorkoutID) -> Result<Option<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workout(id),
            ReadError,
            "get",
            "workout"
        )
    }

    async fn delete_workout(&self, id: &WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: GuideRepository> GuideService for Service<R> {
    async fn get_guide(&self, exercise_name: &str) -> Result<String, GuideError> {
        let prompt = guide_prompt(exercise_name)?;
        log_on_error!(
            self.repository.request_guide(&prompt),
            GuideError,
            "request",
            "guide"
        )
    }
}

impl<R: ExerciseRepository + WorkoutRepository> SubmissionService for Service<R> {
    async fn submit_workout(
        &self,
        session: &WorkoutSession,
        user_id: &UserID,
        duration: u32,
    ) -> Result<WorkoutID, SubmitError> {
        // An empty session is reported by `completed_exercises`.
        if !session.is_empty() && !session.can_complete() {
            return Err(SubmitError::OpenSets);
        }
        let exercises = completed_exercises(session)?;

        let names = exercises.iter().map(|e| &e.name).collect::<BTreeSet<_>>();
        let exercise_ids = try_join_all(names.into_iter().map(|name| async move {
            match self.find_exercise(name).await {
                Ok(Some(exercise)) => Ok((name.clone(), exercise.id)),
                Ok(None) => Err(SubmitError::ExerciseNotFound(name.clone())),
                Err(err) => Err(SubmitError::Read(err)),
            }
        }))
        .await?
        .into_iter()
        .collect::<BTreeMap<_, _>>();

        let workout = new_workout(
            &exercises,
            &exercise_ids,
            user_id.clone(),
            Utc::now(),
            duration,
        )?;
        let num_sets = workout.sets.len();

        let id = log_on_error!(
            self.repository.create_workout(workout),
            CreateError,
            "create",
            "workout"
        )?;
        info!("saved workout {id} with {num_sets} sets");

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        Difficulty, ExerciseRef, FailureKind, NewWorkout, SetField, StorageError, WeightUnit,
        WorkoutSet,
    };

    #[derive(Default)]
    struct FakeRepository {
        exercises: Vec<Exercise>,
        workouts: RefCell<Vec<Workout>>,
        lookups: RefCell<Vec<String>>,
        created: RefCell<Vec<NewWorkout>>,
        prompts: RefCell<Vec<String>>,
        offline: bool,
        read_only: bool,
    }

    impl FakeRepository {
        fn with_exercises(names: &[(&str, &str)]) -> Self {
            Self {
                exercises: names
                    .iter()
                    .map(|(id, name)| Exercise {
                        id: (*id).into(),
                        name: Name::new(name).unwrap(),
                        description: None,
                        difficulty: Difficulty::Beginner,
                        image: None,
                        video_url: None,
                        is_active: true,
                    })
                    .collect(),
                ..Self::default()
            }
        }

        fn check_connection(&self) -> Result<(), StorageError> {
            if self.offline {
                Err(StorageError::NoConnection)
            } else {
                Ok(())
            }
        }
    }

    impl ExerciseRepository for FakeRepository {
        async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
            self.check_connection()?;
            Ok(self.exercises.clone())
        }

        async fn read_exercise(&self, id: &ExerciseID) -> Result<Option<Exercise>, ReadError> {
            self.check_connection()?;
            Ok(self.exercises.iter().find(|e| e.id == *id).cloned())
        }

        async fn find_exercise(&self, name: &Name) -> Result<Option<Exercise>, ReadError> {
            self.lookups.borrow_mut().push(name.to_string());
            self.check_connection()?;
            Ok(self.exercises.iter().find(|e| e.name == *name).cloned())
        }
    }

    impl WorkoutRepository for FakeRepository {
        async fn read_workouts(&self, user_id: &UserID) -> Result<Vec<Workout>, ReadError> {
            self.check_connection()?;
            let mut workouts = self
                .workouts
                .borrow()
                .iter()
                .filter(|w| w.user_id == *user_id)
                .cloned()
                .collect::<Vec<_>>();
            workouts.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(workouts)
        }

        async fn read_workout(&self, id: &WorkoutID) -> Result<Option<Workout>, ReadError> {
            self.check_connection()?;
            Ok(self.workouts.borrow().iter().find(|w| w.id == *id).cloned())
        }

        async fn create_workout(&self, workout: NewWorkout) -> Result<WorkoutID, CreateError> {
            self.check_connection()?;
            if self.read_only {
                return Err(StorageError::NoConnection.into());
            }
            let id = WorkoutID::from(format!("workout-{}", self.created.borrow().len() + 1));
            self.workouts.borrow_mut().push(Workout {
                id: id.clone(),
                user_id: workout.user_id.clone(),
                date: workout.date,
                duration: workout.duration,
                sets: workout.sets.clone(),
            });
            self.created.borrow_mut().push(workout);
            Ok(id)
        }

        async fn delete_workout(&self, id: &WorkoutID) -> Result<WorkoutID, DeleteError> {
            self.check_connection()?;
            self.workouts.borrow_mut().retain(|w| w.id != *id);
            Ok(id.clone())
        }
    }

    impl GuideRepository for FakeRepository {
        async fn request_guide(&self, prompt: &str) -> Result<String, GuideError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.check_connection()?;
            Ok("# Equipment Required\n\nBarbell".to_string())
        }
    }

    fn user() -> UserID {
        UserID::new("user_1").unwrap()
    }

    fn session(sets: &[(&str, &str, &str, bool)]) -> WorkoutSession {
        let mut session = WorkoutSession::new(WeightUnit::Kg);
        for (name, reps, weight, completed) in sets {
            let existing = session
                .exercises()
                .iter()
                .find(|e| e.name.as_ref() == name)
                .map(|e| e.id);
            let exercise_id = match existing {
                Some(id) => id,
                None => session.add_exercise(Name::new(name).unwrap(), "local".into()),
            };
            let set_id = session.add_set(exercise_id).unwrap();
            session.update_set(exercise_id, set_id, SetField::Reps, reps);
            session.update_set(exercise_id, set_id, SetField::Weight, weight);
            if *completed {
                session.toggle_set_completion(exercise_id, set_id);
            }
        }
        session
    }

    #[tokio::test]
    async fn test_submit_workout() {
        let service = Service::new(FakeRepository::with_exercises(&[
            ("ex-bench", "Bench Press"),
            ("ex-squat", "Squat"),
        ]));
        let session = session(&[
            ("Bench Press", "10", "50", true),
            ("Bench Press", "", "20", true),
            ("Squat", "5", "100", true),
        ]);

        let id = service.submit_workout(&session, &user(), 1800).await.unwrap();

        assert_eq!(id, WorkoutID::from("workout-1"));
        let created = service.repository.created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].user_id, user());
        assert_eq!(created[0].duration, 1800);
        assert_eq!(
            created[0]
                .sets
                .iter()
                .map(|s| (s.exercise.id.to_string(), s.reps))
                .collect::<Vec<_>>(),
            vec![("ex-bench".to_string(), 10), ("ex-squat".to_string(), 5)]
        );
        assert_eq!(session.exercises().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_workout_looks_up_each_exercise_once() {
        let service = Service::new(FakeRepository::with_exercises(&[("ex-squat", "Squat")]));
        let mut session = session(&[("Squat", "5", "100", true)]);
        let second = session.add_exercise(Name::new("Squat").unwrap(), "ex-squat".into());
        let set_id = session.add_set(second).unwrap();
        session.update_set(second, set_id, SetField::Reps, "3");
        session.update_set(second, set_id, SetField::Weight, "110");
        session.toggle_set_completion(second, set_id);

        service.submit_workout(&session, &user(), 60).await.unwrap();

        assert_eq!(*service.repository.lookups.borrow(), vec!["Squat"]);
        assert_eq!(service.repository.created.borrow()[0].sets.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_workout_without_exercises() {
        let service = Service::new(FakeRepository::with_exercises(&[("ex-squat", "Squat")]));

        let result = service
            .submit_workout(&WorkoutSession::default(), &user(), 60)
            .await;

        assert!(matches!(result, Err(SubmitError::NoCompletedSets)));
        assert!(service.repository.lookups.borrow().is_empty());
        assert!(service.repository.created.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_submit_workout_without_completed_sets() {
        let service = Service::new(FakeRepository::with_exercises(&[("ex-squat", "Squat")]));
        let session = session(&[("Squat", "", "100", true), ("Squat", "5", " ", true)]);

        let result = service.submit_workout(&session, &user(), 60).await;

        assert!(matches!(result, Err(SubmitError::NoCompletedSets)));
        assert!(service.repository.lookups.borrow().is_empty());
        assert!(service.repository.created.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_submit_workout_with_open_set() {
        let service = Service::new(FakeRepository::with_exercises(&[("ex-squat", "Squat")]));
        let mut session = session(&[("Squat", "5", "100", true)]);
        let exercise_id = session.exercises()[0].id;
        session.add_set(exercise_id).unwrap();

        let result = service.submit_workout(&session, &user(), 60).await;

        assert!(matches!(result, Err(SubmitError::OpenSets)));
        assert_eq!(
            result.err().map(|err| err.kind()),
            Some(FailureKind::Validation)
        );
        assert!(service.repository.lookups.borrow().is_empty());
        assert!(service.repository.created.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_submit_workout_with_unknown_exercise() {
        let service = Service::new(FakeRepository::with_exercises(&[("ex-squat", "Squat")]));
        let session = session(&[("Squat", "5", "100", true), ("Lunge", "10", "20", true)]);

        let result = service.submit_workout(&session, &user(), 60).await;

        assert!(matches!(
            result,
            Err(SubmitError::ExerciseNotFound(ref name)) if name.to_string() == "Lunge"
        ));
        assert!(service.repository.created.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_submit_workout_without_connection() {
        let service = Service::new(FakeRepository {
            offline: true,
            ..FakeRepository::with_exercises(&[("ex-squat", "Squat")])
        });
        let session = session(&[("Squat", "5", "100", true)]);

        let result = service.submit_workout(&session, &user(), 60).await;

        assert!(matches!(
            result,
            Err(SubmitError::Read(ReadError::Storage(StorageError::NoConnection)))
        ));
        assert!(service.repository.created.borrow().is_empty());
        assert_eq!(session.exercises()[0].completed_sets(), 1);
    }

    #[tokio::test]
    async fn test_submit_workout_with_failing_write() {
        let service = Service::new(FakeRepository {
            read_only: true,
            ..FakeRepository::with_exercises(&[("ex-squat", "Squat")])
        });
        let session = session(&[("Squat", "5", "100", true)]);
        let before = session.clone();

        let result = service.submit_workout(&session, &user(), 60).await;

        assert!(matches!(
            result,
            Err(SubmitError::Create(CreateError::Storage(
                StorageError::NoConnection
            )))
        ));
        assert_eq!(
            result.err().map(|err| err.kind()),
            Some(FailureKind::Transport)
        );
        assert_eq!(*service.repository.lookups.borrow(), vec!["Squat"]);
        assert!(service.repository.workouts.borrow().is_empty());
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn test_reset_after_submission_keeps_stored_workout() {
        let service = Service::new(FakeRepository::with_exercises(&[("ex-squat", "Squat")]));
        let mut session = session(&[("Squat", "5", "100", true)]);

        let id = service.submit_workout(&session, &user(), 60).await.unwrap();
        session.reset();

        assert!(session.is_empty());
        let stored = service.get_workout(&id).await.unwrap().unwrap();
        assert_eq!(stored.sets.len(), 1);
    }

    #[tokio::test]
    async fn test_get_workouts() {
        let repository = FakeRepository::default();
        for (id, user_id, day) in [("a", "user_1", 1), ("b", "user_2", 2), ("c", "user_1", 3)] {
            repository.workouts.borrow_mut().push(Workout {
                id: id.into(),
                user_id: UserID::new(user_id).unwrap(),
                date: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
                duration: 60,
                sets: vec![WorkoutSet {
                    key: "k".to_string(),
                    exercise: ExerciseRef {
                        id: "ex-squat".into(),
                        name: None,
                    },
                    reps: 5,
                    weight: 100.0,
                    weight_unit: WeightUnit::Kg,
                }],
            });
        }
        let service = Service::new(repository);

        assert_eq!(
            service
                .get_workouts(&user())
                .await
                .unwrap()
                .iter()
                .map(|w| w.id.to_string())
                .collect::<Vec<_>>(),
            vec!["c", "a"]
        );

        assert_eq!(
            service.delete_workout(&"c".into()).await.unwrap(),
            WorkoutID::from("c")
        );
        assert_eq!(service.get_workouts(&user()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_exercises() {
        let service = Service::new(FakeRepository::with_exercises(&[
            ("ex-bench", "Bench Press"),
            ("ex-squat", "Squat"),
        ]));

        assert_eq!(service.get_exercises().await.unwrap().len(), 2);
        assert_eq!(
            service
                .get_exercise(&"ex-squat".into())
                .await
                .unwrap()
                .map(|e| e.name.to_string()),
            Some("Squat".to_string())
        );
        assert_eq!(service.get_exercise(&"ex-row".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_guide() {
        let service = Service::new(FakeRepository::default());

        let guide = service.get_guide("Squat").await.unwrap();

        assert!(guide.starts_with("# Equipment Required"));
        assert!(service.repository.prompts.borrow()[0].contains("The exercise name is: Squat"));
    }

    #[tokio::test]
    async fn test_get_guide_without_exercise_name() {
        let service = Service::new(FakeRepository::default());

        assert!(matches!(
            service.get_guide(" ").await,
            Err(GuideError::EmptyExerciseName)
        ));
        assert!(service.repository.prompts.borrow().is_empty());
    }
}
