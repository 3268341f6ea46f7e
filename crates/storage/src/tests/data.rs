use chrono::{TimeZone, Utc};
use fitlog_domain as domain;
use serde_json::json;

pub static USER_ID: std::sync::LazyLock<domain::UserID> =
    std::sync::LazyLock::new(|| domain::UserID::new("user_1").unwrap());

pub static EXERCISES: std::sync::LazyLock<Vec<domain::Exercise>> =
    std::sync::LazyLock::new(|| vec![EXERCISE.clone(), EXERCISE_2.clone()]);

pub static EXERCISE: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: "ex-bench".into(),
        name: domain::Name::new("Bench Press").unwrap(),
        description: Some("Press the bar from the chest.".to_string()),
        difficulty: domain::Difficulty::Intermediate,
        image: Some(domain::Image {
            asset_ref: "image-abc123-800x600-jpg".to_string(),
            alt: Some("Bench press".to_string()),
        }),
        video_url: Some("https://www.youtube.com/watch?v=abc123".to_string()),
        is_active: true,
    });

pub static EXERCISE_2: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: "ex-squat".into(),
        name: domain::Name::new("Squat").unwrap(),
        description: None,
        difficulty: domain::Difficulty::Beginner,
        image: None,
        video_url: None,
        is_active: false,
    });

pub static EXERCISE_DOCUMENTS: std::sync::LazyLock<serde_json::Value> =
    std::sync::LazyLock::new(|| json!([EXERCISE_DOCUMENT.clone(), EXERCISE_DOCUMENT_2.clone()]));

pub static EXERCISE_DOCUMENT: std::sync::LazyLock<serde_json::Value> =
    std::sync::LazyLock::new(|| {
        json!({
            "_id": "ex-bench",
            "_type": "exercise",
            "name": "Bench Press",
            "description": "Press the bar from the chest.",
            "difficulty": "intermediate",
            "image": {
                "_type": "image",
                "asset": { "_type": "reference", "_ref": "image-abc123-800x600-jpg" },
                "alt": "Bench press"
            },
            "videoUrl": "https://www.youtube.com/watch?v=abc123",
            "isActive": true
        })
    });

pub static EXERCISE_DOCUMENT_2: std::sync::LazyLock<serde_json::Value> =
    std::sync::LazyLock::new(|| {
        json!({
            "_id": "ex-squat",
            "_type": "exercise",
            "name": "Squat",
            "difficulty": "beginner",
            "isActive": false
        })
    });

pub static WORKOUT: std::sync::LazyLock<domain::Workout> =
    std::sync::LazyLock::new(|| domain::Workout {
        id: "w1".into(),
        user_id: USER_ID.clone(),
        date: Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap(),
        duration: 1800,
        sets: vec![
            domain::WorkoutSet {
                key: "k1".to_string(),
                exercise: domain::ExerciseRef {
                    id: "ex-bench".into(),
                    name: Some(domain::Name::new("Bench Press").unwrap()),
                },
                reps: 10,
                weight: 50.0,
                weight_unit: domain::WeightUnit::Kg,
            },
            domain::WorkoutSet {
                key: "k2".to_string(),
                exercise: domain::ExerciseRef {
                    id: "ex-squat".into(),
                    name: Some(domain::Name::new("Squat").unwrap()),
                },
                reps: 5,
                weight: 100.0,
                weight_unit: domain::WeightUnit::Lbs,
            },
        ],
    });

pub static WORKOUT_DOCUMENT: std::sync::LazyLock<serde_json::Value> =
    std::sync::LazyLock::new(|| {
        json!({
            "_id": "w1",
            "_type": "workout",
            "userId": "user_1",
            "date": "2024-05-06T07:08:09.000Z",
            "duration": 1800,
            "sets": [
                {
                    "_key": "k1",
                    "_type": "set",
                    "exercise": { "_id": "ex-bench", "name": "Bench Press" },
                    "reps": 10,
                    "weight": 50,
                    "weightUnit": "kg"
                },
                {
                    "_key": "k2",
                    "_type": "set",
                    "exercise": { "_id": "ex-squat", "name": "Squat" },
                    "reps": 5,
                    "weight": 100,
                    "weightUnit": "lbs"
                }
            ]
        })
    });
