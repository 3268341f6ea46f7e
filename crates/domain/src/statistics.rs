use chrono::NaiveDate;

use crate::Workout;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub total_duration: u64,
    pub average_duration: u64,
}

#[must_use]
pub fn workout_stats(workouts: &[Workout]) -> WorkoutStats {
    let total_workouts = workouts.len();
    let total_duration = workouts.iter().map(|w| u64::from(w.duration)).sum::<u64>();
    let average_duration = if total_workouts > 0 {
        let n = total_workouts as u64;
        (total_duration + n / 2) / n
    } else {
        0
    };

    WorkoutStats {
        total_workouts,
        total_duration,
        average_duration,
    }
}

/// Whole days between joining and today, zero if the join date lies in the future.
#[must_use]
pub fn days_since(joined: NaiveDate, today: NaiveDate) -> u64 {
    u64::try_from((today - joined).num_days()).unwrap_or(0)
}
