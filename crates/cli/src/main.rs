//! Command line front end.
//!
//! ```bash
//! fitlog exercises --search press --difficulty beginner
//! fitlog guide "Bench Press"
//! fitlog log --duration 1800 --set "Bench Press:10:60:kg" --set "Squat:5:100:lbs"
//! fitlog history
//! fitlog stats --joined 2024-01-01
//! ```

use std::{fmt::Display, path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::anyhow;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use fitlog_cli::{
    commands::{
        SetSpec, build_session, exercise_details, exercise_list, session_summary, stats_summary,
        workout_details, workout_list,
    },
    config::Config,
    log as logger,
};
use fitlog_domain::{
    Difficulty, ExerciseFilter, ExerciseID, ExerciseService, FailureKind, GuideService, Service,
    SubmissionService, WeightUnit, WorkoutID, WorkoutService, days_since, workout_stats,
};
use fitlog_storage::Remote;
use log::{LevelFilter, debug};

const LOG_CAPACITY: usize = 100;

#[derive(Parser)]
#[command(
    name = "fitlog",
    about = "Log strength workouts and browse the exercise library",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to config.json in the platform's config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug messages
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List exercises
    Exercises {
        /// Only exercises whose name contains the text
        #[arg(long)]
        search: Option<String>,

        /// Only exercises of the given difficulty (repeatable)
        #[arg(long)]
        difficulty: Vec<Difficulty>,

        /// Include inactive exercises
        #[arg(long)]
        all: bool,
    },

    /// Show an exercise
    Exercise { id: String },

    /// Ask for instructions on how to perform an exercise
    Guide { name: String },

    /// List past workouts
    History,

    /// Show a past workout
    Show { id: String },

    /// Delete a past workout
    Delete { id: String },

    /// Summarize past workouts
    Stats {
        /// Date of joining, for the days-since-joining count
        #[arg(long)]
        joined: Option<NaiveDate>,
    },

    /// Record a workout
    Log {
        /// Duration in seconds
        #[arg(long)]
        duration: u32,

        /// A set as EXERCISE:REPS:WEIGHT[:UNIT][:done|:open] (repeatable)
        #[arg(long = "set", required = true)]
        sets: Vec<SetSpec>,

        /// Weight unit of sets without an explicit unit
        #[arg(long)]
        unit: Option<WeightUnit>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, level) = match setup(&cli) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logger::init(Arc::new(logger::RingBuffer::new(LOG_CAPACITY)), level) {
        eprintln!("failed to initialize logger: {err}");
    }

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let details = logger::recent_entries()
                .into_iter()
                .filter(|entry| entry.level > level)
                .collect::<Vec<_>>();
            if !details.is_empty() {
                eprintln!("Details:");
                for entry in details {
                    eprintln!("  {entry}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn setup(cli: &Cli) -> anyhow::Result<(Config, LevelFilter)> {
    let config = Config::load(cli.config.as_deref())?;
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        config.log_level()?
    };
    Ok((config, level))
}

fn failure(err: impl Display) -> anyhow::Error {
    anyhow!("{err}")
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let service = Service::new(Remote::connect(
        config.store()?.clone(),
        config.completion.clone(),
    ));
    let today = Local::now().date_naive();

    match command {
        Command::Exercises {
            search,
            difficulty,
            all,
        } => {
            let exercises = service.get_exercises().await.map_err(failure)?;
            let filter = ExerciseFilter {
                name: search.unwrap_or_default(),
                difficulty: difficulty.into_iter().collect(),
                include_inactive: all,
            };
            print!("{}", exercise_list(&filter.exercises(exercises.iter())));
        }
        Command::Exercise { id } => {
            let id = ExerciseID::from(id);
            let exercise = service
                .get_exercise(&id)
                .await
                .map_err(failure)?
                .ok_or_else(|| anyhow!("exercise {id} not found"))?;
            print!("{}", exercise_details(&exercise));
        }
        Command::Guide { name } => {
            let guide = service
                .get_guide(&name)
                .await
                .map_err(|err| match err.kind() {
                    FailureKind::Validation => failure(err),
                    FailureKind::Transport => anyhow!("failed to get guide: {err}"),
                })?;
            println!("{guide}");
        }
        Command::History => {
            let user_id = config.user_id()?;
            let workouts = service.get_workouts(&user_id).await.map_err(failure)?;
            print!("{}", workout_list(&workouts, today));
        }
        Command::Show { id } => {
            let id = WorkoutID::from(id);
            let workout = service
                .get_workout(&id)
                .await
                .map_err(failure)?
                .ok_or_else(|| anyhow!("workout {id} not found"))?;
            print!("{}", workout_details(&workout, today));
        }
        Command::Delete { id } => {
            let id = service
                .delete_workout(&WorkoutID::from(id))
                .await
                .map_err(failure)?;
            println!("Deleted workout {id}");
        }
        Command::Stats { joined } => {
            let user_id = config.user_id()?;
            let workouts = service.get_workouts(&user_id).await.map_err(failure)?;
            print!(
                "{}",
                stats_summary(
                    &workout_stats(&workouts),
                    joined.map(|date| days_since(date, today))
                )
            );
        }
        Command::Log {
            duration,
            sets,
            unit,
        } => {
            let user_id = config.user_id()?;
            let weight_unit = match unit {
                Some(unit) => unit,
                None => config.weight_unit()?,
            };
            let exercises = service.get_exercises().await.map_err(failure)?;
            let session = build_session(&sets, &exercises, weight_unit)?;
            print!("{}", session_summary(&session, duration));

            let id = service
                .submit_workout(&session, &user_id, duration)
                .await
                .map_err(|err| match err.kind() {
                    FailureKind::Validation => failure(err),
                    FailureKind::Transport => anyhow!("failed to save workout: {err}"),
                })?;
            debug!("submitted session with {} exercises", session.exercises().len());
            println!("Saved workout {id}");
        }
    }

    Ok(())
}
