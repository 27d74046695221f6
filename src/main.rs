//! fitrecap - Personal workout log with weekly levels and yearly recaps

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Datelike, Local, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use fitrecap::analytics::{Analytics, VolumeFormula, yearly_rings};
use fitrecap::db::{Database, WorkoutLog, new_log_id, parse_logs};
use fitrecap::exercises::{classify, find_exercise};
use fitrecap::tui::App;

#[derive(Parser)]
#[command(name = "fitrecap")]
#[command(author, version, about = "Workout log with weekly levels and yearly recaps")]
struct Cli {
    /// SQLite database path
    #[arg(long, env = "FITRECAP_DB", default_value = "fitrecap.db", global = true)]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Log a workout
    Log {
        /// Exercise name or preset id (e.g. "深蹲", "running", "yoga")
        exercise: String,

        #[arg(short, long)]
        sets: Option<f64>,

        #[arg(short, long)]
        reps: Option<f64>,

        /// Weight in kg
        #[arg(short, long)]
        weight: Option<f64>,

        /// Distance in km
        #[arg(long)]
        distance: Option<f64>,

        /// Duration in minutes
        #[arg(short, long)]
        duration: Option<f64>,

        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,

        #[arg(short, long)]
        note: Option<String>,
    },

    /// List workout history
    List {
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Delete a workout by id
    Delete { id: String },

    /// Import workouts from a JSON file
    Import { file: PathBuf },

    /// Show level, badges and weekly summaries
    Progress,

    /// Show the yearly recap
    Recap {
        /// Defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,

        /// Print the recap as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the yearly recap to a JSON report
    Export {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let db = Database::open(&cli.db)?;

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(db)?;
            app.run()?;
        }

        Some(Commands::Log { exercise, sets, reps, weight, distance, duration, date, note }) => {
            // Preset ids map to their display names
            let exercise = find_exercise(&exercise)
                .map(|e| e.name.to_string())
                .unwrap_or(exercise);
            let log = WorkoutLog {
                id: new_log_id(),
                date: date.unwrap_or_else(Utc::now),
                exercise,
                sets,
                reps,
                weight,
                distance,
                duration,
                note,
            };
            db.add_log(&log)?;
            println!(
                "Logged: {} - volume {:.0} (id: {})",
                log.exercise,
                log.volume(VolumeFormula::Standard),
                log.id
            );
        }

        Some(Commands::List { limit }) => {
            let logs = db.get_logs()?;
            println!("Recent workouts:");
            println!("{:-<72}", "");
            for log in logs.iter().rev().take(limit) {
                println!(
                    "{} | {} {:12} | {:>8.0} | {} | {}",
                    log.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    classify(&log.exercise).emoji(),
                    log.exercise,
                    log.volume(VolumeFormula::Standard),
                    log.note.as_deref().unwrap_or("-"),
                    log.id
                );
            }
        }

        Some(Commands::Delete { id }) => {
            if !db.delete_log(&id)? {
                bail!("no workout with id {}", id);
            }
            println!("Deleted {}", id);
        }

        Some(Commands::Import { file }) => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let logs = parse_logs(&json)
                .with_context(|| format!("failed to import {}", file.display()))?;
            let count = db.upsert_logs(&logs)?;
            println!("Imported {} workouts", count);
        }

        Some(Commands::Progress) => {
            let analytics = Analytics::new(db.get_logs()?);
            let info = analytics.level(Utc::now());

            println!("Level {} - day {}/{}", info.level, info.current_day, info.days_in_cycle);
            if !info.badges.is_empty() {
                println!("Badges: {}", info.badges.join(", "));
            }
            println!("{:-<60}", "");
            for s in &info.summaries {
                println!(
                    "W{:<3} {}-{} | {:>3} sessions | {:>8.0} | {}",
                    s.week_index + 1,
                    s.start_date,
                    s.end_date,
                    s.total_sessions,
                    s.total_volume,
                    s.most_frequent_exercise.as_deref().unwrap_or("-")
                );
            }
        }

        Some(Commands::Recap { year, json }) => {
            let year = year.unwrap_or_else(|| Local::now().year());
            let analytics = Analytics::new(db.get_logs()?);
            let recap = analytics.yearly_recap(year);

            if json {
                println!("{}", serde_json::to_string_pretty(&recap)?);
                return Ok(());
            }

            println!("Recap {}", recap.year);
            println!("{:-<40}", "");
            println!("Workouts:     {}", recap.total_workouts);
            println!("Volume:       {:.0}", recap.total_volume);
            println!("Distance:     {:.1} km", recap.total_distance);
            println!("Minutes:      {:.0}", recap.total_minutes);
            println!("Active days:  {}", recap.active_days);
            println!("Streak:       {} days", recap.longest_streak);
            println!("Best:         {}", recap.best_exercise.as_deref().unwrap_or("-"));

            for ring in yearly_rings(&recap) {
                println!(
                    "{:8} {:>5.0}% ({:.0} / {:.0})",
                    ring.kind.label(),
                    ring.progress * 100.0,
                    ring.value,
                    ring.goal
                );
            }
            for achievement in analytics.achievements(&recap) {
                println!("{} {}", achievement.emoji(), achievement.label());
            }
        }

        Some(Commands::Export { year, output }) => {
            let year = year.unwrap_or_else(|| Local::now().year());
            let recap = Analytics::new(db.get_logs()?).yearly_recap(year);
            if recap.is_empty() {
                bail!("no workout data for {}", year);
            }

            let path = output.unwrap_or_else(|| PathBuf::from(format!("recap-{}.json", year)));
            fs::write(&path, serde_json::to_string_pretty(&recap)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Exported recap for {} ({} workouts)", year, recap.total_workouts);
            println!("Report written to {}", path.display());
        }
    }

    Ok(())
}
