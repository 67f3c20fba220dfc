//! DevMate CLI - personalized learning roadmaps.

use std::sync::Arc;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use devmate_core::{RoadmapDraft, UserId};
use devmate_onboarding::{seed_catalog, OnboardingService, OnboardingStatusCache, PreferencesSpec};
use devmate_progress::{analytics, ProgressAggregator};
use devmate_roadmap::{BasicRoadmapManager, RoadmapError, RoadmapManager};
use devmate_storage::{JsonStorage, Storage};
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(name = "devmate")]
#[command(about = "Personalized learning roadmaps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the built-in track/topic catalog into storage
    Seed,
    /// Complete the onboarding questionnaire
    Onboard {
        /// User ID
        #[arg(long)]
        user: String,
        /// Track name
        #[arg(long)]
        track: String,
        /// Comma-separated topic names
        #[arg(long)]
        topics: String,
        /// Comma-separated confidence answers (ten scores, 0-5)
        #[arg(long)]
        confidence: String,
    },
    /// Import a generated roadmap draft (JSON file)
    Import {
        /// User ID
        #[arg(long)]
        user: String,
        /// Path to the draft document
        file: std::path::PathBuf,
    },
    /// Show the roadmap with progress and locks
    Show {
        /// User ID
        #[arg(long)]
        user: String,
    },
    /// Toggle an activity's completion
    Toggle {
        /// Activity ID
        id: String,
        /// Mark as not completed instead
        #[arg(long)]
        undo: bool,
    },
    /// Dashboard analytics
    Dashboard {
        /// User ID
        #[arg(long)]
        user: String,
    },
    /// Onboarding and roadmap status
    Status {
        /// User ID
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();

    // Open storage
    let storage_path = std::path::PathBuf::from(".devmate");
    let storage = Arc::new(Mutex::new(JsonStorage::new(&storage_path).await?));

    match cli.command {
        Commands::Seed => {
            seed_catalog(&storage).await?;
            let guard = storage.lock().await;
            let tracks = guard.list_tracks().await?;
            let topics = guard.list_topics().await?;
            println!("Catalog ready: {} tracks, {} topics", tracks.len(), topics.len());
        }
        Commands::Onboard { user, track, topics, confidence } => {
            let confidence = confidence
                .split(',')
                .map(|s| s.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| anyhow::anyhow!("Confidence answers must be integers"))?;
            let spec = PreferencesSpec {
                track,
                topics: topics.split(',').map(|s| s.trim().to_string()).collect(),
                confidence,
            };

            let service = OnboardingService::new(storage.clone());
            let preferences = service
                .complete_onboarding(&UserId::new(user), spec)
                .await?;
            println!(
                "Onboarding complete: {} topics, average confidence {:.1}",
                preferences.topic_ids.len(),
                devmate_core::average_confidence(&preferences.confidence_scores),
            );
        }
        Commands::Import { user, file } => {
            let json = std::fs::read_to_string(&file)?;
            let draft: RoadmapDraft = serde_json::from_str(&json)?;

            let manager = BasicRoadmapManager::new(storage.clone());
            let roadmap = manager.save_roadmap(&UserId::new(user), &draft).await?;
            println!(
                "Saved roadmap \"{}\" ({}, {} activities over {} days)",
                roadmap.title, roadmap.difficulty, roadmap.total_activities, roadmap.total_days,
            );
        }
        Commands::Show { user } => {
            let manager = BasicRoadmapManager::new(storage.clone());
            let view = manager.load_view(&UserId::new(user)).await?;

            println!("{} [{}] - {:.1}%", view.roadmap.title, view.roadmap.difficulty, view.roadmap.overall_progress);
            println!("{}", view.roadmap.description);
            for phase in &view.phases {
                let lock = if phase.unlocked { "" } else { " (locked)" };
                println!();
                println!(
                    "Phase {}: {} - {:.1}%{}",
                    phase.phase.phase_index + 1,
                    phase.phase.name,
                    phase.phase.progress,
                    lock,
                );
                for activity in &phase.activities {
                    let mark = if activity.completed { "x" } else { " " };
                    println!(
                        "  [{}] {} | {} | {}h | {}",
                        mark, activity.id, activity.kind, activity.estimated_hours, activity.name,
                    );
                }
            }
        }
        Commands::Toggle { id, undo } => {
            let aggregator = ProgressAggregator::new(storage.clone());
            let outcome = aggregator.toggle_by_str(&id, !undo).await?;

            let state = if outcome.activity.completed { "completed" } else { "not completed" };
            println!("Activity {} marked {}", outcome.activity.id, state);
            println!("  Phase progress:   {:.1}%", outcome.phase_progress);
            println!("  Overall progress: {:.1}%", outcome.overall_progress);
        }
        Commands::Dashboard { user } => {
            let manager = BasicRoadmapManager::new(storage.clone());
            let view = manager.load_view(&UserId::new(user)).await?;
            let stats = analytics::dashboard(&view.roadmap, &view.phase_sets(), chrono::Utc::now());

            println!("{} ({})", stats.roadmap_title, stats.track_name);
            println!("  Progress: {}% ({}/{} activities)", stats.completion_rate, stats.completed_activities, stats.total_activities);
            println!("  Streak:   {} day(s)", stats.current_streak);
            if let Some(phase) = &stats.current_phase {
                println!("  Current phase: {} ({:.1}%)", phase.name, phase.progress);
            }
            if let Some(next) = &stats.upcoming_activity {
                println!("  Up next: {} ({}, {}h) in {}", next.name, next.kind, next.estimated_hours, next.phase_name);
            }
            if !stats.recent_activities.is_empty() {
                println!("  Recently completed:");
                for recent in &stats.recent_activities {
                    println!("    {} - {} ({})", recent.completed_at.format("%Y-%m-%d"), recent.name, recent.phase_name);
                }
            }
            println!(
                "  Estimated completion: {} ({} day(s) left)",
                stats.estimated_completion.format("%Y-%m-%d"),
                stats.estimated_days_remaining,
            );
        }
        Commands::Status { user } => {
            let user_id = UserId::new(user);

            let mut cache = OnboardingStatusCache::new(storage.clone());
            let onboarded = cache.status(&user_id).await;
            println!("Onboarding: {}", if onboarded { "completed" } else { "not completed" });

            if onboarded {
                let service = OnboardingService::new(storage.clone());
                if let Some(summary) = service.preferences_summary(&user_id).await? {
                    let track = summary.track_name.as_deref().unwrap_or("unknown track");
                    println!("  Track:  {} ({} topics)", track, summary.topics_count);
                }
            }

            let manager = BasicRoadmapManager::new(storage.clone());
            match manager.load_view(&user_id).await {
                Ok(view) => {
                    let unlocked = view.phases.iter().filter(|p| p.unlocked).count();
                    println!(
                        "Roadmap: {} - {:.1}% ({}/{} phases unlocked)",
                        view.roadmap.title,
                        view.roadmap.overall_progress,
                        unlocked,
                        view.phases.len(),
                    );
                }
                Err(RoadmapError::NotFound(_)) => println!("Roadmap: none"),
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
