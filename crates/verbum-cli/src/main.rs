//! Verbum CLI
//!
//! Command-line harness for the vocabulary review scheduler. Works on a JSON
//! snapshot of items, the same shape the application store hands the core.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use directories::ProjectDirs;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use verbum_core::{
    AnswerRecord, Familiarity, InMemoryStore, ItemStore, MAX_FORECAST_DAYS, Quality,
    ReviewForecastDay, SchedulerConfig, SessionMode, Stage, VocabularyItem, VocabularyStats,
    build_review_queue, generate_forecast, mark_ignored, mark_known, reactivate, review_item,
};

/// Verbum - vocabulary review scheduler CLI
#[derive(Parser)]
#[command(name = "verbum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and drive vocabulary review schedules")]
#[command(long_about = "Verbum schedules vocabulary reviews with an SM-2 derived algorithm.\n\nIt builds prioritized review queues, forecasts upcoming workload, and applies answers to a JSON item snapshot.")]
struct Cli {
    /// Item snapshot (JSON array); defaults to the platform data directory
    #[arg(long, global = true)]
    items: Option<PathBuf>,

    /// Scheduler configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the review queue
    Queue {
        /// Quick session (weights overdueness over difficulty)
        #[arg(long)]
        quick: bool,
        /// Practice mode: include not-yet-due and known items
        #[arg(long)]
        practice: bool,
        /// Offer words that have only been seen
        #[arg(long)]
        include_new: bool,
        /// Only items met in this container
        #[arg(long)]
        container: Option<String>,
        /// Maximum queue length
        #[arg(long)]
        max: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Forecast due reviews for the coming days
    Forecast {
        /// Window length in days
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_FORECAST_DAYS as i64))]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },

    /// Record an answer for one item
    Review {
        item_id: String,
        /// Quality 0-5 (0-2 = forgot, 3 = hard, 4 = good, 5 = perfect)
        #[arg(allow_negative_numbers = true)]
        quality: i64,
    },

    /// Override an item's familiarity
    Mark {
        item_id: String,
        #[arg(value_enum)]
        state: MarkState,
    },

    /// Show vocabulary statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MarkState {
    /// "I know this"
    Known,
    /// Remove from scheduling
    Ignored,
    /// Bring an ignored item back
    Active,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let items_path = match cli.items {
        Some(path) => path,
        None => default_items_path()?,
    };
    let config = load_config(cli.config.as_deref())?;
    let store = open_store(&items_path)?;

    match cli.command {
        Commands::Queue {
            quick,
            practice,
            include_new,
            container,
            max,
            json,
        } => {
            let mut options = config.queue.clone();
            if quick {
                options.mode = SessionMode::Quick;
            }
            options.practice_mode |= practice;
            options.include_new_words |= include_new;
            if container.is_some() {
                options.container_filter = container;
            }
            if let Some(max) = max {
                options.max_items = max;
            }
            let queue = build_review_queue(&store.snapshot()?, &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&queue)?);
            } else {
                print_queue(&queue);
            }
        }
        Commands::Forecast { days, json } => {
            let days = days.unwrap_or(config.forecast_days);
            let forecast = generate_forecast(&store.snapshot()?, days);
            if json {
                println!("{}", serde_json::to_string_pretty(&forecast)?);
            } else {
                print_forecast(&forecast);
            }
        }
        Commands::Review { item_id, quality } => {
            let quality = Quality::new(quality)?;
            let record = review_item(&store, &item_id, quality, &config)?;
            store.save_json(&items_path)?;
            print_answer(&record);
        }
        Commands::Mark { item_id, state } => {
            let item = match state {
                MarkState::Known => mark_known(&store, &item_id)?,
                MarkState::Ignored => mark_ignored(&store, &item_id)?,
                MarkState::Active => reactivate(&store, &item_id)?,
            };
            store.save_json(&items_path)?;
            println!(
                "{} {} is now {}",
                "✓".green(),
                item.surface_form.bold(),
                item.familiarity.to_string().cyan()
            );
        }
        Commands::Stats { json } => {
            let stats = VocabularyStats::collect(&store.snapshot()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
        }
    }

    Ok(())
}

fn default_items_path() -> anyhow::Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "verbum", "verbum")
        .context("Could not determine project directories")?;
    Ok(dirs.data_dir().join("items.json"))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SchedulerConfig> {
    let config = match path {
        Some(path) => SchedulerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

/// A missing snapshot is an empty vocabulary, not an error
fn open_store(path: &Path) -> anyhow::Result<InMemoryStore> {
    if !path.exists() {
        debug!(path = %path.display(), "No snapshot yet, starting empty");
        return Ok(InMemoryStore::new());
    }
    InMemoryStore::load_json(path)
        .with_context(|| format!("Failed to load items from {}", path.display()))
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_queue(queue: &[VocabularyItem]) {
    println!("{}", "=== Review Queue ===".cyan().bold());
    if queue.is_empty() {
        println!("{}", "Nothing due. Come back later.".dimmed());
        return;
    }
    for (i, item) in queue.iter().enumerate() {
        let due = item
            .next_review_date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never scheduled".to_string());
        println!(
            "{:>3}. {:20} {:12} {:>9} difficulty {:.2}  due {}",
            i + 1,
            item.surface_form.bold(),
            item.item_id.dimmed(),
            stage_label(verbum_core::classify_stage(item)),
            item.difficulty_score,
            due
        );
    }
}

fn print_forecast(forecast: &[ReviewForecastDay]) {
    println!("{}", "=== Review Forecast ===".cyan().bold());
    let peak = forecast.iter().map(|d| d.due_count).max().unwrap_or(0);
    for day in forecast {
        let width = if peak > 0 {
            (day.due_count as f64 / peak as f64 * 30.0).round() as usize
        } else {
            0
        };
        let breakdown: Vec<String> = day
            .per_stage_breakdown
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(stage, count)| format!("{stage} {count}"))
            .collect();
        println!(
            "  {} [{:30}] {:>4}  {}",
            day.date.format("%a %Y-%m-%d"),
            "#".repeat(width).green(),
            day.due_count,
            breakdown.join(", ").dimmed()
        );
    }
}

fn print_answer(record: &AnswerRecord) {
    let verdict = if record.quality.is_success() {
        "correct".green()
    } else {
        "missed".red()
    };
    println!(
        "{} ({}) quality {} - {}",
        record.item.surface_form.bold(),
        record.item_id.dimmed(),
        record.quality,
        verdict
    );
    println!(
        "  interval {} day(s), ease {:.2}, streak {}, next review {}",
        record.outcome.new_interval_days,
        record.outcome.new_ease_factor,
        record.outcome.new_consecutive_correct,
        record.outcome.next_review_date.format("%Y-%m-%d")
    );
    println!(
        "  stage {} -> {}",
        stage_label(record.stage_before),
        stage_label(record.stage_after)
    );
    if record.promoted {
        println!("  {}", "Promoted to known!".yellow().bold());
    }
}

fn print_stats(stats: &VocabularyStats) {
    println!("{}", "=== Verbum Vocabulary Statistics ===".cyan().bold());
    println!();
    println!("{}: {}", "Total Items".white().bold(), stats.total_items);
    println!("{}: {}", "Due Now".white().bold(), stats.due_now);
    println!("{}: {}", "Total Reviews".white().bold(), stats.total_reviews);
    println!("{}: {:.2}", "Average Ease".white().bold(), stats.average_ease_factor);
    println!("{}: {:.2}", "Average Difficulty".white().bold(), stats.average_difficulty);
    println!("{}: {}", "Ready to Promote".white().bold(), stats.promotable);
    println!("{}: {:.1}%", "Known".white().bold(), stats.known_ratio() * 100.0);

    println!();
    println!("{}", "=== Stage Distribution ===".yellow().bold());
    for (stage, count) in &stats.by_stage {
        print_distribution_bar(stage.as_str(), *count, stats.total_items, *stage);
    }

    println!();
    println!("{}", "=== Familiarity ===".magenta().bold());
    for familiarity in Familiarity::ALL {
        let count = stats.by_familiarity.get(&familiarity).copied().unwrap_or(0);
        println!("  {:10} {:>5}", familiarity.as_str(), count);
    }
}

fn stage_label(stage: Stage) -> colored::ColoredString {
    match stage {
        Stage::New => stage.as_str().blue(),
        Stage::Learning => stage.as_str().red(),
        Stage::Young => stage.as_str().yellow(),
        Stage::Mature => stage.as_str().green(),
        Stage::Suspended => stage.as_str().dimmed(),
    }
}

fn print_distribution_bar(label: &str, count: usize, total: usize, stage: Stage) {
    let percentage = if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    let bar_width: usize = 30;
    let filled = ((percentage / 100.0) * bar_width as f64) as usize;
    let empty = bar_width.saturating_sub(filled);

    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(empty));
    let colored_bar = match stage {
        Stage::Mature => bar.green(),
        Stage::Young => bar.yellow(),
        Stage::Learning => bar.red(),
        Stage::New => bar.blue(),
        Stage::Suspended => bar.dimmed(),
    };

    println!(
        "  {:10} [{:30}] {:>5} ({:>5.1}%)",
        label, colored_bar, count, percentage
    );
}
