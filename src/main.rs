use std::error::Error;
use std::fs::File;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use liftlog::api::{AiCall, HttpBackend, WorkoutBackend};
use liftlog::core::config::{self, ResolvedConfig};
use liftlog::core::stats::{TREND_DAYS, daily_volume, one_rm_trend};
use liftlog::tui;

#[derive(Parser)]
#[command(name = "liftlog", about = "Terminal workout logger with rest timer and sync")]
struct Args {
    /// API base URL (overrides config and LIFTLOG_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// User id to log as (overrides config and LIFTLOG_USER)
    #[arg(short, long)]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the remote history
    History,
    /// Print volume and estimated 1RM trends
    Stats,
    /// Call an AI endpoint and print the response
    Ai {
        #[arg(value_enum)]
        kind: AiKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AiKind {
    Recommend,
    Analyze,
    Info,
    GenerateMenus,
}

impl From<AiKind> for AiCall {
    fn from(kind: AiKind) -> Self {
        match kind {
            AiKind::Recommend => AiCall::Recommend,
            AiKind::Analyze => AiCall::AnalyzeGrowth,
            AiKind::Info => AiCall::Info,
            AiKind::GenerateMenus => AiCall::GenerateMenus,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the TUI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("liftlog.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Config error, using defaults: {}", e);
        Default::default()
    });
    let resolved = config::resolve(&file_config, args.api_base.as_deref(), args.user.as_deref());
    info!(
        "Liftlog starting up (user: {}, api: {})",
        resolved.user_id, resolved.api_base_url
    );

    match args.command {
        None => tui::run(resolved)?,
        Some(command) => run_headless(command, &resolved).await?,
    }
    Ok(())
}

async fn run_headless(command: Command, config: &ResolvedConfig) -> Result<(), Box<dyn Error>> {
    let backend: Arc<dyn WorkoutBackend> = Arc::new(HttpBackend::new(
        &config.api_base_url,
        config.api_token.clone(),
    ));
    match command {
        Command::History => {
            let history = backend.fetch_history(&config.user_id).await?;
            for set in &history {
                println!(
                    "{}  {:<24} {:>6.1} kg x {:<3} {}",
                    set.timestamp,
                    set.exercise_id,
                    set.weight,
                    set.reps,
                    set.rpe.label()
                );
            }
            println!("{} sets", history.len());
        }
        Command::Stats => {
            let history = backend.fetch_history(&config.user_id).await?;
            println!("Volume (last {TREND_DAYS} training days)");
            for point in daily_volume(&history, TREND_DAYS) {
                println!("  {}  {:>8.0} kg", point.date, point.value);
            }
            println!("Best estimated 1RM (Epley)");
            for point in one_rm_trend(&history, TREND_DAYS) {
                println!("  {}  {:>8.1} kg", point.date, point.value);
            }
        }
        Command::Ai { kind } => {
            let text = backend.ai(kind.into(), &config.user_id).await?;
            println!("{text}");
        }
    }
    Ok(())
}
