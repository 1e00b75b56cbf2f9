/// Cadence - headless player driven from the terminal
use cadence_core::{KeyValueStore, Library, SoundEngine};
use cadence_playback::{
    Collaborators, ConfigStore, PlaybackController, PlaybackEvent, QueueManager,
    RecentHistoryStore,
};
use cadence_storage::{LocalLibrary, SettingsStore};
use clap::{Parser, Subcommand};
use engine::SimulatedSoundEngine;
use settings::CliConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod demo;
mod engine;
mod repl;
mod settings;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence playback core with a simulated sound engine", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player
    Run,
    /// Insert a small demo library into the database
    SeedDemo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let pool = cadence_storage::create_pool(&config.storage.database_url).await?;
    cadence_storage::run_migrations(&pool).await?;
    tracing::info!(database_url = %config.storage.database_url, "database ready");

    match cli.command {
        Commands::Run => run(&config, pool).await?,
        Commands::SeedDemo => {
            if demo::seed(&pool).await? {
                println!("demo library created");
            } else {
                println!("demo library already present");
            }
        }
    }

    Ok(())
}

async fn run(config: &CliConfig, pool: sqlx::SqlitePool) -> anyhow::Result<()> {
    let library: Arc<dyn Library> = Arc::new(LocalLibrary::new(pool.clone()));
    let store: Arc<dyn KeyValueStore> = Arc::new(SettingsStore::new(pool));
    let engine: Arc<dyn SoundEngine> = Arc::new(SimulatedSoundEngine::new(
        config.playback.simulated_track_ms,
        Duration::from_millis(config.playback.tick_ms),
    ));
    let history = Arc::new(RecentHistoryStore::load(Arc::clone(&store)).await);

    let controller = PlaybackController::spawn(Collaborators {
        library: Arc::clone(&library),
        store: Arc::clone(&store),
        engine,
        history: Arc::clone(&history),
    })
    .await;

    let mut events = controller.events();
    let event_log = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(PlaybackEvent::TrackChanged {
                    track_id,
                    track_idx,
                }) => tracing::info!(track_id = %track_id, track_idx, "now playing"),
                Ok(PlaybackEvent::Error { message }) => tracing::warn!(%message, "playback error"),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => tracing::debug!(skipped, "event log lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let session = repl::Session {
        controller: controller.clone(),
        library,
        config: ConfigStore::new(store),
        queue: QueueManager::new(),
        history,
    };
    let result = session.run().await;

    controller.shutdown().await?;
    event_log.abort();
    tracing::info!("player stopped");

    result
}
