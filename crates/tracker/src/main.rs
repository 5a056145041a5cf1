use clap::Parser;

use deathwatch_common::config::TrackerConfig;
use deathwatch_tracker::tracker::DeathTracker;

#[derive(Parser, Debug)]
#[command(
    name = "deathwatch",
    about = "Track a Hypixel SkyBlock player's deaths and post them to a Discord webhook",
    version
)]
struct Cli {
    /// Discord webhook URL
    webhook_url: String,

    /// Hypixel API key
    api_key: String,

    /// Player UUID
    player_uuid: String,

    /// The amount of seconds between messages
    #[arg(short, long, default_value_t = 3600.0)]
    frequency: f64,

    /// The minimum amount of deaths for a profile to be mentioned
    #[arg(short, long, default_value_t = 1)]
    min_deaths: u64,

    /// Tags to tag in messages (repeatable)
    #[arg(short, long)]
    tags: Vec<String>,

    /// Use debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log and continue when a tick fails instead of exiting
    #[arg(long)]
    recover: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.debug {
        "deathwatch_tracker=debug,deathwatch_hypixel=debug,deathwatch_notifier=debug"
    } else {
        "deathwatch_tracker=info,deathwatch_hypixel=info,deathwatch_notifier=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config = TrackerConfig {
        webhook_url: cli.webhook_url,
        api_key: cli.api_key,
        player_uuid: cli.player_uuid,
        frequency_secs: cli.frequency,
        min_deaths: cli.min_deaths,
        tags: cli.tags,
        recover: cli.recover,
    };
    config.validate()?;

    tracing::info!(
        player_uuid = %config.player_uuid,
        frequency_secs = config.frequency_secs,
        min_deaths = config.min_deaths,
        tags = config.tags.len(),
        recover = config.recover,
        "Deathwatch starting..."
    );

    let tracker = DeathTracker::initialize(config).await?;

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = tracker.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Tracker exited with error");
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("Deathwatch stopped.");
    Ok(())
}
