//! The notification cycle: poll, compose, dispatch, sleep, repeat.
//!
//! Ticks are anchored to a fixed start instant. The sleep after each tick is
//! `period - (elapsed % period)`, so ticks land on a period-aligned cadence
//! no matter how long the fetch and dispatch took. A tick that overruns a
//! full period wakes at the next aligned boundary; missed boundaries are
//! never doubled up.

use std::time::{Duration, Instant};

use deathwatch_common::config::TrackerConfig;
use deathwatch_common::error::AppError;
use deathwatch_common::types::PlayerIdentity;
use deathwatch_hypixel::HypixelClient;
use deathwatch_notifier::DiscordWebhook;

use crate::compose::compose_message;

/// Long-running tracker for one player and one webhook.
pub struct DeathTracker {
    client: HypixelClient,
    webhook: DiscordWebhook,
    identity: PlayerIdentity,
    config: TrackerConfig,
}

impl DeathTracker {
    /// Resolve the player identity and bind the webhook sink.
    ///
    /// Identity resolution happens exactly once. A failure here is fatal and
    /// not retried — a broken UUID or API key is not a transient condition.
    pub async fn initialize(config: TrackerConfig) -> Result<Self, AppError> {
        let client = HypixelClient::new(config.api_key.clone());
        let identity = client.resolve_identity(&config.player_uuid).await?;

        tracing::info!(
            display_name = %identity.display_name,
            uuid = %identity.uuid,
            "Resolved player identity"
        );

        let webhook = DiscordWebhook::new(
            config.webhook_url.clone(),
            format!("{} death tracker", identity.display_name),
            true,
        );

        Ok(Self {
            client,
            webhook,
            identity,
            config,
        })
    }

    /// Run the notification loop indefinitely.
    ///
    /// Every tick dispatches a message, including quiet ticks with zero
    /// qualifying deaths. By default a tick error propagates and ends the
    /// process; with `recover` set, it is logged and the cadence continues.
    pub async fn run(&self) -> Result<(), AppError> {
        let period = Duration::from_secs_f64(self.config.frequency_secs);
        let start = Instant::now();

        tracing::info!(
            period_secs = self.config.frequency_secs,
            min_deaths = self.config.min_deaths,
            "Notification loop started"
        );

        loop {
            match self.tick().await {
                Ok(()) => {}
                Err(e) if self.config.recover => {
                    tracing::error!(error = %e, "Tick failed, continuing");
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(time_until_next_tick(start.elapsed(), period)).await;
        }
    }

    /// One tick: fetch fresh snapshots, compose, dispatch unconditionally.
    async fn tick(&self) -> Result<(), AppError> {
        let snapshots = self.client.fetch_profiles(&self.identity.uuid).await?;

        let message = compose_message(
            &self.identity.display_name,
            &snapshots,
            self.config.min_deaths,
            &self.config.tags,
        );

        self.webhook.send(&message).await?;

        tracing::info!(profiles = snapshots.len(), "Notification dispatched");
        Ok(())
    }
}

/// Time to sleep so the next tick lands on the next period-aligned boundary.
///
/// Always in `(0, period]`: an elapsed time that is an exact multiple of the
/// period sleeps a full period rather than firing again immediately.
pub fn time_until_next_tick(elapsed: Duration, period: Duration) -> Duration {
    let period_secs = period.as_secs_f64();
    let into_period = elapsed.as_secs_f64() % period_secs;
    Duration::from_secs_f64(period_secs - into_period)
}
