use crate::error::AppError;

/// Runtime configuration, built from command-line arguments at startup and
/// immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Discord webhook URL to deliver notifications to.
    pub webhook_url: String,

    /// Pre-obtained Hypixel API key, passed through as-is.
    pub api_key: String,

    /// Target player identifier (Mojang UUID).
    pub player_uuid: String,

    /// Seconds between notifications (default: 3600)
    pub frequency_secs: f64,

    /// Minimum death count for a profile to appear in the message (default: 1)
    pub min_deaths: u64,

    /// Mention tags appended on a trailing line of every message.
    pub tags: Vec<String>,

    /// Log and continue on tick errors instead of terminating.
    pub recover: bool,
}

impl TrackerConfig {
    /// Validate invariants that clap's type parsing cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.frequency_secs.is_finite() || self.frequency_secs <= 0.0 {
            return Err(AppError::Config(format!(
                "frequency must be a positive number of seconds, got {}",
                self.frequency_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(frequency_secs: f64) -> TrackerConfig {
        TrackerConfig {
            webhook_url: "https://discord.com/api/webhooks/1/token".to_string(),
            api_key: "key".to_string(),
            player_uuid: "uuid".to_string(),
            frequency_secs,
            min_deaths: 1,
            tags: Vec::new(),
            recover: false,
        }
    }

    #[test]
    fn accepts_positive_frequency() {
        assert!(config(3600.0).validate().is_ok());
        assert!(config(0.5).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_frequency() {
        assert!(matches!(config(0.0).validate(), Err(AppError::Config(_))));
        assert!(matches!(config(-5.0).validate(), Err(AppError::Config(_))));
        assert!(matches!(
            config(f64::INFINITY).validate(),
            Err(AppError::Config(_))
        ));
    }
}
