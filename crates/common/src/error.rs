use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid runtime configuration. Always fatal before any network activity.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network failure, non-2xx response, or malformed JSON from the Hypixel API.
    #[error("Upstream API error: {0}")]
    Upstream(String),

    /// Webhook delivery failure, after any internal rate-limit retry.
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}
