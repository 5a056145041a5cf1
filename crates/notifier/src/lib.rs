//! Discord webhook delivery.
//!
//! The sink is stateless across ticks: it holds a fixed endpoint and display
//! username, and `send` is a single idempotent operation. Rate limiting is
//! resolved internally with one retry, so callers only ever see
//! success or [`AppError::Dispatch`].

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use deathwatch_common::error::AppError;

/// Fallback wait when a 429 response carries no usable retry hint.
const DEFAULT_RETRY_AFTER_SECS: f64 = 2.0;

/// Webhook sink bound to one Discord webhook URL and display username.
pub struct DiscordWebhook {
    http: reqwest::Client,
    url: String,
    username: String,
    rate_limit_retry: bool,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
    username: &'a str,
}

#[derive(Deserialize)]
struct RateLimitBody {
    #[serde(default)]
    retry_after: Option<f64>,
}

impl DiscordWebhook {
    pub fn new(url: String, username: String, rate_limit_retry: bool) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            username,
            rate_limit_retry,
        }
    }

    /// Deliver `content` to the webhook.
    ///
    /// On HTTP 429 with retry enabled, waits for the server-provided
    /// `retry_after` and retries exactly once. Any other non-2xx response,
    /// a network failure, or a still-limited retry is [`AppError::Dispatch`].
    pub async fn send(&self, content: &str) -> Result<(), AppError> {
        let response = self.post(content).await?;
        let status = response.status();

        if status.is_success() {
            tracing::debug!(status = %status, "Webhook delivered");
            return Ok(());
        }

        if status == StatusCode::TOO_MANY_REQUESTS && self.rate_limit_retry {
            let wait_secs = retry_after_secs(response).await;
            tracing::warn!(wait_secs, "Webhook rate limited, retrying once");
            tokio::time::sleep(Duration::from_secs_f64(wait_secs)).await;

            let retry = self.post(content).await?;
            if retry.status().is_success() {
                return Ok(());
            }
            return Err(AppError::Dispatch(format!(
                "webhook returned HTTP {} after rate-limit retry",
                retry.status()
            )));
        }

        Err(AppError::Dispatch(format!("webhook returned HTTP {status}")))
    }

    async fn post(&self, content: &str) -> Result<reqwest::Response, AppError> {
        self.http
            .post(&self.url)
            .json(&WebhookPayload {
                content,
                username: &self.username,
            })
            .send()
            .await
            .map_err(|e| AppError::Dispatch(format!("webhook request failed: {e}")))
    }
}

/// Seconds to wait before retrying a rate-limited request.
///
/// Prefers the `retry_after` field of the JSON body, then the `Retry-After`
/// header, then a fixed fallback.
async fn retry_after_secs(response: reqwest::Response) -> f64 {
    let from_header = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok());

    let from_body = response
        .json::<RateLimitBody>()
        .await
        .ok()
        .and_then(|body| body.retry_after);

    let secs = from_body.or(from_header).unwrap_or(DEFAULT_RETRY_AFTER_SECS);
    if secs.is_finite() && secs >= 0.0 {
        secs
    } else {
        DEFAULT_RETRY_AFTER_SECS
    }
}
