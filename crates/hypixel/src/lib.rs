//! Read-only client for the Hypixel API.
//!
//! Two endpoints are used:
//! 1. `/player` — resolves a player UUID to a display name (once, at startup)
//! 2. `/skyblock/profiles` — per-profile member stats, polled every tick
//!
//! The profiles endpoint keys each profile's `members` map by the *compact*
//! form of the player UUID (dashes removed), so lookups normalize the
//! configured identifier before indexing into the map.

use std::collections::HashMap;

use serde::Deserialize;

use deathwatch_common::error::AppError;
use deathwatch_common::types::{PlayerIdentity, ProfileSnapshot};

const DEFAULT_BASE_URL: &str = "https://api.hypixel.net";

/// HTTP client for the two read-only Hypixel endpoints.
pub struct HypixelClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HypixelClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Override the API base URL. Used by tests to point at a local server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Resolve a player UUID to a [`PlayerIdentity`] via the `/player` endpoint.
    ///
    /// Called exactly once before the notification loop starts. Any failure
    /// here (network, non-2xx, malformed JSON, missing display name) is an
    /// [`AppError::Upstream`] that the caller treats as fatal.
    pub async fn resolve_identity(&self, player_uuid: &str) -> Result<PlayerIdentity, AppError> {
        let body: PlayerResponse = self.get_json("/player", player_uuid).await?;
        check_envelope(body.success, body.cause, "/player")?;

        let display_name = body
            .player
            .and_then(|p| p.playername)
            .ok_or_else(|| AppError::Upstream("player response missing display name".to_string()))?;

        tracing::debug!(uuid = player_uuid, display_name = %display_name, "Resolved player identity");

        Ok(PlayerIdentity {
            uuid: player_uuid.to_string(),
            display_name,
        })
    }

    /// Fetch fresh per-profile death counts via the `/skyblock/profiles` endpoint.
    ///
    /// Returns one [`ProfileSnapshot`] per profile, in the order the API
    /// lists them. A profile whose `members` map has no entry for the target
    /// player defaults to 0 deaths rather than failing the whole fetch.
    pub async fn fetch_profiles(&self, player_uuid: &str) -> Result<Vec<ProfileSnapshot>, AppError> {
        let body: ProfilesResponse = self.get_json("/skyblock/profiles", player_uuid).await?;
        check_envelope(body.success, body.cause, "/skyblock/profiles")?;

        let profiles = body.profiles.unwrap_or_default();
        Ok(extract_snapshots(profiles, &compact_uuid(player_uuid)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        player_uuid: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[("key", self.api_key.as_str()), ("uuid", player_uuid)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("request to {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!("{path} returned HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed JSON from {path}: {e}")))
    }
}

/// Map the Hypixel `{"success": false, "cause": ...}` envelope to an error.
fn check_envelope(success: bool, cause: Option<String>, path: &str) -> Result<(), AppError> {
    if success {
        return Ok(());
    }
    Err(AppError::Upstream(format!(
        "{path} reported failure: {}",
        cause.unwrap_or_else(|| "no cause given".to_string())
    )))
}

/// Remove UUID separators — the profiles schema keys members by compact UUID.
fn compact_uuid(player_uuid: &str) -> String {
    player_uuid.replace('-', "")
}

/// Pure extraction step: profile wire objects → snapshots for one member.
///
/// The death counter arrives as a JSON number that may be fractional; it is
/// truncated to an integer. An absent counter — or an absent member entry
/// entirely — collapses to 0 deaths for that profile. The two cases are
/// deliberately indistinguishable downstream.
fn extract_snapshots(profiles: Vec<Profile>, member_key: &str) -> Vec<ProfileSnapshot> {
    profiles
        .into_iter()
        .map(|profile| {
            let death_count = match profile.members.get(member_key) {
                Some(member) => member.stats.deaths.unwrap_or(0.0) as u64,
                None => {
                    tracing::debug!(
                        profile = %profile.cute_name,
                        member_key,
                        "Member not present in profile, defaulting to 0 deaths"
                    );
                    0
                }
            };
            ProfileSnapshot {
                profile_name: profile.cute_name,
                death_count,
            }
        })
        .collect()
}

// ───────────────────────── wire types ─────────────────────────

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    success: bool,
    #[serde(default)]
    cause: Option<String>,
    #[serde(default)]
    player: Option<Player>,
}

#[derive(Debug, Deserialize)]
struct Player {
    #[serde(default)]
    playername: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfilesResponse {
    success: bool,
    #[serde(default)]
    cause: Option<String>,
    #[serde(default)]
    profiles: Option<Vec<Profile>>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    cute_name: String,
    #[serde(default)]
    members: HashMap<String, Member>,
}

#[derive(Debug, Default, Deserialize)]
struct Member {
    #[serde(default)]
    stats: Stats,
}

#[derive(Debug, Default, Deserialize)]
struct Stats {
    #[serde(default)]
    deaths: Option<f64>,
}
