use serde::{Deserialize, Serialize};

/// A player's identity as resolved from the Hypixel player endpoint.
///
/// Resolved once at startup and immutable for the process lifetime — the
/// display name is assumed stable while the tracker runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    /// Opaque player identifier (Mojang UUID, dashed or compact form).
    pub uuid: String,
    /// Human-readable display name.
    pub display_name: String,
}

/// Death count for one SkyBlock profile the player participates in.
///
/// Produced fresh on every poll and discarded after the tick — snapshots are
/// never retained or diffed, so messages always report current totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub profile_name: String,
    pub death_count: u64,
}
