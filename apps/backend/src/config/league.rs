use std::env;
use std::time::Duration;

use super::ConfigError;

/// Packs every active player receives when a round starts.
pub const DEFAULT_PACKS_PER_ROUND: u32 = 10;

/// What happens to a still-open pairing when a dropped player rejoins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RejoinPolicy {
    /// Reactivate the player and leave pairings untouched.
    #[default]
    KeepPairing,
    /// Reactivate the player and forfeit any unreported pairing of the
    /// current round, as if the drop had happened after it was scheduled.
    ForfeitPendingPairing,
}

impl std::str::FromStr for RejoinPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" | "keep-pairing" => Ok(Self::KeepPairing),
            "forfeit" | "forfeit-pending-pairing" => Ok(Self::ForfeitPendingPairing),
            other => Err(other.to_string()),
        }
    }
}

/// Business-rule knobs for the league engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    pub packs_per_round: u32,
    pub rejoin_policy: RejoinPolicy,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            packs_per_round: DEFAULT_PACKS_PER_ROUND,
            rejoin_policy: RejoinPolicy::default(),
        }
    }
}

impl LeagueConfig {
    /// Reads `LEAGUE_PACKS_PER_ROUND` and `LEAGUE_REJOIN_POLICY`, both optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("LEAGUE_PACKS_PER_ROUND") {
            config.packs_per_round = raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "LEAGUE_PACKS_PER_ROUND",
                    value: raw,
                })?;
        }

        if let Ok(raw) = env::var("LEAGUE_REJOIN_POLICY") {
            config.rejoin_policy = raw.parse().map_err(|value| ConfigError::Invalid {
                name: "LEAGUE_REJOIN_POLICY",
                value,
            })?;
        }

        Ok(config)
    }
}

/// Endpoints of the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub pack_generator_url: String,
    pub card_lookup_url: String,
    pub http_timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_PACK_GENERATOR_URL: &'static str = "http://localhost:8080";
    pub const DEFAULT_CARD_LOOKUP_URL: &'static str = "https://api.scryfall.com";
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    /// Reads `PACK_GENERATOR_URL`, `CARD_LOOKUP_URL` and `LEAGUE_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let pack_generator_url = env::var("PACK_GENERATOR_URL")
            .unwrap_or_else(|_| Self::DEFAULT_PACK_GENERATOR_URL.to_string());
        let card_lookup_url = env::var("CARD_LOOKUP_URL")
            .unwrap_or_else(|_| Self::DEFAULT_CARD_LOOKUP_URL.to_string());

        let timeout_secs = match env::var("LEAGUE_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "LEAGUE_HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            Err(_) => Self::DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            pack_generator_url: pack_generator_url.trim_end_matches('/').to_string(),
            card_lookup_url: card_lookup_url.trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
