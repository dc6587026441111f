// Read-only client for the Sleeper public API.
//
// `LeagueSource` is the seam the page controllers depend on; `SleeperClient`
// is the reqwest-backed implementation. Every operation is best-effort: a
// network error, non-2xx status, or undecodable body is logged and collapses
// into the empty value for that call, so one failed fetch never takes its
// siblings down with it.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::model::{Draft, DraftPick, MatchupRow, NflState, PlayerCatalog, Roster, User};

/// Drafts with more rounds than this are labeled as the league's startup draft.
pub const STARTUP_DRAFT_MIN_ROUNDS: u32 = 10;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// LeagueSource
// ---------------------------------------------------------------------------

/// Read-only access to league data. Implementations never fail: a failed
/// call yields an empty collection (or `None`).
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn fetch_drafts(&self, league_id: &str) -> Vec<Draft>;
    async fn fetch_users(&self, league_id: &str) -> Vec<User>;
    async fn fetch_rosters(&self, league_id: &str) -> Vec<Roster>;
    async fn fetch_all_players(&self) -> PlayerCatalog;
    async fn fetch_draft_picks(&self, draft_id: &str) -> Vec<DraftPick>;
    async fn fetch_matchup_rows(&self, league_id: &str, week: u32) -> Vec<MatchupRow>;
    async fn fetch_current_week(&self) -> Option<u32>;
}

/// Selector label for a draft: `"Startup Draft"` for drafts with more than
/// ten rounds, otherwise `"{season} Draft"`.
pub fn draft_display_name(draft: &Draft) -> String {
    if draft.round_count() > STARTUP_DRAFT_MIN_ROUNDS {
        "Startup Draft".to_string()
    } else {
        format!("{} Draft", draft.season)
    }
}

// ---------------------------------------------------------------------------
// SleeperClient
// ---------------------------------------------------------------------------

pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    /// Client with reqwest defaults against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: normalize_base(base_url.into()),
        }
    }

    /// Build a client honoring the configured timeout and user agent.
    pub fn from_config(api: &ApiConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .user_agent(api.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base(api.base_url.clone()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}{path}` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }

    /// `get_json`, collapsing any failure into `T::default()`.
    async fn get_or_default<T: DeserializeOwned + Default>(&self, what: &str, path: &str) -> T {
        match self.get_json(path).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Error fetching {}: {}", what, e);
                T::default()
            }
        }
    }
}

#[async_trait]
impl LeagueSource for SleeperClient {
    async fn fetch_drafts(&self, league_id: &str) -> Vec<Draft> {
        let mut drafts: Vec<Draft> = self
            .get_or_default("drafts", &format!("/league/{league_id}/drafts"))
            .await;
        for draft in &mut drafts {
            draft.name = draft_display_name(draft);
        }
        drafts
    }

    async fn fetch_users(&self, league_id: &str) -> Vec<User> {
        self.get_or_default("users", &format!("/league/{league_id}/users"))
            .await
    }

    async fn fetch_rosters(&self, league_id: &str) -> Vec<Roster> {
        self.get_or_default("rosters", &format!("/league/{league_id}/rosters"))
            .await
    }

    async fn fetch_all_players(&self) -> PlayerCatalog {
        self.get_or_default("players", "/players/nfl").await
    }

    async fn fetch_draft_picks(&self, draft_id: &str) -> Vec<DraftPick> {
        self.get_or_default("draft picks", &format!("/draft/{draft_id}/picks"))
            .await
    }

    async fn fetch_matchup_rows(&self, league_id: &str, week: u32) -> Vec<MatchupRow> {
        self.get_or_default(
            "matchups",
            &format!("/league/{league_id}/matchups/{week}"),
        )
        .await
    }

    async fn fetch_current_week(&self) -> Option<u32> {
        match self.get_json::<NflState>("/state/nfl").await {
            Ok(state) => Some(state.week),
            Err(e) => {
                warn!("Error fetching current week: {}", e);
                None
            }
        }
    }
}

fn normalize_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
