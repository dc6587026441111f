// Raw Sleeper API payloads.
//
// These mirror the JSON the API returns, field for field. Sleeper sends
// `null` for many fields it considers unset (a roster's `players`, a user's
// `metadata`, a player's `fantasy_positions`), so most fields are optional or
// collapse `null` into their default via `null_as_default`.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Global player catalog from `/players/nfl`, keyed by player id.
pub type PlayerCatalog = HashMap<String, Player>;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// League members
// ---------------------------------------------------------------------------

/// A league member from `/league/{id}/users`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar id on the Sleeper CDN (not a URL).
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: UserMetadata,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// A team's roster and season record from `/league/{id}/rosters`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: RosterSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RosterSettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub wins: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ties: u32,
    /// Whole points scored this season.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fpts: f64,
    /// Hundredths of a point, reported separately by the API.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fpts_decimal: f64,
    #[serde(default)]
    pub division: Option<u32>,
}

impl RosterSettings {
    /// Season points for, combining the whole and fractional parts.
    pub fn points_for(&self) -> f64 {
        self.fpts + self.fpts_decimal / 100.0
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// One entry in the player catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// NFL team abbreviation; `None` for free agents.
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fantasy_positions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// A league draft from `/league/{id}/drafts`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Draft {
    pub draft_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: String,
    #[serde(default)]
    pub rounds: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: DraftSettings,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub draft_type: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub start_time: Option<i64>,
    /// Selector label, filled in by the client after decoding.
    #[serde(default, skip_deserializing)]
    pub name: String,
}

impl Draft {
    /// Number of rounds, preferring the top-level field over `settings.rounds`.
    pub fn round_count(&self) -> u32 {
        self.rounds.or(self.settings.rounds).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DraftSettings {
    #[serde(default)]
    pub rounds: Option<u32>,
    #[serde(default)]
    pub teams: Option<u32>,
}

/// One selection from `/draft/{id}/picks`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DraftPick {
    pub round: u32,
    pub draft_slot: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_id: String,
    /// User id of the drafter; empty for auto-picks on some drafts.
    #[serde(default, deserialize_with = "null_as_default")]
    pub picked_by: String,
    #[serde(default)]
    pub pick_no: Option<u32>,
}

// ---------------------------------------------------------------------------
// Matchups and season state
// ---------------------------------------------------------------------------

/// One roster's side of a weekly matchup from `/league/{id}/matchups/{week}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchupRow {
    pub roster_id: u32,
    /// `None` for rosters without an opponent that week.
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starters: Vec<String>,
}

/// Current NFL season state from `/state/nfl`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NflState {
    pub week: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: String,
    #[serde(default)]
    pub season_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
