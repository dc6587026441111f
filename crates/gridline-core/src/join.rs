// Entity joins: resolve the foreign keys in raw API payloads.
//
// Rosters reference users by `owner_id`, picks reference users by
// `picked_by`, and everything references players by id. Each lookup is backed
// by a hash index built once per join pass. A dangling reference is never an
// error: it resolves to a fixed placeholder label.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{DraftPick, MatchupRow, PlayerCatalog, Roster, User};

pub const UNKNOWN_TEAM: &str = "Unknown Team";
pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNKNOWN_PLAYER: &str = "Unknown Player";
pub const NOT_AVAILABLE: &str = "N/A";

/// An optional label that is present and non-empty.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Indices
// ---------------------------------------------------------------------------

/// Users keyed by `user_id`. The first user with a given id wins.
pub struct UserIndex<'a> {
    by_id: HashMap<&'a str, &'a User>,
}

impl<'a> UserIndex<'a> {
    pub fn new(users: &'a [User]) -> Self {
        let mut by_id = HashMap::with_capacity(users.len());
        for user in users {
            by_id.entry(user.user_id.as_str()).or_insert(user);
        }
        UserIndex { by_id }
    }

    pub fn get(&self, user_id: &str) -> Option<&'a User> {
        self.by_id.get(user_id).copied()
    }

    fn owner_of(&self, roster: &Roster) -> Option<&'a User> {
        roster.owner_id.as_deref().and_then(|id| self.get(id))
    }
}

/// Draft picks keyed by `(round, draft_slot)`. The first pick for a cell wins.
pub struct PickIndex<'a> {
    by_cell: HashMap<(u32, u32), &'a DraftPick>,
}

impl<'a> PickIndex<'a> {
    pub fn new(picks: &'a [DraftPick]) -> Self {
        let mut by_cell = HashMap::with_capacity(picks.len());
        for pick in picks {
            by_cell.entry((pick.round, pick.draft_slot)).or_insert(pick);
        }
        PickIndex { by_cell }
    }

    pub fn get(&self, round: u32, slot: u32) -> Option<&'a DraftPick> {
        self.by_cell.get(&(round, slot)).copied()
    }
}

/// Team display names keyed by `roster_id`.
///
/// Owns its strings so page state can hold it across renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamDirectory {
    names: HashMap<u32, String>,
}

impl TeamDirectory {
    /// Name every roster after its owner's display name.
    pub fn build(rosters: &[Roster], users: &[User]) -> Self {
        let index = UserIndex::new(users);
        let names = rosters
            .iter()
            .map(|r| (r.roster_id, resolve_owner(r, &index)))
            .collect();
        TeamDirectory { names }
    }

    /// Display name for a roster id; `"Unknown Team"` when the id is absent
    /// or not in the league.
    pub fn name_of(&self, roster_id: Option<u32>) -> &str {
        roster_id
            .and_then(|id| self.names.get(&id))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_TEAM)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Owner / picker resolution
// ---------------------------------------------------------------------------

/// Owner's display name, or `"Unknown Team"`.
pub fn resolve_owner(roster: &Roster, users: &UserIndex<'_>) -> String {
    users
        .owner_of(roster)
        .and_then(|u| non_empty(&u.display_name))
        .unwrap_or(UNKNOWN_TEAM)
        .to_string()
}

/// Team name for roster headers: the owner's custom team name, then their
/// display name, then `"Unknown Team"`.
pub fn resolve_team_name(roster: &Roster, users: &UserIndex<'_>) -> String {
    users
        .owner_of(roster)
        .and_then(|u| non_empty(&u.metadata.team_name).or(non_empty(&u.display_name)))
        .unwrap_or(UNKNOWN_TEAM)
        .to_string()
}

/// Owner's display name, or `"Unknown User"`.
pub fn resolve_display_name(roster: &Roster, users: &UserIndex<'_>) -> String {
    users
        .owner_of(roster)
        .and_then(|u| non_empty(&u.display_name))
        .unwrap_or(UNKNOWN_USER)
        .to_string()
}

/// Drafter's display name, or `"Unknown User"`.
pub fn resolve_picker(pick: &DraftPick, users: &UserIndex<'_>) -> String {
    users
        .get(&pick.picked_by)
        .and_then(|u| non_empty(&u.display_name))
        .unwrap_or(UNKNOWN_USER)
        .to_string()
}

/// CDN URL for a user's avatar, if they set one.
pub fn avatar_url(user: &User, cdn_base: &str) -> Option<String> {
    non_empty(&user.avatar).map(|id| format!("{}/{}", cdn_base.trim_end_matches('/'), id))
}

// ---------------------------------------------------------------------------
// Player resolution
// ---------------------------------------------------------------------------

/// A roster entry resolved against the player catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub player_id: String,
    pub name: String,
    pub team: String,
    /// Comma-separated fantasy positions ("RB, WR"), or `"N/A"`.
    pub fantasy_position: String,
}

impl PlayerView {
    /// First listed fantasy position, used for ordering.
    pub fn primary_position(&self) -> &str {
        self.fantasy_position
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }
}

/// Resolve a player id. A missing id falls back to the raw id as the name.
pub fn resolve_player(player_id: &str, players: &PlayerCatalog) -> PlayerView {
    match players.get(player_id) {
        Some(player) => {
            let name = non_empty(&player.full_name)
                .map(str::to_string)
                .or_else(|| {
                    match (non_empty(&player.first_name), non_empty(&player.last_name)) {
                        (Some(first), Some(last)) => Some(format!("{first} {last}")),
                        _ => None,
                    }
                })
                .unwrap_or_else(|| player_id.to_string());
            let fantasy_position = if player.fantasy_positions.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                player.fantasy_positions.join(", ")
            };
            PlayerView {
                player_id: player_id.to_string(),
                name,
                team: player.team.clone().unwrap_or_default(),
                fantasy_position,
            }
        }
        None => PlayerView {
            player_id: player_id.to_string(),
            name: player_id.to_string(),
            team: UNKNOWN_TEAM.to_string(),
            fantasy_position: NOT_AVAILABLE.to_string(),
        },
    }
}

/// A starter as shown in a matchup lineup.
#[derive(Debug, Clone, PartialEq)]
pub struct StarterView {
    pub player_id: String,
    pub position: String,
    pub name: String,
}

/// Resolve a starting-lineup player id.
///
/// Team defenses are named by their NFL team. Players without a catalog
/// entry or full name read `"Player from {team}"`.
pub fn resolve_starter(player_id: &str, players: &PlayerCatalog) -> StarterView {
    let player = players.get(player_id);
    let position = player
        .and_then(|p| non_empty(&p.position))
        .unwrap_or(NOT_AVAILABLE)
        .to_string();
    let team = player.and_then(|p| non_empty(&p.team));

    let name = match player {
        Some(p) if p.position.as_deref() == Some("DEF") => team.unwrap_or_default().to_string(),
        Some(p) if non_empty(&p.full_name).is_some() => p.full_name.clone().unwrap_or_default(),
        _ => format!("Player from {}", team.unwrap_or(UNKNOWN_TEAM)),
    };

    StarterView {
        player_id: player_id.to_string(),
        position,
        name,
    }
}

/// Player name for a draft board cell.
///
/// `"N/A"` when no pick occupies the cell or the pick's player is not in the
/// catalog; `"Unknown Player"` when the catalog entry has no name.
pub fn resolve_draft_cell(
    round: u32,
    slot: u32,
    picks: &PickIndex<'_>,
    players: &PlayerCatalog,
) -> String {
    match picks.get(round, slot).and_then(|pick| players.get(&pick.player_id)) {
        Some(player) => non_empty(&player.full_name)
            .unwrap_or(UNKNOWN_PLAYER)
            .to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Drafter name for a draft board cell; `"Unknown User"` for empty cells.
pub fn resolve_draft_picker(
    round: u32,
    slot: u32,
    picks: &PickIndex<'_>,
    users: &UserIndex<'_>,
) -> String {
    picks
        .get(round, slot)
        .map(|pick| resolve_picker(pick, users))
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

// ---------------------------------------------------------------------------
// Matchup pairing
// ---------------------------------------------------------------------------

/// A head-to-head pairing of two roster rows sharing a `matchup_id`.
///
/// The `team2*` fields stay empty when only one row carried the id.
#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub matchup_id: u32,
    pub team1: u32,
    pub team1_score: f64,
    pub team1_starters: Vec<String>,
    pub team2: Option<u32>,
    pub team2_score: Option<f64>,
    pub team2_starters: Vec<String>,
}

/// Pair per-roster rows into matchups in one pass.
///
/// The first row seen for a `matchup_id` becomes side 1 and the next becomes
/// side 2, so side assignment follows the order the API returned. Output is in
/// first-seen order. Rows without a `matchup_id` have no opponent and are
/// skipped.
pub fn pair_matchup_rows(rows: &[MatchupRow]) -> Vec<Matchup> {
    let mut slots: HashMap<u32, usize> = HashMap::new();
    let mut matchups: Vec<Matchup> = Vec::new();

    for row in rows {
        let Some(matchup_id) = row.matchup_id else {
            debug!(roster_id = row.roster_id, "skipping matchup row without matchup_id");
            continue;
        };

        match slots.get(&matchup_id) {
            Some(&i) => {
                let matchup = &mut matchups[i];
                matchup.team2 = Some(row.roster_id);
                matchup.team2_score = Some(row.points);
                matchup.team2_starters = row.starters.clone();
            }
            None => {
                slots.insert(matchup_id, matchups.len());
                matchups.push(Matchup {
                    matchup_id,
                    team1: row.roster_id,
                    team1_score: row.points,
                    team1_starters: row.starters.clone(),
                    team2: None,
                    team2_score: None,
                    team2_starters: Vec::new(),
                });
            }
        }
    }

    matchups
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
