// View models: the shapes each page renders.
//
// Builders here take raw payloads, run them through the joins in `join`, and
// group / sort the result. Everything is pure and deterministic; the page
// controllers decide when to call them.

use std::collections::HashMap;

use crate::client::draft_display_name;
use crate::join::{
    avatar_url, pair_matchup_rows, resolve_display_name, resolve_draft_cell,
    resolve_draft_picker, resolve_owner, resolve_player, resolve_starter, resolve_team_name,
    PickIndex, PlayerView, StarterView, TeamDirectory, UserIndex,
};
use crate::model::{Draft, DraftPick, MatchupRow, PlayerCatalog, Roster, User};
use crate::position::sort_rank;

/// Columns on the draft board. Fixed regardless of league size.
pub const DRAFT_SLOTS: u32 = 10;

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub team_name: String,
    pub division: Option<u32>,
    pub wins: u32,
    pub losses: u32,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionStandings {
    pub division: Option<u32>,
    pub teams: Vec<Standing>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StandingsView {
    pub divisions: Vec<DivisionStandings>,
    /// Every team in roster order.
    pub overall: Vec<Standing>,
}

/// One standings row per roster, in roster order.
pub fn build_standings(rosters: &[Roster], users: &[User]) -> Vec<Standing> {
    let index = UserIndex::new(users);
    rosters
        .iter()
        .map(|roster| Standing {
            team_name: resolve_owner(roster, &index),
            division: roster.settings.division,
            wins: roster.settings.wins,
            losses: roster.settings.losses,
            points: roster.settings.points_for(),
        })
        .collect()
}

/// Group standings by division, divisions in first-seen order, each group
/// sorted by wins descending. The sort is stable: teams with equal wins keep
/// their input order.
pub fn group_by_division(standings: &[Standing]) -> Vec<DivisionStandings> {
    let mut slots: HashMap<Option<u32>, usize> = HashMap::new();
    let mut groups: Vec<DivisionStandings> = Vec::new();

    for standing in standings {
        let i = *slots.entry(standing.division).or_insert_with(|| {
            groups.push(DivisionStandings {
                division: standing.division,
                teams: Vec::new(),
            });
            groups.len() - 1
        });
        groups[i].teams.push(standing.clone());
    }

    for group in &mut groups {
        group.teams.sort_by(|a, b| b.wins.cmp(&a.wins));
    }

    groups
}

/// The ungrouped standings table: every team in roster order.
pub fn build_overall_standings(rosters: &[Roster], users: &[User]) -> Vec<Standing> {
    build_standings(rosters, users)
}

pub fn build_standings_view(rosters: &[Roster], users: &[User]) -> StandingsView {
    let overall = build_overall_standings(rosters, users);
    StandingsView {
        divisions: group_by_division(&overall),
        overall,
    }
}

// ---------------------------------------------------------------------------
// Draft board
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DraftCell {
    pub player: String,
    pub picked_by: String,
    /// A pick exists for this round and slot, even if its player is unknown.
    pub occupied: bool,
}

/// Round-by-slot grid of draft picks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftGrid {
    /// `1..=max_round`.
    pub rounds: Vec<u32>,
    /// `cells[round - 1][slot - 1]`, `DRAFT_SLOTS` columns per round.
    pub cells: Vec<Vec<DraftCell>>,
}

impl DraftGrid {
    /// Cell at a 1-based round and slot.
    pub fn cell(&self, round: u32, slot: u32) -> Option<&DraftCell> {
        let r = round.checked_sub(1)? as usize;
        let s = slot.checked_sub(1)? as usize;
        self.cells.get(r)?.get(s)
    }
}

/// Lay picks out by round and slot. Rounds run from 1 to the highest round
/// of any pick; no picks means no rounds.
pub fn build_draft_grid(picks: &[DraftPick], users: &[User], players: &PlayerCatalog) -> DraftGrid {
    let max_round = picks.iter().map(|p| p.round).max().unwrap_or(0);
    let pick_index = PickIndex::new(picks);
    let user_index = UserIndex::new(users);

    let rounds: Vec<u32> = (1..=max_round).collect();
    let cells = rounds
        .iter()
        .map(|&round| {
            (1..=DRAFT_SLOTS)
                .map(|slot| DraftCell {
                    player: resolve_draft_cell(round, slot, &pick_index, players),
                    picked_by: resolve_draft_picker(round, slot, &pick_index, &user_index),
                    occupied: pick_index.get(round, slot).is_some(),
                })
                .collect()
        })
        .collect();

    DraftGrid { rounds, cells }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftOption {
    pub draft_id: String,
    pub name: String,
}

/// Selector entries for the league's drafts, in API order.
pub fn draft_options(drafts: &[Draft]) -> Vec<DraftOption> {
    drafts
        .iter()
        .map(|d| DraftOption {
            draft_id: d.draft_id.clone(),
            name: draft_display_name(d),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

/// A roster joined with its owner and resolved players.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamView {
    pub team_id: u32,
    pub owner_id: Option<String>,
    pub team_name: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub players: Vec<PlayerView>,
}

/// Join every roster with its owner and players, in roster order.
pub fn build_teams(
    rosters: &[Roster],
    users: &[User],
    players: &PlayerCatalog,
    avatar_base: &str,
) -> Vec<TeamView> {
    let index = UserIndex::new(users);
    rosters
        .iter()
        .map(|roster| {
            let owner = roster.owner_id.as_deref().and_then(|id| index.get(id));
            TeamView {
                team_id: roster.roster_id,
                owner_id: roster.owner_id.clone(),
                team_name: resolve_team_name(roster, &index),
                display_name: resolve_display_name(roster, &index),
                avatar: owner.and_then(|u| avatar_url(u, avatar_base)),
                wins: roster.settings.wins,
                losses: roster.settings.losses,
                players: roster
                    .players
                    .iter()
                    .map(|id| resolve_player(id, players))
                    .collect(),
            }
        })
        .collect()
}

/// A team's players ordered QB, RB, WR, TE, K, DEF by primary fantasy
/// position. Positions outside that list go last; ties keep roster order.
pub fn build_roster_view(team: &TeamView) -> Vec<PlayerView> {
    let mut players = team.players.clone();
    players.sort_by_key(|p| sort_rank(p.primary_position()));
    players
}

// ---------------------------------------------------------------------------
// Matchups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupSide {
    pub roster_id: Option<u32>,
    pub team_name: String,
    /// `None` for the missing side of a one-sided matchup.
    pub score: Option<f64>,
    pub starters: Vec<StarterView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupCard {
    pub matchup_id: u32,
    pub team1: MatchupSide,
    pub team2: MatchupSide,
}

/// Pair a week's rows and resolve team names and starters.
pub fn build_matchup_view(
    rows: &[MatchupRow],
    teams: &TeamDirectory,
    players: &PlayerCatalog,
) -> Vec<MatchupCard> {
    let starters = |ids: &[String]| -> Vec<StarterView> {
        ids.iter().map(|id| resolve_starter(id, players)).collect()
    };

    pair_matchup_rows(rows)
        .into_iter()
        .map(|m| MatchupCard {
            matchup_id: m.matchup_id,
            team1: MatchupSide {
                roster_id: Some(m.team1),
                team_name: teams.name_of(Some(m.team1)).to_string(),
                score: Some(m.team1_score),
                starters: starters(&m.team1_starters),
            },
            team2: MatchupSide {
                roster_id: m.team2,
                team_name: teams.name_of(m.team2).to_string(),
                score: m.team2_score,
                starters: starters(&m.team2_starters),
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::{NOT_AVAILABLE, UNKNOWN_TEAM, UNKNOWN_USER};
    use crate::model::{Player, RosterSettings, UserMetadata};

    fn user(id: &str, display: &str) -> User {
        User {
            user_id: id.into(),
            display_name: Some(display.into()),
            ..Default::default()
        }
    }

    fn roster(id: u32, owner: &str, division: Option<u32>, wins: u32) -> Roster {
        Roster {
            roster_id: id,
            owner_id: Some(owner.into()),
            players: Vec::new(),
            settings: RosterSettings {
                wins,
                losses: 8 - wins,
                fpts: 1000.0 + wins as f64,
                fpts_decimal: 50.0,
                division,
                ..Default::default()
            },
        }
    }

    fn standing(name: &str, division: Option<u32>, wins: u32) -> Standing {
        Standing {
            team_name: name.into(),
            division,
            wins,
            losses: 0,
            points: 0.0,
        }
    }

    fn player(name: &str, position: &str) -> Player {
        Player {
            full_name: Some(name.into()),
            team: Some("NFL".into()),
            position: Some(position.into()),
            fantasy_positions: vec![position.into()],
            ..Default::default()
        }
    }

    fn pick(round: u32, slot: u32, player_id: &str, by: &str) -> DraftPick {
        DraftPick {
            round,
            draft_slot: slot,
            player_id: player_id.into(),
            picked_by: by.into(),
            pick_no: None,
        }
    }

    // -- standings --

    #[test]
    fn standings_join_owner_names_and_points() {
        let users = vec![user("u1", "alice")];
        let rosters = vec![roster(1, "u1", Some(1), 5), roster(2, "ghost", Some(1), 3)];

        let standings = build_standings(&rosters, &users);
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].team_name, "alice");
        assert_eq!(standings[0].wins, 5);
        assert_eq!(standings[0].losses, 3);
        assert!((standings[0].points - 1005.5).abs() < 1e-9);
        assert_eq!(standings[1].team_name, UNKNOWN_TEAM);
    }

    #[test]
    fn division_sort_is_stable_on_ties() {
        let standings = vec![
            standing("W", Some(1), 5),
            standing("X", Some(1), 5),
            standing("Y", Some(1), 3),
        ];
        let groups = group_by_division(&standings);
        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].teams.iter().map(|t| t.team_name.as_str()).collect();
        assert_eq!(names, vec!["W", "X", "Y"]);
    }

    #[test]
    fn divisions_keep_first_seen_order() {
        let standings = vec![
            standing("A", Some(2), 1),
            standing("B", Some(1), 4),
            standing("C", Some(2), 6),
            standing("D", None, 2),
            standing("E", Some(1), 4),
        ];
        let groups = group_by_division(&standings);

        let divisions: Vec<Option<u32>> = groups.iter().map(|g| g.division).collect();
        assert_eq!(divisions, vec![Some(2), Some(1), None]);

        let names = |i: usize| -> Vec<String> {
            groups[i].teams.iter().map(|t| t.team_name.clone()).collect()
        };
        assert_eq!(names(0), vec!["C", "A"]);
        assert_eq!(names(1), vec!["B", "E"]);
        assert_eq!(names(2), vec!["D"]);
    }

    #[test]
    fn standings_view_keeps_overall_in_roster_order() {
        let users = vec![user("u1", "alice"), user("u2", "bob")];
        let rosters = vec![roster(1, "u1", Some(1), 2), roster(2, "u2", Some(1), 7)];

        let view = build_standings_view(&rosters, &users);
        let overall: Vec<&str> = view.overall.iter().map(|s| s.team_name.as_str()).collect();
        assert_eq!(overall, vec!["alice", "bob"]);
        let division: Vec<&str> = view.divisions[0]
            .teams
            .iter()
            .map(|s| s.team_name.as_str())
            .collect();
        assert_eq!(division, vec!["bob", "alice"]);
    }

    #[test]
    fn empty_standings() {
        let view = build_standings_view(&[], &[]);
        assert!(view.overall.is_empty());
        assert!(view.divisions.is_empty());
    }

    // -- draft grid --

    #[test]
    fn draft_grid_places_picks_by_round_and_slot() {
        let picks = vec![pick(1, 3, "4046", "u1"), pick(2, 1, "missing", "u2")];
        let users = vec![user("u1", "alice")];
        let mut players = PlayerCatalog::new();
        players.insert("4046".into(), player("Patrick Mahomes", "QB"));

        let grid = build_draft_grid(&picks, &users, &players);

        assert_eq!(grid.rounds, vec![1, 2]);
        assert_eq!(grid.cells.len(), 2);
        assert!(grid.cells.iter().all(|r| r.len() == DRAFT_SLOTS as usize));

        let resolved = grid.cell(1, 3).unwrap();
        assert_eq!(resolved.player, "Patrick Mahomes");
        assert_eq!(resolved.picked_by, "alice");

        for &round in &grid.rounds {
            for slot in 1..=DRAFT_SLOTS {
                if (round, slot) == (1, 3) {
                    continue;
                }
                assert_eq!(grid.cell(round, slot).unwrap().player, NOT_AVAILABLE);
            }
        }
        assert_eq!(grid.cell(2, 1).unwrap().picked_by, UNKNOWN_USER);

        assert!(resolved.occupied);
        assert!(grid.cell(2, 1).unwrap().occupied);
        assert!(!grid.cell(1, 1).unwrap().occupied);
    }

    #[test]
    fn uncatalogued_pick_keeps_its_drafter() {
        let picks = vec![pick(1, 2, "missing", "u1")];
        let users = vec![user("u1", "alice")];

        let grid = build_draft_grid(&picks, &users, &PlayerCatalog::new());
        let cell = grid.cell(1, 2).unwrap();
        assert_eq!(cell.player, NOT_AVAILABLE);
        assert_eq!(cell.picked_by, "alice");
        assert!(cell.occupied);
    }

    #[test]
    fn draft_grid_without_picks_has_no_rounds() {
        let grid = build_draft_grid(&[], &[], &PlayerCatalog::new());
        assert!(grid.rounds.is_empty());
        assert!(grid.cells.is_empty());
        assert!(grid.cell(1, 1).is_none());
    }

    #[test]
    fn draft_grid_out_of_range_cells() {
        let grid = build_draft_grid(&[pick(1, 1, "x", "u")], &[], &PlayerCatalog::new());
        assert!(grid.cell(0, 1).is_none());
        assert!(grid.cell(1, 0).is_none());
        assert!(grid.cell(1, DRAFT_SLOTS + 1).is_none());
        assert!(grid.cell(2, 1).is_none());
    }

    #[test]
    fn draft_options_use_synthesized_names() {
        let drafts = vec![
            Draft {
                draft_id: "new".into(),
                season: "2024".into(),
                rounds: Some(4),
                ..Default::default()
            },
            Draft {
                draft_id: "startup".into(),
                season: "2023".into(),
                rounds: Some(30),
                ..Default::default()
            },
        ];
        let options = draft_options(&drafts);
        assert_eq!(options[0].name, "2024 Draft");
        assert_eq!(options[1].draft_id, "startup");
        assert_eq!(options[1].name, "Startup Draft");
    }

    // -- rosters --

    fn team_with(positions: &[&str]) -> TeamView {
        TeamView {
            team_id: 1,
            owner_id: None,
            team_name: "T".into(),
            display_name: "T".into(),
            avatar: None,
            wins: 0,
            losses: 0,
            players: positions
                .iter()
                .enumerate()
                .map(|(i, pos)| PlayerView {
                    player_id: i.to_string(),
                    name: format!("{pos}{i}"),
                    team: "NFL".into(),
                    fantasy_position: pos.to_string(),
                })
                .collect(),
        }
    }

    fn positions(players: &[PlayerView]) -> Vec<&str> {
        players.iter().map(|p| p.fantasy_position.as_str()).collect()
    }

    #[test]
    fn roster_sorts_by_position_order() {
        let sorted = build_roster_view(&team_with(&["WR", "QB", "DEF", "RB"]));
        assert_eq!(positions(&sorted), vec!["QB", "RB", "WR", "DEF"]);
    }

    #[test]
    fn roster_sort_puts_unknown_positions_last_and_stays_stable() {
        let sorted = build_roster_view(&team_with(&["N/A", "K", "LB", "TE", "WR", "QB", "WR"]));
        assert_eq!(positions(&sorted), vec!["QB", "WR", "WR", "TE", "K", "N/A", "LB"]);
        // Equal positions keep roster order.
        let wrs: Vec<&str> = sorted
            .iter()
            .filter(|p| p.fantasy_position == "WR")
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(wrs, vec!["WR4", "WR6"]);
    }

    #[test]
    fn roster_sort_uses_primary_fantasy_position() {
        let sorted = build_roster_view(&team_with(&["WR, RB", "RB, WR", "QB"]));
        assert_eq!(positions(&sorted), vec!["QB", "RB, WR", "WR, RB"]);
    }

    #[test]
    fn build_teams_joins_owner_and_players() {
        let mut owner = user("u1", "alice");
        owner.avatar = Some("av1".into());
        owner.metadata = UserMetadata {
            team_name: Some("Alice's Aces".into()),
        };
        let users = vec![owner];

        let mut r1 = roster(1, "u1", None, 6);
        r1.players = vec!["4046".into(), "9999".into()];
        let r2 = roster(2, "ghost", None, 1);

        let mut players = PlayerCatalog::new();
        players.insert("4046".into(), player("Patrick Mahomes", "QB"));

        let teams = build_teams(&[r1, r2], &users, &players, "https://sleepercdn.com/avatars");
        assert_eq!(teams.len(), 2);

        let t1 = &teams[0];
        assert_eq!(t1.team_id, 1);
        assert_eq!(t1.team_name, "Alice's Aces");
        assert_eq!(t1.display_name, "alice");
        assert_eq!(t1.avatar.as_deref(), Some("https://sleepercdn.com/avatars/av1"));
        assert_eq!((t1.wins, t1.losses), (6, 2));
        assert_eq!(t1.players[0].name, "Patrick Mahomes");
        assert_eq!(t1.players[1].name, "9999");
        assert_eq!(t1.players[1].team, UNKNOWN_TEAM);

        let t2 = &teams[1];
        assert_eq!(t2.team_name, UNKNOWN_TEAM);
        assert_eq!(t2.display_name, UNKNOWN_USER);
        assert!(t2.avatar.is_none());
        assert!(t2.players.is_empty());
    }

    // -- matchups --

    #[test]
    fn matchup_view_resolves_names_and_starters() {
        let users = vec![user("u1", "alice"), user("u2", "bob")];
        let rosters = vec![roster(1, "u1", None, 0), roster(2, "u2", None, 0)];
        let directory = TeamDirectory::build(&rosters, &users);

        let mut players = PlayerCatalog::new();
        players.insert("4046".into(), player("Patrick Mahomes", "QB"));

        let rows = vec![
            MatchupRow {
                roster_id: 2,
                matchup_id: Some(1),
                points: 98.4,
                starters: vec!["4046".into()],
            },
            MatchupRow {
                roster_id: 1,
                matchup_id: Some(1),
                points: 120.1,
                starters: vec!["0".into()],
            },
            MatchupRow {
                roster_id: 7,
                matchup_id: Some(2),
                points: 64.0,
                starters: vec![],
            },
        ];

        let cards = build_matchup_view(&rows, &directory, &players);
        assert_eq!(cards.len(), 2);

        let first = &cards[0];
        assert_eq!(first.team1.team_name, "bob");
        assert_eq!(first.team1.score, Some(98.4));
        assert_eq!(first.team1.starters[0].name, "Patrick Mahomes");
        assert_eq!(first.team2.team_name, "alice");
        assert_eq!(first.team2.starters[0].name, "Player from Unknown Team");

        let partial = &cards[1];
        assert_eq!(partial.team1.team_name, UNKNOWN_TEAM);
        assert_eq!(partial.team2.roster_id, None);
        assert_eq!(partial.team2.team_name, UNKNOWN_TEAM);
        assert_eq!(partial.team2.score, None);
        assert!(partial.team2.starters.is_empty());
    }
}
