// Rosters page: one team's players, sorted by position.
//
// Team selection is local: every roster is loaded on mount, so switching
// teams never touches the network.

use chrono::{DateTime, Local};
use gridline_core::join::PlayerView;
use gridline_core::model::{PlayerCatalog, Roster, User};
use gridline_core::view::{build_roster_view, build_teams, TeamView};
use tracing::{debug, warn};

use super::{combine_states, stamp_if_ready, Fetched, Fetcher, LoadState, Page};
use crate::protocol::{FetchPayload, PageId};

/// Selector entry for a team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamOption {
    pub team_id: u32,
    pub team_name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RostersPageView {
    pub state: LoadState,
    pub loaded_at: Option<DateTime<Local>>,
    pub teams: Vec<TeamOption>,
    /// Index into `teams`.
    pub selected: Option<usize>,
    pub team: Option<TeamView>,
    /// The selected team's players in display order.
    pub players: Vec<PlayerView>,
}

#[derive(Debug, Default)]
pub struct RostersPage {
    users: Fetched<Vec<User>>,
    rosters: Fetched<Vec<Roster>>,
    players: Fetched<PlayerCatalog>,
    selected: usize,
    avatar_base_url: String,
    loaded_at: Option<DateTime<Local>>,
}

impl RostersPage {
    pub fn new(avatar_base_url: impl Into<String>) -> Self {
        RostersPage {
            avatar_base_url: avatar_base_url.into(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> RostersPageView {
        let teams = build_teams(
            self.rosters.value(),
            self.users.value(),
            self.players.value(),
            &self.avatar_base_url,
        );
        let selected = (!teams.is_empty()).then(|| self.selected.min(teams.len() - 1));
        let team = selected.and_then(|i| teams.get(i)).cloned();
        let players = team.as_ref().map(build_roster_view).unwrap_or_default();

        RostersPageView {
            state: self.load_state(),
            loaded_at: self.loaded_at,
            teams: teams
                .iter()
                .map(|t| TeamOption {
                    team_id: t.team_id,
                    team_name: t.team_name.clone(),
                })
                .collect(),
            selected,
            team,
            players,
        }
    }
}

impl Page for RostersPage {
    fn mount(&mut self, fetcher: &Fetcher) {
        self.selected = 0;
        fetcher.users(PageId::Rosters, self.users.begin());
        fetcher.rosters(PageId::Rosters, self.rosters.begin());
        fetcher.players(PageId::Rosters, self.players.begin());
    }

    fn unmount(&mut self) {
        self.users.reset();
        self.rosters.reset();
        self.players.reset();
        self.selected = 0;
        self.loaded_at = None;
    }

    fn select_next(&mut self, _fetcher: &Fetcher) {
        if self.selected + 1 < self.rosters.value().len() {
            self.selected += 1;
            debug!("Rosters: selected team index {}", self.selected);
        }
    }

    fn select_previous(&mut self, _fetcher: &Fetcher) {
        if self.selected > 0 {
            self.selected -= 1;
            debug!("Rosters: selected team index {}", self.selected);
        }
    }

    fn apply(&mut self, generation: u64, payload: FetchPayload, _fetcher: &Fetcher) -> bool {
        let changed = match payload {
            FetchPayload::Users(users) => self.users.complete(generation, users),
            FetchPayload::Rosters(rosters) => self.rosters.complete(generation, rosters),
            FetchPayload::Players(players) => self.players.complete(generation, players),
            other => {
                warn!("Rosters page ignoring unexpected {} result", other.kind());
                false
            }
        };
        if changed {
            stamp_if_ready(self.load_state(), &mut self.loaded_at);
        }
        changed
    }

    fn load_state(&self) -> LoadState {
        combine_states(&[
            self.users.state(),
            self.rosters.state(),
            self.players.state(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::tests::{drain, fetcher_with, CannedSource};
    use gridline_core::model::{Player, UserMetadata};

    fn player(name: &str, position: &str) -> Player {
        Player {
            full_name: Some(name.into()),
            team: Some("KC".into()),
            fantasy_positions: vec![position.into()],
            ..Default::default()
        }
    }

    fn source() -> CannedSource {
        let mut players = PlayerCatalog::new();
        players.insert("wr".into(), player("Wide Out", "WR"));
        players.insert("qb".into(), player("Signal Caller", "QB"));
        players.insert("def".into(), player("Kansas City", "DEF"));
        players.insert("rb".into(), player("Bell Cow", "RB"));

        CannedSource {
            users: vec![User {
                user_id: "u1".into(),
                display_name: Some("alice".into()),
                avatar: Some("abc".into()),
                metadata: UserMetadata {
                    team_name: Some("Aces".into()),
                },
            }],
            rosters: vec![
                Roster {
                    roster_id: 1,
                    owner_id: Some("u1".into()),
                    players: vec!["wr".into(), "qb".into(), "def".into(), "rb".into()],
                    ..Default::default()
                },
                Roster {
                    roster_id: 2,
                    owner_id: Some("gone".into()),
                    ..Default::default()
                },
            ],
            players,
            ..Default::default()
        }
    }

    async fn mounted() -> (RostersPage, Fetcher) {
        let (fetcher, mut rx) = fetcher_with(source());
        let mut page = RostersPage::new("https://cdn.test/avatars");
        page.mount(&fetcher);
        for event in drain(&mut rx, 3).await {
            assert!(page.apply(event.generation, event.payload, &fetcher));
        }
        (page, fetcher)
    }

    #[tokio::test]
    async fn first_team_selected_and_sorted_by_position() {
        let (page, _fetcher) = mounted().await;
        let view = page.view();

        assert_eq!(view.state, LoadState::Ready);
        assert_eq!(view.selected, Some(0));
        assert_eq!(view.teams.len(), 2);

        let team = view.team.as_ref().unwrap();
        assert_eq!(team.team_name, "Aces");
        assert_eq!(team.avatar.as_deref(), Some("https://cdn.test/avatars/abc"));

        let order: Vec<&str> = view.players.iter().map(|p| p.fantasy_position.as_str()).collect();
        assert_eq!(order, vec!["QB", "RB", "WR", "DEF"]);
    }

    #[tokio::test]
    async fn selecting_a_team_is_local() {
        let (mut page, fetcher) = mounted().await;

        page.select_next(&fetcher);
        let view = page.view();
        assert_eq!(view.selected, Some(1));
        let team = view.team.unwrap();
        assert_eq!(team.team_name, "Unknown Team");
        assert!(view.players.is_empty());
        assert_eq!(view.state, LoadState::Ready);

        page.select_next(&fetcher);
        assert_eq!(page.view().selected, Some(1));
        page.select_previous(&fetcher);
        page.select_previous(&fetcher);
        assert_eq!(page.view().selected, Some(0));
    }

    #[test]
    fn empty_page_has_no_selection() {
        let page = RostersPage::new("https://cdn.test/avatars");
        let view = page.view();
        assert_eq!(view.state, LoadState::Idle);
        assert_eq!(view.selected, None);
        assert!(view.team.is_none());
        assert!(view.players.is_empty());
    }
}
