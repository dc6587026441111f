// Matchups page: head-to-head cards for one week.
//
// The current NFL week is fetched first; the matchup rows for that week are
// requested once it arrives. Moving the week selector only refetches rows.

use chrono::{DateTime, Local};
use gridline_core::join::TeamDirectory;
use gridline_core::model::{MatchupRow, PlayerCatalog, Roster, User};
use gridline_core::view::{build_matchup_view, MatchupCard};
use tracing::{info, warn};

use super::{combine_states, stamp_if_ready, Fetched, Fetcher, LoadState, Page};
use crate::protocol::{FetchPayload, PageId};

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupsPageView {
    pub state: LoadState,
    pub loaded_at: Option<DateTime<Local>>,
    pub week: u32,
    /// Highest selectable week: the current NFL week.
    pub max_week: u32,
    pub cards: Vec<MatchupCard>,
}

impl Default for MatchupsPageView {
    fn default() -> Self {
        MatchupsPageView {
            state: LoadState::Idle,
            loaded_at: None,
            week: 1,
            max_week: 1,
            cards: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct MatchupsPage {
    current_week: Fetched<Option<u32>>,
    users: Fetched<Vec<User>>,
    rosters: Fetched<Vec<Roster>>,
    players: Fetched<PlayerCatalog>,
    rows: Fetched<Vec<MatchupRow>>,
    week: u32,
    max_week: u32,
    loaded_at: Option<DateTime<Local>>,
}

impl Default for MatchupsPage {
    fn default() -> Self {
        MatchupsPage {
            current_week: Fetched::default(),
            users: Fetched::default(),
            rosters: Fetched::default(),
            players: Fetched::default(),
            rows: Fetched::default(),
            week: 1,
            max_week: 1,
            loaded_at: None,
        }
    }
}

impl MatchupsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn view(&self) -> MatchupsPageView {
        let teams = TeamDirectory::build(self.rosters.value(), self.users.value());
        MatchupsPageView {
            state: self.load_state(),
            loaded_at: self.loaded_at,
            week: self.week,
            max_week: self.max_week,
            cards: build_matchup_view(self.rows.value(), &teams, self.players.value()),
        }
    }

    fn select_week(&mut self, week: u32, fetcher: &Fetcher) {
        self.week = week;
        info!("Matchups: selected week {}", week);
        fetcher.matchup_rows(PageId::Matchups, self.rows.restart(), week);
    }
}

impl Page for MatchupsPage {
    fn mount(&mut self, fetcher: &Fetcher) {
        fetcher.current_week(PageId::Matchups, self.current_week.begin());
        fetcher.users(PageId::Matchups, self.users.begin());
        fetcher.rosters(PageId::Matchups, self.rosters.begin());
        fetcher.players(PageId::Matchups, self.players.begin());
    }

    fn unmount(&mut self) {
        self.current_week.reset();
        self.users.reset();
        self.rosters.reset();
        self.players.reset();
        self.rows.reset();
        self.week = 1;
        self.max_week = 1;
        self.loaded_at = None;
    }

    fn select_next(&mut self, fetcher: &Fetcher) {
        if self.week < self.max_week {
            self.select_week(self.week + 1, fetcher);
        }
    }

    fn select_previous(&mut self, fetcher: &Fetcher) {
        if self.week > 1 {
            self.select_week(self.week - 1, fetcher);
        }
    }

    fn apply(&mut self, generation: u64, payload: FetchPayload, fetcher: &Fetcher) -> bool {
        let changed = match payload {
            FetchPayload::CurrentWeek(week) => {
                if !self.current_week.complete(generation, week) {
                    return false;
                }
                match week.filter(|w| *w >= 1) {
                    Some(w) => {
                        self.max_week = w;
                        self.select_week(w, fetcher);
                    }
                    None => {
                        warn!("Current NFL week unavailable; no matchups to load");
                        self.week = 1;
                        self.max_week = 1;
                    }
                }
                true
            }
            FetchPayload::Users(users) => self.users.complete(generation, users),
            FetchPayload::Rosters(rosters) => self.rosters.complete(generation, rosters),
            FetchPayload::Players(players) => self.players.complete(generation, players),
            FetchPayload::MatchupRows(rows) => self.rows.complete(generation, rows),
            other => {
                warn!("Matchups page ignoring unexpected {} result", other.kind());
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
            self.current_week.state(),
            self.users.state(),
            self.rosters.state(),
            self.players.state(),
            self.rows.state(),
        ])
    }
}
