// Standings page: division tables plus the overall table.

use chrono::{DateTime, Local};
use gridline_core::model::{Roster, User};
use gridline_core::view::{build_standings_view, StandingsView};
use tracing::warn;

use super::{combine_states, stamp_if_ready, Fetched, Fetcher, LoadState, Page};
use crate::protocol::{FetchPayload, PageId};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StandingsPageView {
    pub state: LoadState,
    pub loaded_at: Option<DateTime<Local>>,
    pub standings: StandingsView,
}

#[derive(Debug, Default)]
pub struct StandingsPage {
    users: Fetched<Vec<User>>,
    rosters: Fetched<Vec<Roster>>,
    loaded_at: Option<DateTime<Local>>,
}

impl StandingsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> StandingsPageView {
        StandingsPageView {
            state: self.load_state(),
            loaded_at: self.loaded_at,
            standings: build_standings_view(self.rosters.value(), self.users.value()),
        }
    }
}

impl Page for StandingsPage {
    fn mount(&mut self, fetcher: &Fetcher) {
        fetcher.users(PageId::Standings, self.users.begin());
        fetcher.rosters(PageId::Standings, self.rosters.begin());
    }

    fn unmount(&mut self) {
        self.users.reset();
        self.rosters.reset();
        self.loaded_at = None;
    }

    // No selector on this page.
    fn select_next(&mut self, _fetcher: &Fetcher) {}

    fn select_previous(&mut self, _fetcher: &Fetcher) {}

    fn apply(&mut self, generation: u64, payload: FetchPayload, _fetcher: &Fetcher) -> bool {
        let changed = match payload {
            FetchPayload::Users(users) => self.users.complete(generation, users),
            FetchPayload::Rosters(rosters) => self.rosters.complete(generation, rosters),
            other => {
                warn!("Standings page ignoring unexpected {} result", other.kind());
                false
            }
        };
        if changed {
            stamp_if_ready(self.load_state(), &mut self.loaded_at);
        }
        changed
    }

    fn load_state(&self) -> LoadState {
        combine_states(&[self.users.state(), self.rosters.state()])
    }
}
