// Draft results page: a round-by-slot board for one of the league's drafts.
//
// The draft list arrives first and the first draft is selected; its picks
// are requested as a follow-up. Changing the selected draft refetches picks.

use chrono::{DateTime, Local};
use gridline_core::model::{Draft, DraftPick, PlayerCatalog, User};
use gridline_core::view::{build_draft_grid, draft_options, DraftGrid, DraftOption};
use tracing::{info, warn};

use super::{combine_states, stamp_if_ready, Fetched, Fetcher, LoadState, Page};
use crate::protocol::{FetchPayload, PageId};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftPageView {
    pub state: LoadState,
    pub loaded_at: Option<DateTime<Local>>,
    pub options: Vec<DraftOption>,
    /// Index into `options`.
    pub selected: Option<usize>,
    pub grid: DraftGrid,
}

#[derive(Debug, Default)]
pub struct DraftPage {
    drafts: Fetched<Vec<Draft>>,
    users: Fetched<Vec<User>>,
    players: Fetched<PlayerCatalog>,
    picks: Fetched<Vec<DraftPick>>,
    selected: Option<usize>,
    loaded_at: Option<DateTime<Local>>,
}

impl DraftPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_draft(&self) -> Option<&Draft> {
        self.selected.and_then(|i| self.drafts.value().get(i))
    }

    pub fn view(&self) -> DraftPageView {
        DraftPageView {
            state: self.load_state(),
            loaded_at: self.loaded_at,
            options: draft_options(self.drafts.value()),
            selected: self.selected,
            grid: build_draft_grid(self.picks.value(), self.users.value(), self.players.value()),
        }
    }

    fn select(&mut self, index: usize, fetcher: &Fetcher) {
        let Some(draft) = self.drafts.value().get(index) else {
            return;
        };
        let draft_id = draft.draft_id.clone();
        info!("Draft: selected {} ({})", draft.name, draft_id);
        self.selected = Some(index);
        fetcher.draft_picks(PageId::Draft, self.picks.restart(), &draft_id);
    }
}

impl Page for DraftPage {
    fn mount(&mut self, fetcher: &Fetcher) {
        fetcher.drafts(PageId::Draft, self.drafts.begin());
        fetcher.users(PageId::Draft, self.users.begin());
        fetcher.players(PageId::Draft, self.players.begin());
    }

    fn unmount(&mut self) {
        self.drafts.reset();
        self.users.reset();
        self.players.reset();
        self.picks.reset();
        self.selected = None;
        self.loaded_at = None;
    }

    fn select_next(&mut self, fetcher: &Fetcher) {
        if let Some(i) = self.selected {
            if i + 1 < self.drafts.value().len() {
                self.select(i + 1, fetcher);
            }
        }
    }

    fn select_previous(&mut self, fetcher: &Fetcher) {
        if let Some(i) = self.selected {
            if i > 0 {
                self.select(i - 1, fetcher);
            }
        }
    }

    fn apply(&mut self, generation: u64, payload: FetchPayload, fetcher: &Fetcher) -> bool {
        let changed = match payload {
            FetchPayload::Drafts(drafts) => {
                if !self.drafts.complete(generation, drafts) {
                    return false;
                }
                if self.drafts.value().is_empty() {
                    info!("League has no drafts");
                } else {
                    self.select(0, fetcher);
                }
                true
            }
            FetchPayload::Users(users) => self.users.complete(generation, users),
            FetchPayload::Players(players) => self.players.complete(generation, players),
            FetchPayload::DraftPicks(picks) => self.picks.complete(generation, picks),
            other => {
                warn!("Draft page ignoring unexpected {} result", other.kind());
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
            self.drafts.state(),
            self.users.state(),
            self.players.state(),
            self.picks.state(),
        ])
    }
}
