// Message types passed between the TUI, the app event loop, and fetch tasks.
//
// Commands flow TUI -> app, snapshots flow app -> TUI, and fetch results flow
// from spawned tasks back into the app loop tagged with the page and request
// generation that issued them.

use gridline_core::model::{Draft, DraftPick, MatchupRow, PlayerCatalog, Roster, User};

use crate::page::draft::DraftPageView;
use crate::page::matchups::MatchupsPageView;
use crate::page::rosters::RostersPageView;
use crate::page::standings::StandingsPageView;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Standings,
    Matchups,
    Draft,
    Rosters,
}

impl PageId {
    /// Tab order.
    pub const ALL: [PageId; 4] = [
        PageId::Standings,
        PageId::Matchups,
        PageId::Draft,
        PageId::Rosters,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PageId::Standings => "Standings",
            PageId::Matchups => "Matchups",
            PageId::Draft => "Draft Results",
            PageId::Rosters => "Rosters",
        }
    }

    /// Position in `ALL`.
    pub fn index(&self) -> usize {
        match self {
            PageId::Standings => 0,
            PageId::Matchups => 1,
            PageId::Draft => 2,
            PageId::Rosters => 3,
        }
    }
}

// ---------------------------------------------------------------------------
// TUI -> app
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SwitchPage(PageId),
    /// Advance the active page's selector (week, draft, team).
    SelectNext,
    SelectPrevious,
    /// Unmount and re-mount the active page.
    Refresh,
    Quit,
}

// ---------------------------------------------------------------------------
// App -> TUI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    Snapshot(Box<AppSnapshot>),
}

/// Everything the TUI needs to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub league_name: String,
    pub active: PageId,
    pub standings: StandingsPageView,
    pub matchups: MatchupsPageView,
    pub draft: DraftPageView,
    pub rosters: RostersPageView,
}

// ---------------------------------------------------------------------------
// Fetch tasks -> app
// ---------------------------------------------------------------------------

/// A completed fetch, tagged with the page and generation that requested it.
#[derive(Debug)]
pub struct FetchEvent {
    pub page: PageId,
    pub generation: u64,
    pub payload: FetchPayload,
}

#[derive(Debug)]
pub enum FetchPayload {
    Users(Vec<User>),
    Rosters(Vec<Roster>),
    Players(PlayerCatalog),
    Drafts(Vec<Draft>),
    DraftPicks(Vec<DraftPick>),
    CurrentWeek(Option<u32>),
    MatchupRows(Vec<MatchupRow>),
}

impl FetchPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchPayload::Users(_) => "users",
            FetchPayload::Rosters(_) => "rosters",
            FetchPayload::Players(_) => "players",
            FetchPayload::Drafts(_) => "drafts",
            FetchPayload::DraftPicks(_) => "draft_picks",
            FetchPayload::CurrentWeek(_) => "current_week",
            FetchPayload::MatchupRows(_) => "matchup_rows",
        }
    }
}
