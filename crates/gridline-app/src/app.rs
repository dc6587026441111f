// Application state and the main event loop.
//
// The loop owns every page controller. It consumes user commands from the TUI
// and fetch results from spawned tasks, and pushes a fresh snapshot to the
// TUI whenever something visible changes.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::page::draft::DraftPage;
use crate::page::matchups::MatchupsPage;
use crate::page::rosters::RostersPage;
use crate::page::standings::StandingsPage;
use crate::page::{Fetcher, Page};
use crate::protocol::{AppSnapshot, FetchEvent, PageId, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub league_name: String,
    pub active: PageId,
    pub standings: StandingsPage,
    pub matchups: MatchupsPage,
    pub draft: DraftPage,
    pub rosters: RostersPage,
    pub fetcher: Fetcher,
}

impl AppState {
    pub fn new(league_name: impl Into<String>, avatar_base_url: &str, fetcher: Fetcher) -> Self {
        AppState {
            league_name: league_name.into(),
            active: PageId::Standings,
            standings: StandingsPage::new(),
            matchups: MatchupsPage::new(),
            draft: DraftPage::new(),
            rosters: RostersPage::new(avatar_base_url),
            fetcher,
        }
    }

    fn page_mut(&mut self, id: PageId) -> &mut dyn Page {
        match id {
            PageId::Standings => &mut self.standings,
            PageId::Matchups => &mut self.matchups,
            PageId::Draft => &mut self.draft,
            PageId::Rosters => &mut self.rosters,
        }
    }

    /// Mount the active page.
    pub fn mount_active(&mut self) {
        let fetcher = self.fetcher.clone();
        info!("Mounting {} page", self.active.title());
        self.page_mut(self.active).mount(&fetcher);
    }

    /// Unmount the current page and mount `page`. No-op if it is already
    /// active.
    pub fn switch_page(&mut self, page: PageId) -> bool {
        if page == self.active {
            return false;
        }
        info!("Switching page: {} -> {}", self.active.title(), page.title());
        self.page_mut(self.active).unmount();
        self.active = page;
        self.mount_active();
        true
    }

    /// Re-mount the active page from scratch.
    pub fn refresh(&mut self) {
        info!("Refreshing {} page", self.active.title());
        self.page_mut(self.active).unmount();
        self.mount_active();
    }

    pub fn select_next(&mut self) {
        let fetcher = self.fetcher.clone();
        self.page_mut(self.active).select_next(&fetcher);
    }

    pub fn select_previous(&mut self) {
        let fetcher = self.fetcher.clone();
        self.page_mut(self.active).select_previous(&fetcher);
    }

    /// Route a fetch result to the page that requested it. Returns `true` if
    /// that page changed.
    pub fn handle_fetch_event(&mut self, event: FetchEvent) -> bool {
        let fetcher = self.fetcher.clone();
        let FetchEvent {
            page,
            generation,
            payload,
        } = event;
        if page != self.active {
            debug!("Dropping {} result for inactive page {:?}", payload.kind(), page);
            return false;
        }
        self.page_mut(page).apply(generation, payload, &fetcher)
    }

    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            league_name: self.league_name.clone(),
            active: self.active,
            standings: self.standings.view(),
            matchups: self.matchups.view(),
            draft: self.draft.view(),
            rosters: self.rosters.view(),
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn push_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await;
}

/// Run the main application event loop.
///
/// Mounts the active page, then listens on two channels using
/// `tokio::select!`:
/// 1. Fetch results from spawned fetch tasks
/// 2. User commands from the TUI
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut fetch_rx: mpsc::Receiver<FetchEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    state.mount_active();
    push_snapshot(&state, &ui_tx).await;

    // The app holds a sender via the fetcher, so this channel only closes if
    // the state is torn down; stop polling it if that ever happens.
    let mut fetch_open = true;

    loop {
        tokio::select! {
            // --- Fetch results ---
            event = fetch_rx.recv(), if fetch_open => {
                match event {
                    Some(event) => {
                        if state.handle_fetch_event(event) {
                            push_snapshot(&state, &ui_tx).await;
                        }
                    }
                    None => {
                        info!("Fetch channel closed");
                        fetch_open = false;
                    }
                }
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd);
                        push_snapshot(&state, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

fn handle_user_command(state: &mut AppState, cmd: UserCommand) {
    match cmd {
        UserCommand::SwitchPage(page) => {
            state.switch_page(page);
        }
        UserCommand::SelectNext => state.select_next(),
        UserCommand::SelectPrevious => state.select_previous(),
        UserCommand::Refresh => state.refresh(),
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}
