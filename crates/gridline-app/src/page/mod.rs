// Page controllers and the machinery they share.
//
// Each page owns a set of `Fetched<T>` cells, one per independently fetched
// value. Issuing a request bumps the cell's generation; results tagged with
// an older generation are dropped when they arrive. Fetches run on spawned
// tasks via `Fetcher` and report back to the app loop as `FetchEvent`s.

pub mod draft;
pub mod matchups;
pub mod rosters;
pub mod standings;

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Local};
use gridline_core::client::LeagueSource;
use tokio::sync::mpsc;
use tracing::debug;

use crate::protocol::{FetchEvent, FetchPayload, PageId};

// ---------------------------------------------------------------------------
// Load state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Page-level state from its cells: loading while any cell is in flight,
/// ready once something has landed and nothing is in flight.
pub fn combine_states(states: &[LoadState]) -> LoadState {
    if states.contains(&LoadState::Loading) {
        LoadState::Loading
    } else if states.contains(&LoadState::Ready) {
        LoadState::Ready
    } else {
        LoadState::Idle
    }
}

// ---------------------------------------------------------------------------
// Fetched<T>
// ---------------------------------------------------------------------------

/// One fetched value plus the generation of the request that owns it.
///
/// The generation only ever increases, including across `reset`, so a result
/// from before an unmount can never match a request issued after it.
#[derive(Debug, Default)]
pub struct Fetched<T> {
    generation: u64,
    state: LoadState,
    value: T,
}

impl<T: Default> Fetched<T> {
    /// Start a new request. Returns the generation to tag it with.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }

    /// Start a request for a different selection. The old value belongs to
    /// the previous selection, so it is dropped while the new one loads.
    pub fn restart(&mut self) -> u64 {
        self.value = T::default();
        self.begin()
    }

    /// Store a result if it belongs to the current request. Returns `false`
    /// (and leaves the cell untouched) for stale results.
    pub fn complete(&mut self, generation: u64, value: T) -> bool {
        if generation != self.generation || self.state != LoadState::Loading {
            debug!(
                "Discarding stale fetch result (result gen: {}, current gen: {})",
                generation, self.generation
            );
            return false;
        }
        self.value = value;
        self.state = LoadState::Ready;
        true
    }

    /// Drop the value and invalidate any request in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoadState::Idle;
        self.value = T::default();
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Spawns league fetches and routes their results back to the app loop.
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn LeagueSource>,
    league_id: String,
    tx: mpsc::Sender<FetchEvent>,
}

impl Fetcher {
    pub fn new(
        source: Arc<dyn LeagueSource>,
        league_id: impl Into<String>,
        tx: mpsc::Sender<FetchEvent>,
    ) -> Self {
        Fetcher {
            source,
            league_id: league_id.into(),
            tx,
        }
    }

    pub fn league_id(&self) -> &str {
        &self.league_id
    }

    fn spawn<F, Fut>(&self, page: PageId, generation: u64, op: F)
    where
        F: FnOnce(Arc<dyn LeagueSource>, String) -> Fut + Send + 'static,
        Fut: Future<Output = FetchPayload> + Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let league_id = self.league_id.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let payload = op(source, league_id).await;
            debug!(?page, generation, kind = payload.kind(), "fetch finished");
            let event = FetchEvent {
                page,
                generation,
                payload,
            };
            if tx.send(event).await.is_err() {
                debug!("Fetch result dropped: event loop has shut down");
            }
        });
    }

    pub fn users(&self, page: PageId, generation: u64) {
        self.spawn(page, generation, |source, league| async move {
            FetchPayload::Users(source.fetch_users(&league).await)
        });
    }

    pub fn rosters(&self, page: PageId, generation: u64) {
        self.spawn(page, generation, |source, league| async move {
            FetchPayload::Rosters(source.fetch_rosters(&league).await)
        });
    }

    pub fn players(&self, page: PageId, generation: u64) {
        self.spawn(page, generation, |source, _| async move {
            FetchPayload::Players(source.fetch_all_players().await)
        });
    }

    pub fn drafts(&self, page: PageId, generation: u64) {
        self.spawn(page, generation, |source, league| async move {
            FetchPayload::Drafts(source.fetch_drafts(&league).await)
        });
    }

    pub fn draft_picks(&self, page: PageId, generation: u64, draft_id: &str) {
        let draft_id = draft_id.to_string();
        self.spawn(page, generation, move |source, _| async move {
            FetchPayload::DraftPicks(source.fetch_draft_picks(&draft_id).await)
        });
    }

    pub fn current_week(&self, page: PageId, generation: u64) {
        self.spawn(page, generation, |source, _| async move {
            FetchPayload::CurrentWeek(source.fetch_current_week().await)
        });
    }

    pub fn matchup_rows(&self, page: PageId, generation: u64, week: u32) {
        self.spawn(page, generation, move |source, league| async move {
            FetchPayload::MatchupRows(source.fetch_matchup_rows(&league, week).await)
        });
    }
}

// ---------------------------------------------------------------------------
// Page trait
// ---------------------------------------------------------------------------

/// Lifecycle shared by every page controller.
pub trait Page {
    /// Issue the page's initial fetches.
    fn mount(&mut self, fetcher: &Fetcher);

    /// Clear the page and invalidate everything in flight.
    fn unmount(&mut self);

    fn select_next(&mut self, fetcher: &Fetcher);

    fn select_previous(&mut self, fetcher: &Fetcher);

    /// Apply a fetch result. Returns `true` if the page changed.
    fn apply(&mut self, generation: u64, payload: FetchPayload, fetcher: &Fetcher) -> bool;

    fn load_state(&self) -> LoadState;
}

/// Shared "last updated" bookkeeping: stamp the time whenever the page
/// settles into `Ready`.
pub(crate) fn stamp_if_ready(state: LoadState, loaded_at: &mut Option<DateTime<Local>>) {
    if state == LoadState::Ready {
        *loaded_at = Some(Local::now());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
