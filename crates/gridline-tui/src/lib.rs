// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the latest `AppSnapshot`. The app
// event loop pushes `UiUpdate` messages over an mpsc channel; the TUI applies
// them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use gridline_app::page::draft::DraftPageView;
use gridline_app::page::matchups::MatchupsPageView;
use gridline_app::page::rosters::RostersPageView;
use gridline_app::page::standings::StandingsPageView;
use gridline_app::protocol::{AppSnapshot, PageId, UiUpdate, UserCommand};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{info, warn};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
pub struct ViewState {
    pub league_name: String,
    pub active: PageId,
    pub standings: StandingsPageView,
    pub matchups: MatchupsPageView,
    pub draft: DraftPageView,
    pub rosters: RostersPageView,
    /// Per-page scroll offsets.
    pub scroll_offset: HashMap<PageId, usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            league_name: String::new(),
            active: PageId::Standings,
            standings: StandingsPageView::default(),
            matchups: MatchupsPageView::default(),
            draft: DraftPageView::default(),
            rosters: RostersPageView::default(),
            scroll_offset: HashMap::new(),
        }
    }
}

impl ViewState {
    /// Replace the mirrored page data with a snapshot. Scroll offsets
    /// survive, except for a page that was just switched to.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        if snapshot.active != self.active {
            self.scroll_offset.remove(&snapshot.active);
        }
        self.league_name = snapshot.league_name;
        self.active = snapshot.active;
        self.standings = snapshot.standings;
        self.matchups = snapshot.matchups;
        self.draft = snapshot.draft;
        self.rosters = snapshot.rosters;
    }

    /// Scroll offset of the active page.
    pub fn scroll(&self) -> usize {
        self.scroll_offset.get(&self.active).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.active {
        PageId::Standings => widgets::standings::render(frame, layout.main_panel, state),
        PageId::Matchups => widgets::matchups::render(frame, layout.main_panel, state),
        PageId::Draft => widgets::draft_board::render(frame, layout.main_panel, state),
        PageId::Rosters => widgets::rosters::render(frame, layout.main_panel, state),
    }
    render_help_bar(frame, layout.help_bar, state.active);
}

/// Key hints for the active page.
pub fn help_text(active: PageId) -> &'static str {
    match active {
        PageId::Standings => " q:Quit | 1-4:Pages | j/k:Scroll | r:Refresh",
        PageId::Matchups => " q:Quit | 1-4:Pages | h/l:Week | j/k:Scroll | r:Refresh",
        PageId::Draft => " q:Quit | 1-4:Pages | h/l:Draft | j/k:Scroll | r:Refresh",
        PageId::Rosters => " q:Quit | 1-4:Pages | h/l:Team | j/k:Scroll | r:Refresh",
    }
}

fn render_help_bar(frame: &mut Frame, area: ratatui::layout::Rect, active: PageId) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(active),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            // UI updates from the app loop
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break Ok(());
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match input::handle_key(key_event, &mut view_state) {
                            Some(UserCommand::Quit) => {
                                let _ = cmd_tx.send(UserCommand::Quit).await;
                                break Ok(());
                            }
                            Some(cmd) => {
                                let _ = cmd_tx.send(cmd).await;
                            }
                            None => {}
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events; the next tick redraws.
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use gridline_app::page::LoadState;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    /// Draw a full frame and return the buffer as one string per row.
    pub(crate) fn render_to_lines(state: &ViewState, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    pub(crate) fn screen_contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.contains(needle))
    }

    fn snapshot(active: PageId) -> AppSnapshot {
        AppSnapshot {
            league_name: "Test League".into(),
            active,
            standings: StandingsPageView::default(),
            matchups: MatchupsPageView::default(),
            draft: DraftPageView::default(),
            rosters: RostersPageView::default(),
        }
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert_eq!(state.active, PageId::Standings);
        assert!(state.league_name.is_empty());
        assert_eq!(state.standings.state, LoadState::Idle);
        assert_eq!(state.matchups.week, 1);
        assert!(state.scroll_offset.is_empty());
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn apply_ui_update_snapshot() {
        let mut state = ViewState::default();
        let mut snap = snapshot(PageId::Matchups);
        snap.matchups.week = 7;
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(snap)));
        assert_eq!(state.league_name, "Test League");
        assert_eq!(state.active, PageId::Matchups);
        assert_eq!(state.matchups.week, 7);
    }

    #[test]
    fn switching_page_resets_its_scroll_only() {
        let mut state = ViewState::default();
        state.scroll_offset.insert(PageId::Standings, 4);
        state.scroll_offset.insert(PageId::Draft, 9);

        state.apply_snapshot(snapshot(PageId::Standings));
        assert_eq!(state.scroll(), 4);

        state.apply_snapshot(snapshot(PageId::Draft));
        assert_eq!(state.scroll(), 0);
        assert_eq!(state.scroll_offset.get(&PageId::Standings), Some(&4));
    }

    #[test]
    fn every_page_renders_empty_without_panicking() {
        for page in PageId::ALL {
            let mut state = ViewState::default();
            state.apply_snapshot(snapshot(page));
            let lines = render_to_lines(&state, 100, 30);
            assert!(screen_contains(&lines, "Test League"));
            assert!(screen_contains(&lines, "q:Quit"));
        }
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        for page in PageId::ALL {
            let mut state = ViewState::default();
            state.apply_snapshot(snapshot(page));
            render_to_lines(&state, 20, 5);
        }
    }

    #[test]
    fn help_text_names_the_selector() {
        assert!(help_text(PageId::Matchups).contains("Week"));
        assert!(help_text(PageId::Draft).contains("Draft"));
        assert!(help_text(PageId::Rosters).contains("Team"));
        assert!(!help_text(PageId::Standings).contains("h/l"));
    }
}
