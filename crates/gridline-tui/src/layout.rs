// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Selector (3 rows, pages with a selector)          |
// +--------------------------------------------------+
// | Page content                                      |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The top-level split is status / main / help; each page widget carves its
// own selector out of the main panel with `split_selector`.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// League name, page tabs, load status.
    pub status_bar: Rect,
    /// The active page.
    pub main_panel: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(3),    // page
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

/// Split a page area into a 3-row selector strip and the content below it.
pub fn split_selector(area: Rect) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    (parts[0], parts[1])
}

/// Split a page area into a left column of `left_percent` and the rest.
pub fn split_columns(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent.min(100)),
        ])
        .split(area);
    (parts[0], parts[1])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
