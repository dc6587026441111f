// Status bar widget: league name, page tabs, load status of the active page.

use gridline_app::page::LoadState;
use gridline_app::protocol::PageId;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::load_label;
use crate::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [league name] | [tab bar] | [load status]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.league_name),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Gray)),
    ];
    spans.extend(tab_spans(state.active));

    let (page_state, loaded_at) = active_status(state);
    let label = load_label(page_state, loaded_at);
    if !label.is_empty() {
        spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(label, Style::default().fg(state_color(page_state))));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

fn active_status(state: &ViewState) -> (LoadState, Option<chrono::DateTime<chrono::Local>>) {
    match state.active {
        PageId::Standings => (state.standings.state, state.standings.loaded_at),
        PageId::Matchups => (state.matchups.state, state.matchups.loaded_at),
        PageId::Draft => (state.draft.state, state.draft.loaded_at),
        PageId::Rosters => (state.rosters.state, state.rosters.loaded_at),
    }
}

pub fn state_color(state: LoadState) -> Color {
    match state {
        LoadState::Idle => Color::DarkGray,
        LoadState::Loading => Color::Yellow,
        LoadState::Ready => Color::Green,
    }
}

/// Tab indicator spans with the active page highlighted.
/// E.g. "[1:Standings] [2:Matchups] [3:Draft Results] [4:Rosters]"
pub fn tab_spans(active: PageId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for page in PageId::ALL {
        let style = if page == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}:{}]", page.index() + 1, page.title()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{render_to_lines, screen_contains};

    #[test]
    fn tab_spans_highlight_active() {
        let spans = tab_spans(PageId::Draft);
        // Four tabs, each followed by a spacer.
        assert_eq!(spans.len(), 8);
        assert_eq!(spans[4].content, "[3:Draft Results]");
        assert_eq!(spans[4].style.bg, Some(Color::White));
        assert_eq!(spans[0].style.bg, None);
    }

    #[test]
    fn state_colors() {
        assert_eq!(state_color(LoadState::Loading), Color::Yellow);
        assert_eq!(state_color(LoadState::Ready), Color::Green);
    }

    #[test]
    fn shows_loading_for_active_page() {
        let mut state = ViewState::default();
        state.league_name = "Dynasty".into();
        state.active = PageId::Matchups;
        state.matchups.state = LoadState::Loading;

        let lines = render_to_lines(&state, 120, 10);
        assert!(lines[0].contains("Dynasty"));
        assert!(lines[0].contains("[2:Matchups]"));
        assert!(lines[0].contains("Loading..."));
        assert!(screen_contains(&lines, "[4:Rosters]"));
    }
}
