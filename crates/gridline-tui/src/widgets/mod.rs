// TUI widget modules, one per page plus the chrome around them.

pub mod draft_board;
pub mod matchups;
pub mod rosters;
pub mod standings;
pub mod status_bar;

use chrono::{DateTime, Local};
use gridline_app::page::LoadState;
use gridline_core::position::Position;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Badge color for a fantasy position label. Multi-position labels
/// ("RB, WR") use their first position.
pub fn position_color(label: &str) -> Color {
    let primary = label.split(',').next().unwrap_or_default();
    match Position::from_str_pos(primary) {
        Some(Position::Quarterback) => Color::Rgb(0xff, 0x2a, 0x6d),
        Some(Position::RunningBack) => Color::Rgb(0x00, 0xce, 0xb8),
        Some(Position::WideReceiver) => Color::Rgb(0x58, 0xa7, 0xff),
        Some(Position::TightEnd) => Color::Rgb(0xff, 0xae, 0x58),
        Some(Position::Kicker) => Color::Rgb(0xbd, 0x66, 0xff),
        Some(Position::Defense) => Color::Rgb(0x79, 0x88, 0xa1),
        None => Color::Gray,
    }
}

/// Two-decimal point total.
pub fn format_points(points: f64) -> String {
    format!("{points:.2}")
}

/// Status text for a page: what it is doing, or when it last finished.
pub fn load_label(state: LoadState, loaded_at: Option<DateTime<Local>>) -> String {
    match (state, loaded_at) {
        (LoadState::Loading, _) => "Loading...".to_string(),
        (LoadState::Ready, Some(at)) => format!("Updated {}", at.format("%H:%M:%S")),
        (LoadState::Ready, None) => "Ready".to_string(),
        (LoadState::Idle, _) => String::new(),
    }
}

/// Render a bordered placeholder message, or "Loading..." while the page is
/// still fetching.
pub fn render_placeholder(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    state: LoadState,
) {
    let text = if state == LoadState::Loading {
        "  Loading..."
    } else {
        message
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
