// Matchups widget: week selector and one card per head-to-head pairing.
//
// Each card is a score line followed by the two starting lineups side by
// side. Cards are stacked into one scrollable paragraph.

use gridline_core::join::StarterView;
use gridline_core::view::{MatchupCard, MatchupSide};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::{format_points, position_color, render_placeholder};
use crate::layout::split_selector;
use crate::ViewState;

/// Width of each lineup column inside a card.
const LINEUP_COLUMN: usize = 34;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let page = &state.matchups;
    let (selector, content) = split_selector(area);

    let selector_line = Line::from(vec![
        Span::styled(" Week ", Style::default().fg(Color::Gray)),
        Span::styled(
            week_selector_label(page.week, page.max_week),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(selector_line).block(Block::default().borders(Borders::ALL).title("Week")),
        selector,
    );

    let title = format!("Week {} Matchups", page.week);
    if page.cards.is_empty() {
        render_placeholder(
            frame,
            content,
            &title,
            "  No matchups available for this week",
            page.state,
        );
        return;
    }

    let lines: Vec<Line> = page.cards.iter().flat_map(card_lines).collect();
    let scroll = state.scroll().min(lines.len().saturating_sub(1));
    let paragraph = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, content);
}

/// "< 3 / 5 >", with arrows only where the selector can move.
pub fn week_selector_label(week: u32, max_week: u32) -> String {
    let left = if week > 1 { "<" } else { " " };
    let right = if week < max_week { ">" } else { " " };
    format!("{left} {week} / {max_week} {right}")
}

/// Score for display; the missing side of a one-sided matchup shows a dash.
pub fn format_score(score: Option<f64>) -> String {
    score.map(format_points).unwrap_or_else(|| "-".to_string())
}

fn card_lines(card: &MatchupCard) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" Matchup {}", card.matchup_id),
            Style::default().fg(Color::Gray),
        )),
        score_line(&card.team1, &card.team2),
    ];

    let depth = card.team1.starters.len().max(card.team2.starters.len());
    for i in 0..depth {
        let mut spans = vec![Span::raw("   ")];
        spans.extend(starter_spans(card.team1.starters.get(i)));
        spans.extend(starter_spans(card.team2.starters.get(i)));
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines
}

fn score_line(team1: &MatchupSide, team2: &MatchupSide) -> Line<'static> {
    let bold = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let (style1, style2) = match (team1.score, team2.score) {
        (Some(a), Some(b)) if a > b => (bold.fg(Color::Green), bold),
        (Some(a), Some(b)) if b > a => (bold, bold.fg(Color::Green)),
        _ => (bold, bold),
    };
    Line::from(vec![
        Span::raw("   "),
        Span::styled(
            pad(&format!("{} {}", team1.team_name, format_score(team1.score)), LINEUP_COLUMN),
            style1,
        ),
        Span::styled(
            format!("{} {}", team2.team_name, format_score(team2.score)),
            style2,
        ),
    ])
}

fn starter_spans(starter: Option<&StarterView>) -> Vec<Span<'static>> {
    match starter {
        Some(s) => vec![
            Span::styled(
                format!("{:<4}", s.position),
                Style::default()
                    .fg(position_color(&s.position))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(pad(&s.name, LINEUP_COLUMN - 4)),
        ],
        None => vec![Span::raw(" ".repeat(LINEUP_COLUMN))],
    }
}

/// Left-align `text` in `width` columns, truncating if needed.
fn pad(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{truncated:<width$}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
