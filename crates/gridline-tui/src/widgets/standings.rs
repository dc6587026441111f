// Standings widget: one table per division beside the overall table.

use gridline_core::view::{DivisionStandings, Standing};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::{format_points, render_placeholder};
use crate::layout::split_columns;
use crate::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let page = &state.standings;
    if page.standings.overall.is_empty() {
        render_placeholder(frame, area, "Standings", "  No standings available", page.state);
        return;
    }

    let (left, right) = split_columns(area, 50);

    let divisions = &page.standings.divisions;
    let constraints = vec![Constraint::Ratio(1, divisions.len() as u32); divisions.len()];
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(left);
    for (group, slot) in divisions.iter().zip(slots.iter()) {
        render_division(frame, *slot, group);
    }

    render_table(
        frame,
        right,
        "Overall Standings".to_string(),
        &page.standings.overall,
        state.scroll(),
    );
}

pub fn division_title(division: Option<u32>) -> String {
    match division {
        Some(d) => format!("Division {d}"),
        None => "No Division".to_string(),
    }
}

fn render_division(frame: &mut Frame, area: Rect, group: &DivisionStandings) {
    render_table(frame, area, division_title(group.division), &group.teams, 0);
}

fn render_table(frame: &mut Frame, area: Rect, title: String, teams: &[Standing], skip: usize) {
    let header = Row::new(vec!["Team", "W", "L", "PF"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let skip = skip.min(teams.len().saturating_sub(1));
    let rows: Vec<Row> = teams
        .iter()
        .skip(skip)
        .map(|team| {
            Row::new(vec![
                Cell::from(team.team_name.clone()),
                Cell::from(team.wins.to_string()),
                Cell::from(team.losses.to_string()),
                Cell::from(format_points(team.points)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
