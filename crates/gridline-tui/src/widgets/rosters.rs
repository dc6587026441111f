// Rosters widget: team list on the left, the selected team's roster on the
// right.

use gridline_core::join::PlayerView;
use gridline_core::view::TeamView;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Row, Table};
use ratatui::Frame;

use super::{position_color, render_placeholder};
use crate::layout::split_columns;
use crate::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let page = &state.rosters;
    if page.teams.is_empty() {
        render_placeholder(frame, area, "Rosters", "  No teams in this league", page.state);
        return;
    }

    let (left, right) = split_columns(area, 30);

    let items: Vec<ListItem> = page
        .teams
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let style = if Some(i) == page.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(format!(" {}", team.team_name), style)))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("Teams")),
        left,
    );

    let Some(team) = page.team.as_ref() else {
        render_placeholder(frame, right, "Roster", "  No team selected", page.state);
        return;
    };

    let title = team_title(team);
    if page.players.is_empty() {
        render_placeholder(frame, right, &title, "  No players on this roster", page.state);
        return;
    }

    let header = Row::new(vec!["Pos", "Player", "NFL"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let skip = state.scroll().min(page.players.len().saturating_sub(1));
    let rows: Vec<Row> = page.players.iter().skip(skip).map(player_row).collect();
    let widths = [
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, right);
}

/// "Team Name (owner) 6-4".
pub fn team_title(team: &TeamView) -> String {
    let record = format!("{}-{}", team.wins, team.losses);
    if team.team_name == team.display_name {
        format!("{} {}", team.team_name, record)
    } else {
        format!("{} ({}) {}", team.team_name, team.display_name, record)
    }
}

fn player_row(player: &PlayerView) -> Row<'static> {
    Row::new(vec![
        Cell::from(Span::styled(
            player.fantasy_position.clone(),
            Style::default()
                .fg(position_color(&player.fantasy_position))
                .add_modifier(Modifier::BOLD),
        )),
        Cell::from(player.name.clone()),
        Cell::from(player.team.clone()),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{render_to_lines, screen_contains};
    use gridline_app::page::rosters::TeamOption;
    use gridline_app::page::LoadState;
    use gridline_app::protocol::PageId;

    fn team(players: Vec<PlayerView>) -> TeamView {
        TeamView {
            team_id: 1,
            owner_id: Some("u1".into()),
            team_name: "Aces".into(),
            display_name: "alice".into(),
            avatar: None,
            wins: 6,
            losses: 4,
            players,
        }
    }

    fn player(position: &str, name: &str) -> PlayerView {
        PlayerView {
            player_id: name.into(),
            name: name.into(),
            team: "KC".into(),
            fantasy_position: position.into(),
        }
    }

    fn state_with(team: TeamView) -> ViewState {
        let mut state = ViewState::default();
        state.active = PageId::Rosters;
        state.rosters.state = LoadState::Ready;
        state.rosters.teams = vec![
            TeamOption {
                team_id: 1,
                team_name: "Aces".into(),
            },
            TeamOption {
                team_id: 2,
                team_name: "Bombers".into(),
            },
        ];
        state.rosters.selected = Some(0);
        state.rosters.players = team.players.clone();
        state.rosters.team = Some(team);
        state
    }

    #[test]
    fn titles() {
        assert_eq!(team_title(&team(vec![])), "Aces (alice) 6-4");
        let mut same = team(vec![]);
        same.team_name = "alice".into();
        assert_eq!(team_title(&same), "alice 6-4");
    }

    #[test]
    fn renders_team_list_and_roster() {
        let state = state_with(team(vec![
            player("QB", "Patrick Mahomes"),
            player("DEF", "Kansas City Chiefs"),
        ]));
        let lines = render_to_lines(&state, 120, 20);
        assert!(screen_contains(&lines, "Bombers"));
        assert!(screen_contains(&lines, "Aces (alice) 6-4"));
        assert!(screen_contains(&lines, "Patrick Mahomes"));
        assert!(screen_contains(&lines, "DEF"));
    }

    #[test]
    fn placeholder_for_empty_roster() {
        let state = state_with(team(vec![]));
        let lines = render_to_lines(&state, 120, 20);
        assert!(screen_contains(&lines, "No players on this roster"));
    }

    #[test]
    fn placeholder_without_teams() {
        let mut state = ViewState::default();
        state.active = PageId::Rosters;
        state.rosters.state = LoadState::Ready;
        let lines = render_to_lines(&state, 80, 10);
        assert!(screen_contains(&lines, "No teams in this league"));
    }
}
