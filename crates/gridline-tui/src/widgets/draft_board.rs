// Draft board widget: draft selector and the round-by-slot pick grid.

use gridline_core::join::NOT_AVAILABLE;
use gridline_core::view::{DraftCell, DraftOption, DRAFT_SLOTS};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::render_placeholder;
use crate::layout::split_selector;
use crate::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let page = &state.draft;
    let (selector, content) = split_selector(area);

    frame.render_widget(
        Paragraph::new(Line::from(option_spans(&page.options, page.selected)))
            .block(Block::default().borders(Borders::ALL).title("Draft")),
        selector,
    );

    if page.options.is_empty() {
        render_placeholder(
            frame,
            content,
            "Draft Results",
            "  No drafts found for this league",
            page.state,
        );
        return;
    }
    if page.grid.rounds.is_empty() {
        render_placeholder(
            frame,
            content,
            "Draft Results",
            "  No picks in this draft",
            page.state,
        );
        return;
    }

    let mut header_cells = vec![Cell::from("Rnd")];
    header_cells.extend((1..=DRAFT_SLOTS).map(|slot| Cell::from(format!("Slot {slot}"))));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let skip = state.scroll().min(page.grid.rounds.len().saturating_sub(1));
    let rows: Vec<Row> = page
        .grid
        .rounds
        .iter()
        .zip(page.grid.cells.iter())
        .skip(skip)
        .map(|(round, cells)| {
            let mut row = vec![Cell::from(round.to_string())];
            row.extend(cells.iter().map(pick_cell));
            Row::new(row).height(2)
        })
        .collect();

    let mut widths = vec![Constraint::Length(4)];
    widths.extend((0..DRAFT_SLOTS).map(|_| Constraint::Ratio(1, DRAFT_SLOTS)));

    let title = page
        .selected
        .and_then(|i| page.options.get(i))
        .map(|o| o.name.clone())
        .unwrap_or_else(|| "Draft Results".to_string());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, content);
}

/// Draft names with the selected one highlighted.
pub fn option_spans(options: &[DraftOption], selected: Option<usize>) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for (i, option) in options.iter().enumerate() {
        let style = if Some(i) == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", option.name), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Two-line cell: player, then drafter. Slots without a pick are dimmed.
fn pick_cell(cell: &DraftCell) -> Cell<'static> {
    if !cell.occupied {
        return Cell::from(Line::from(Span::styled(
            NOT_AVAILABLE,
            Style::default().fg(Color::DarkGray),
        )));
    }
    Cell::from(vec![
        Line::from(Span::styled(
            cell.player.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            cell.picked_by.clone(),
            Style::default().fg(Color::Gray),
        )),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{render_to_lines, screen_contains};
    use gridline_app::page::LoadState;
    use gridline_app::protocol::PageId;
    use gridline_core::view::DraftGrid;

    fn options() -> Vec<DraftOption> {
        vec![
            DraftOption {
                draft_id: "d1".into(),
                name: "2024 Draft".into(),
            },
            DraftOption {
                draft_id: "d0".into(),
                name: "Startup Draft".into(),
            },
        ]
    }

    fn empty_cell() -> DraftCell {
        DraftCell {
            player: NOT_AVAILABLE.into(),
            picked_by: "Unknown User".into(),
            occupied: false,
        }
    }

    #[test]
    fn selected_option_is_highlighted() {
        let spans = option_spans(&options(), Some(1));
        let selected: Vec<&Span> = spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::White))
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].content, " Startup Draft ");
    }

    #[test]
    fn renders_grid_with_pick() {
        let mut row = vec![empty_cell(); DRAFT_SLOTS as usize];
        row[2] = DraftCell {
            player: "Mahomes".into(),
            picked_by: "alice".into(),
            occupied: true,
        };
        row[5] = DraftCell {
            player: NOT_AVAILABLE.into(),
            picked_by: "bob".into(),
            occupied: true,
        };

        let mut state = ViewState::default();
        state.active = PageId::Draft;
        state.draft.state = LoadState::Ready;
        state.draft.options = options();
        state.draft.selected = Some(0);
        state.draft.grid = DraftGrid {
            rounds: vec![1],
            cells: vec![row],
        };

        let lines = render_to_lines(&state, 200, 20);
        assert!(screen_contains(&lines, "Slot 10"));
        assert!(screen_contains(&lines, "Mahomes"));
        assert!(screen_contains(&lines, "alice"));
        // A pick whose player is not in the catalog still names its drafter.
        assert!(screen_contains(&lines, "bob"));
        assert!(screen_contains(&lines, "2024 Draft"));
    }

    #[test]
    fn placeholders() {
        let mut state = ViewState::default();
        state.active = PageId::Draft;
        state.draft.state = LoadState::Ready;
        let lines = render_to_lines(&state, 100, 15);
        assert!(screen_contains(&lines, "No drafts found for this league"));

        state.draft.options = options();
        state.draft.selected = Some(0);
        let lines = render_to_lines(&state, 100, 15);
        assert!(screen_contains(&lines, "No picks in this draft"));
    }
}
