// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// loop, or into local ViewState mutations (scrolling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gridline_app::protocol::{PageId, UserCommand};

use crate::ViewState;

/// Lines moved by PageUp / PageDown.
const PAGE_SCROLL: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should go to the app loop,
/// `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        // Page switching
        KeyCode::Char('1') => Some(UserCommand::SwitchPage(PageId::Standings)),
        KeyCode::Char('2') => Some(UserCommand::SwitchPage(PageId::Matchups)),
        KeyCode::Char('3') => Some(UserCommand::SwitchPage(PageId::Draft)),
        KeyCode::Char('4') => Some(UserCommand::SwitchPage(PageId::Rosters)),

        // Page selector (week, draft, team); new content starts at the top
        KeyCode::Left | KeyCode::Char('h') => {
            reset_scroll(view_state);
            Some(UserCommand::SelectPrevious)
        }
        KeyCode::Right | KeyCode::Char('l') => {
            reset_scroll(view_state);
            Some(UserCommand::SelectNext)
        }

        // Scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SCROLL);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SCROLL);
            None
        }

        KeyCode::Char('r') => {
            reset_scroll(view_state);
            Some(UserCommand::Refresh)
        }
        KeyCode::Char('q') => Some(UserCommand::Quit),

        _ => None,
    }
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let offset = view_state.scroll_offset.entry(view_state.active).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

// Widgets clamp the offset to their content length when rendering.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let offset = view_state.scroll_offset.entry(view_state.active).or_insert(0);
    *offset = offset.saturating_add(lines);
}

fn reset_scroll(view_state: &mut ViewState) {
    view_state.scroll_offset.remove(&view_state.active);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
