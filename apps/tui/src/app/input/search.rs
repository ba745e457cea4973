use crate::app::state::{App, SidebarField};
use crossterm::event::KeyCode;

pub fn start_search(app: &mut App) {
    app.searching = true;
    app.focus = SidebarField::Salespeople;
    app.salesperson_cursor = 0;
}

/// Typing narrows the salesperson list. Enter keeps the query, Esc drops it.
pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.searching = false,
        KeyCode::Esc => {
            app.searching = false;
            app.salesperson_query.clear();
            app.salesperson_cursor = 0;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(ch) => app.push_search_char(ch),
        KeyCode::Down | KeyCode::Right => app.move_salesperson_cursor(true),
        KeyCode::Up | KeyCode::Left => app.move_salesperson_cursor(false),
        _ => {}
    }
}
