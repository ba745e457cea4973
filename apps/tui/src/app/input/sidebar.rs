use crate::app::state::{App, SidebarField};
use crossterm::event::KeyCode;

pub fn handle_sidebar_input(app: &mut App, key: KeyCode) {
    let forward = match key {
        KeyCode::Right => Some(true),
        KeyCode::Left => Some(false),
        _ => None,
    };
    let toggle = matches!(key, KeyCode::Char(' ') | KeyCode::Enter);

    match app.focus {
        SidebarField::Region => {
            if let Some(forward) = forward {
                app.cycle_region(forward);
            }
        }
        SidebarField::AllYears => {
            if toggle || forward.is_some() {
                app.toggle_all_years();
            }
        }
        SidebarField::Year => {
            if let Some(forward) = forward {
                app.step_year(forward);
            }
        }
        SidebarField::Salespeople => {
            if let Some(forward) = forward {
                app.move_salesperson_cursor(forward);
            } else if toggle {
                app.toggle_salesperson_at_cursor();
            }
        }
        SidebarField::TopN => {
            if let Some(forward) = forward {
                app.step_top_n(forward);
            }
        }
    }
}
