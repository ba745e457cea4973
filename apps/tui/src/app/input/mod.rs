pub mod helpers;
mod help;
mod search;
mod sidebar;

use crate::app::state::{App, Tab};
use crossterm::event::KeyCode;

/// Rows moved by one PageUp / PageDown in the raw data table.
pub const TABLE_PAGE: usize = 10;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if app.searching {
        search::handle_search_input(app, key);
        return;
    }

    if handle_global_input(app, key) {
        return;
    }

    sidebar::handle_sidebar_input(app, key);
}

fn handle_global_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Char(ch @ '1'..='3') => {
            let index = ch as usize - '1' as usize;
            if let Some(tab) = Tab::from_index(index) {
                app.select_tab(tab);
            }
        }
        KeyCode::Char('r') => {
            app.status_message = "Refreshing...".to_string();
            app.request_refresh();
        }
        KeyCode::Char('/') => search::start_search(app),
        KeyCode::Char('c') => app.clear_salespeople(),
        KeyCode::PageDown => app.scroll_table(true, TABLE_PAGE),
        KeyCode::PageUp => app.scroll_table(false, TABLE_PAGE),
        KeyCode::Up => app.focus_prev(),
        KeyCode::Down => app.focus_next(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{app_with, sale};
    use crate::app::state::SidebarField;
    use sales_dashboard::{Region, YearFilter};

    #[test]
    fn quit_and_tab_keys() {
        let mut app = app_with(Vec::new(), false);
        handle_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, Tab::Salespeople);
        handle_input(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Revenue);
        handle_input(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Salespeople);

        handle_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn arrows_move_focus_and_adjust_the_focused_control() {
        let mut app = app_with(Vec::new(), false);
        app.refresh_requested = false;

        handle_input(&mut app, KeyCode::Right);
        assert_eq!(app.region, Region::CentroOeste);
        assert!(app.refresh_requested);

        handle_input(&mut app, KeyCode::Down);
        assert_eq!(app.focus, SidebarField::AllYears);
        handle_input(&mut app, KeyCode::Char(' '));
        assert!(!app.all_years);

        handle_input(&mut app, KeyCode::Down);
        handle_input(&mut app, KeyCode::Right);
        assert_eq!(app.year_filter(), YearFilter::Year(2021));

        handle_input(&mut app, KeyCode::Up);
        handle_input(&mut app, KeyCode::Up);
        handle_input(&mut app, KeyCode::Up);
        assert_eq!(app.focus, SidebarField::TopN);
        handle_input(&mut app, KeyCode::Left);
        assert_eq!(app.top_n, 4);
    }

    #[test]
    fn help_popup_swallows_keys_until_closed() {
        let mut app = app_with(Vec::new(), false);
        handle_input(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        handle_input(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[tokio::test]
    async fn search_then_toggle_a_salesperson() {
        let mut app = app_with(
            vec![sale("SP", "Ana", 10.0), sale("BA", "Bruno", 20.0)],
            false,
        );
        app.refresh_view().await.unwrap();

        handle_input(&mut app, KeyCode::Char('/'));
        assert!(app.searching);
        assert_eq!(app.focus, SidebarField::Salespeople);
        for ch in "bru".chars() {
            handle_input(&mut app, KeyCode::Char(ch));
        }
        handle_input(&mut app, KeyCode::Enter);
        assert!(!app.searching);
        assert_eq!(app.visible_salespeople(), ["Bruno"]);

        handle_input(&mut app, KeyCode::Enter);
        assert!(app.salespeople.contains("Bruno"));
        assert!(app.refresh_requested);

        handle_input(&mut app, KeyCode::Char('c'));
        assert!(app.salespeople.is_empty());
    }

    #[test]
    fn refresh_key_schedules_a_render() {
        let mut app = app_with(Vec::new(), false);
        app.refresh_requested = false;
        handle_input(&mut app, KeyCode::Char('r'));
        assert!(app.refresh_requested);
    }
}
