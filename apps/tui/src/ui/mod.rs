// UI module for the sales dashboard
// Handles all rendering

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::dashboard::render_dashboard(app, f);

    if app.show_help {
        screens::help::render_help_popup(f);
    }
}
