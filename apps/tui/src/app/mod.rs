// App module for the sales dashboard
// Handles application state and input

pub mod actions;
pub mod input;
pub mod state;

pub use actions::AppActions;
pub use input::handle_input;
pub use state::{App, SidebarField, Tab};
