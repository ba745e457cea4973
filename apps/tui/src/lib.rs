// Library surface shared by the binary and its tests
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod format;
pub mod logging;

pub use dashboard::{render, DashboardView, RenderContext};
pub use domain::{FilterSelection, Region, YearFilter};
