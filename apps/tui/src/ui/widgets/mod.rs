pub mod charts;
pub mod metrics;
pub mod popup;
pub mod tables;
