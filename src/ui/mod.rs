//! Widgets and colors for the settings window

pub mod section;
pub mod theme;
