//! Theme configuration

use iced::Color;

use crate::panel::notice::NoticeLevel;
use crate::panel::speed::Trend;

/// Dark theme colors
pub struct DarkTheme;

impl DarkTheme {
    pub const BACKGROUND: Color = Color::from_rgb(0.09, 0.09, 0.11);
    pub const SURFACE: Color = Color::from_rgb(0.12, 0.12, 0.14);
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);
    pub const PRIMARY: Color = Color::from_rgb(0.4, 0.55, 1.0);
    pub const TEXT: Color = Color::from_rgb(0.95, 0.95, 0.95);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.55, 0.55, 0.6);
    pub const SUCCESS: Color = Color::from_rgb(0.35, 0.8, 0.5);
    pub const WARNING: Color = Color::from_rgb(0.95, 0.7, 0.3);
    pub const DANGER: Color = Color::from_rgb(0.95, 0.4, 0.4);
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => DarkTheme::PRIMARY,
        NoticeLevel::Success => DarkTheme::SUCCESS,
        NoticeLevel::Warning => DarkTheme::WARNING,
        NoticeLevel::Error => DarkTheme::DANGER,
    }
}

pub fn trend_color(trend: Option<Trend>) -> Color {
    match trend {
        Some(Trend::Improved) => DarkTheme::SUCCESS,
        Some(Trend::Degraded) => DarkTheme::DANGER,
        Some(Trend::Unchanged) | None => DarkTheme::TEXT_MUTED,
    }
}
