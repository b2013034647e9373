use ratatui::style::Color;

pub const THEME_BG: Color = Color::Rgb(18, 18, 24); // Dark slate
pub const THEME_FG: Color = Color::Rgb(225, 225, 240); // Soft white
pub const THEME_ACCENT: Color = Color::Rgb(129, 140, 248); // Indigo
pub const THEME_HIGHLIGHT: Color = Color::Rgb(99, 102, 241); // Deep indigo
pub const THEME_ERROR: Color = Color::Rgb(239, 68, 68); // Red
pub const THEME_BORDER: Color = Color::Rgb(75, 75, 110); // Muted blue-purple
