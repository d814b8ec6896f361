use ratatui::style::Color;

use crate::engine::classify::SpeedTier;

/// Accent for the running download.
pub const DOWNLOAD_COLOR: Color = Color::Rgb(245, 135, 0);

/// Red for failed runs.
pub const ERROR_COLOR: Color = Color::Rgb(230, 90, 90);

/// Muted text.
pub const DIM_TEXT: Color = Color::DarkGray;

/// Bright white for hero numbers.
pub const BRIGHT_TEXT: Color = Color::White;

/// Border color.
pub const BORDER_COLOR: Color = Color::Rgb(80, 80, 80);

/// Header accent.
pub const HEADER_COLOR: Color = Color::Rgb(245, 135, 0);

pub fn tier_color(tier: SpeedTier) -> Color {
    match tier {
        SpeedTier::Excellent => Color::Rgb(130, 220, 130),
        SpeedTier::Good => Color::Rgb(100, 180, 255),
        SpeedTier::Moderate => Color::Rgb(240, 200, 80),
        SpeedTier::Slow => ERROR_COLOR,
    }
}
