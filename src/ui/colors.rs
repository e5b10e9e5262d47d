//! Color theme definitions for the UI.
//!
//! Neon palette for the portfolio look. All colors live here.

use ratatui::style::Color;

/// Primary accent color (focused fields, titles)
pub const PRIMARY: Color = Color::Rgb(0, 240, 255); // Neon cyan
/// Secondary accent color (values, confirmations)
pub const SECONDARY: Color = Color::Rgb(57, 255, 20); // Neon green
/// Muted text color (placeholders, hints)
pub const MUTED: Color = Color::Rgb(148, 163, 184);
/// Dim decoration color
pub const DIM: Color = Color::Rgb(55, 65, 81);
/// Error/danger color
pub const ERROR: Color = Color::Rgb(255, 56, 100); // Hot red
/// Warning color
pub const WARNING: Color = Color::Rgb(255, 214, 10); // Amber
/// Success color
pub const SUCCESS: Color = Color::Rgb(74, 222, 128);
/// Border color for unfocused fields
pub const BORDER: Color = Color::Rgb(129, 140, 248);
/// Key highlight color (for keyboard shortcuts)
pub const KEY: Color = Color::Rgb(255, 0, 170); // Magenta
/// Accent color for icons and decorations
pub const ACCENT: Color = Color::Rgb(192, 132, 252);

/// Glow rules under the header, innermost first.
pub const GLOW: [Color; 3] = [
    Color::Rgb(255, 0, 170),
    Color::Rgb(150, 0, 110),
    Color::Rgb(70, 0, 55),
];

/// Particle tints for the header band.
pub const PARTICLES: [Color; 4] = [PRIMARY, KEY, ACCENT, SECONDARY];

/// Logo row colors when drawn with depth, light to dark.
pub const LOGO_DEPTH: [Color; 3] = [
    Color::Rgb(0, 240, 255),
    Color::Rgb(0, 170, 200),
    Color::Rgb(0, 100, 140),
];
