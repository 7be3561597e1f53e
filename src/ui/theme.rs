//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::app::LinkStatus;
use crate::settings::ThemeChoice;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Fill color for a ring with a non-zero value.
    pub ring: Color,
    /// Color for a ring showing zero.
    pub ring_empty: Color,
    /// Color for a stale link.
    pub warning: Color,
    /// Color for a dropped link.
    pub critical: Color,
    /// Color for a live link.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section titles and counter values.
    pub header: Style,
    /// Style for the newest event log entry.
    pub newest: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            ring: Color::Rgb(0x00, 0xE5, 0xA8),
            ring_empty: Color::DarkGray,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            newest: Style::default().add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            ring: Color::Rgb(0x00, 0x9E, 0x74),
            ring_empty: Color::Gray,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            newest: Style::default().add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Get style for a link status
    pub fn link_style(&self, status: LinkStatus) -> Style {
        match status {
            LinkStatus::Waiting => Style::default().add_modifier(Modifier::DIM),
            LinkStatus::Live => Style::default().fg(self.healthy),
            LinkStatus::Stale => Style::default().fg(self.warning),
            LinkStatus::Disconnected => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }

    /// Color for a ring holding `value`.
    pub fn ring_color(&self, value: u64) -> Color {
        if value > 0 {
            self.ring
        } else {
            self.ring_empty
        }
    }
}
