//! Centralized theme module for TUI color constants and styles

use crate::scoring::RiskBand;
use ratatui::prelude::*;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score cell backgrounds (traffic light pattern)
    pub band_high_bg: Color,
    pub band_medium_bg: Color,
    pub band_low_bg: Color,
    pub band_fg: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub prompt_color: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            band_high_bg: Color::Rgb(0xFF, 0xC7, 0xCE),
            band_medium_bg: Color::Rgb(0xFF, 0xEB, 0x9C),
            band_low_bg: Color::Rgb(0xC6, 0xEF, 0xCE),
            band_fg: Color::Black,
            row_alt_bg: Color::Indexed(235),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            prompt_color: Color::Yellow,
            tab_active_style: Style::new().fg(Color::Cyan).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    /// Cell style for a score in `band`. `None` leaves the cell unstyled.
    pub fn band_style(&self, band: RiskBand) -> Style {
        let bg = match band {
            RiskBand::High => self.band_high_bg,
            RiskBand::Medium => self.band_medium_bg,
            RiskBand::Low => self.band_low_bg,
            RiskBand::None => return Style::default(),
        };
        Style::default().bg(bg).fg(self.band_fg)
    }
}
