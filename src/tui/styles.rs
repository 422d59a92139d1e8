//! Color palette and preset styles for the terminal UI.
//!
//! Neutral slate surfaces, a teal accent for focus, and two semantic
//! colors for the risk classes (rose for alarm, emerald for calm).

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskClass;

/// Clinic theme color palette.
pub struct ClinicTheme;

impl ClinicTheme {
    /// Teal accent
    pub const ACCENT: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Lighter teal for focus markers
    pub const ACCENT_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    /// Slate for borders
    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Emerald - low risk, accuracy badge
    pub const CALM: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Rose - stroke risk, failures
    pub const ALARM: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Amber - in-flight requests
    pub const PENDING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Blue - model badge
    pub const BADGE: Color = Color::Rgb(59, 130, 246); // #3B82F6

    /// Near-black surface
    pub const SURFACE: Color = Color::Rgb(15, 23, 42); // #0F172A

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn calm() -> Style {
        Style::default().fg(Self::CALM)
    }

    #[must_use]
    pub fn alarm() -> Style {
        Style::default().fg(Self::ALARM)
    }

    #[must_use]
    pub fn pending() -> Style {
        Style::default().fg(Self::PENDING)
    }

    /// Pill-shaped badge, e.g. model name or accuracy.
    #[must_use]
    pub fn badge(color: Color) -> Style {
        Style::default()
            .fg(Self::SURFACE)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlighted list row
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::SURFACE)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::ACCENT_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Read-only field value
    #[must_use]
    pub fn disabled() -> Style {
        Style::default()
            .fg(Self::TEXT_MUTED)
            .add_modifier(Modifier::ITALIC)
    }

    /// Submit control; dimmed while a request is in flight.
    #[must_use]
    pub fn button(enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(Self::SURFACE)
                .bg(Self::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Self::TEXT_MUTED)
                .add_modifier(Modifier::DIM)
        }
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Alarm styling for stroke risk, calm styling otherwise.
    #[must_use]
    pub fn risk_class(class: RiskClass) -> Style {
        match class {
            RiskClass::StrokeRisk => Self::alarm(),
            RiskClass::LowRisk => Self::calm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_class_colors() {
        assert_eq!(ClinicTheme::risk_class(RiskClass::StrokeRisk), ClinicTheme::alarm());
        assert_eq!(ClinicTheme::risk_class(RiskClass::LowRisk), ClinicTheme::calm());
        assert_ne!(ClinicTheme::ALARM, ClinicTheme::CALM);
    }
}
