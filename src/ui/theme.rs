//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// App background; faded cards blend toward this.
pub const BACKGROUND: (u8, u8, u8) = (0x0d, 0x0d, 0x0d);
const ACCENT: Color = Color::Rgb(0x66, 0x7e, 0xea);
const INCOME: Color = Color::Rgb(0x4a, 0xde, 0x80);
const EXPENSE: Color = Color::Rgb(0xff, 0x6b, 0x6b);
const MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
const GOLD: Color = Color::Rgb(0xd9, 0xb7, 0x00);
const CLUB_RED: Color = Color::Rgb(0xff, 0x00, 0x00);

/// Central theme; every screen takes its colours from here.
pub struct Theme;

impl Theme {
    // ── chrome ─────────────────────────────────────────────────
    pub fn background() -> Style {
        Style::default().bg(rgb(BACKGROUND))
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(MUTED)
    }

    pub fn accent_style() -> Style {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Color::Rgb(0x33, 0x33, 0x33))
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    // ── money ──────────────────────────────────────────────────
    pub fn amount_style(amount: f64) -> Style {
        let fg = if amount >= 0.0 { INCOME } else { EXPENSE };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn income_style() -> Style {
        Style::default().fg(INCOME).add_modifier(Modifier::BOLD)
    }

    pub fn expense_style() -> Style {
        Style::default().fg(EXPENSE).add_modifier(Modifier::BOLD)
    }

    // ── welcome ────────────────────────────────────────────────
    pub fn brand_style() -> Style {
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
    }

    pub fn club_style() -> Style {
        Style::default().fg(CLUB_RED)
    }

    pub fn button_style(focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(Color::Rgb(0x26, 0x26, 0x26))
        }
    }

    pub fn chip_color() -> Color {
        GOLD
    }
}

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Linear mix of two RGB triples; `t = 0` is `from`, `t = 1` is `to`.
pub fn mix(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    (lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Fake alpha on a terminal: blend `color` toward the background.
pub fn fade(color: Color, opacity: f64) -> Color {
    let base = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::White => (0xff, 0xff, 0xff),
        Color::Black | Color::Reset => return color,
        other => return if opacity < 0.5 { rgb(BACKGROUND) } else { other },
    };
    rgb(mix(BACKGROUND, base, opacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_endpoints() {
        assert_eq!(mix((0, 0, 0), (200, 100, 50), 0.0), (0, 0, 0));
        assert_eq!(mix((0, 0, 0), (200, 100, 50), 1.0), (200, 100, 50));
        assert_eq!(mix((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
    }

    #[test]
    fn fade_blends_toward_background() {
        assert_eq!(fade(Color::Rgb(255, 255, 255), 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(fade(Color::White, 0.0), rgb(BACKGROUND));
    }
}
