//! Welcome screen: brand heading and the sign-in / sign-up buttons.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::layout::{centered_fixed, WelcomeLayout};
use super::theme::Theme;

pub const SIGN_IN: &str = "Sign in";
pub const SIGN_UP: &str = "Sign up";

pub struct WelcomeScreen<'a> {
    pub sign_in_focused: bool,
    pub status: &'a str,
}

impl<'a> Widget for WelcomeScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = WelcomeLayout::from_area(area);

        let brand = centered_fixed(36, 5, layout.brand_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let heading = Line::from(vec![
            Span::styled("MILLIONS", Theme::brand_style()),
            Span::styled("CLUB", Theme::club_style()),
        ]);
        Paragraph::new(vec![Line::raw(""), heading])
            .alignment(Alignment::Center)
            .block(block)
            .render(brand, buf);

        button(SIGN_IN, self.sign_in_focused, layout.sign_in, buf);
        button(SIGN_UP, !self.sign_in_focused, layout.sign_up, buf);

        Paragraph::new(self.status)
            .style(Theme::status_bar_style())
            .render(layout.status_area, buf);
    }
}

fn button(title: &str, focused: bool, area: Rect, buf: &mut Buffer) {
    let style = Theme::button_style(focused);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style);
    Paragraph::new(title)
        .style(style)
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(c) = buf.cell((x, y)) {
                    out.push_str(c.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn shows_heading_and_both_buttons() {
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        WelcomeScreen {
            sign_in_focused: true,
            status: "hint",
        }
        .render(area, &mut buf);

        let text = screen_text(&buf);
        assert!(text.contains("MILLIONSCLUB"));
        assert!(text.contains(SIGN_IN));
        assert!(text.contains(SIGN_UP));
    }

    #[test]
    fn focused_button_is_highlighted() {
        let area = Rect::new(0, 0, 60, 24);
        let layout = WelcomeLayout::from_area(area);
        let mut buf = Buffer::empty(area);
        WelcomeScreen {
            sign_in_focused: false,
            status: "",
        }
        .render(area, &mut buf);

        let inside = |r: Rect| buf.cell((r.x + 2, r.y + 1)).map(|c| c.bg);
        assert_eq!(inside(layout.sign_up), Theme::button_style(true).bg);
        assert_eq!(inside(layout.sign_in), Theme::button_style(false).bg);
    }
}
