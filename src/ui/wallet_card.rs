//! A single wallet card: gradient face, name, balance, masked number.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::core::{format, wallet::Wallet};

use super::theme::{mix, rgb, Theme};

const TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);
const TEXT_SOFT: Color = Color::Rgb(0xdd, 0xdd, 0xdd);

pub struct WalletCard<'a> {
    pub wallet: &'a Wallet,
    /// Show the "Tap for details" hint along the bottom edge.
    pub show_hint: bool,
}

impl<'a> WalletCard<'a> {
    pub fn new(wallet: &'a Wallet) -> Self {
        Self {
            wallet,
            show_hint: false,
        }
    }

    pub fn hint(mut self, show: bool) -> Self {
        self.show_hint = show;
        self
    }
}

impl<'a> Widget for WalletCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }

        // Diagonal gradient, top-left to bottom-right.
        let start = self.wallet.rgb();
        let end = self.wallet.rgb_end();
        let span = f64::from(area.width + area.height).max(1.0);
        for dy in 0..area.height {
            for dx in 0..area.width {
                let t = f64::from(dx + dy) / span;
                if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                    cell.set_symbol(" ");
                    cell.set_bg(rgb(mix(start, end, t)));
                }
            }
        }

        let left = area.x + 2;
        let width = area.width.saturating_sub(4);
        let line = |buf: &mut Buffer, row: u16, text: &str, style: Style| {
            if row < area.y + area.height {
                buf.set_stringn(left, row, text, width as usize, style);
            }
        };

        let bold = Style::default().fg(TEXT).add_modifier(Modifier::BOLD);
        let soft = Style::default().fg(TEXT_SOFT);

        line(
            buf,
            area.y + 1,
            &format!("{}  {}", self.wallet.kind.icon(), self.wallet.name),
            bold,
        );
        line(buf, area.y + 2, &format!("    {}", self.wallet.kind.label()), soft);

        // Chip in the top-right corner.
        if area.width >= 12 {
            let chip = Style::default().fg(Theme::chip_color());
            buf.set_string(area.x + area.width - 6, area.y + 1, "▄▄▄", chip);
            buf.set_string(area.x + area.width - 6, area.y + 2, "▀▀▀", chip);
        }

        let bottom = area.y + area.height;
        if area.height >= 8 {
            line(buf, bottom - 5, "Available Balance", soft);
            line(
                buf,
                bottom - 4,
                &format::format_balance(self.wallet.balance, &self.wallet.currency),
                bold,
            );
        }
        if area.height >= 4 {
            line(
                buf,
                bottom - 2,
                &format::masked_card_number(self.wallet.card_number.as_deref()),
                soft,
            );
        }

        if self.show_hint && area.height >= 6 {
            let hint = "Tap for details";
            let w = hint.len() as u16;
            if area.width > w + 22 {
                buf.set_string(area.x + area.width - w - 2, bottom - 2, hint, soft);
            }
        }
    }
}
