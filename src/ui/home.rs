//! Home screen: wallet counter, the card stack, and recent activity.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::core::card_stack::layout::CardVisualTransform;
use crate::core::card_stack::StackConfig;
use crate::core::format;
use crate::core::transaction::Transaction;
use crate::core::wallet::Wallet;

use super::card_stack::{CardStackWidget, StackGeometry};
use super::layout::{inset, HomeLayout, SEE_ALL};
use super::theme::Theme;

/// Transactions previewed under the stack.
pub const RECENT_LIMIT: usize = 3;

/// Home layout sized for a stack with this configuration.
pub fn home_layout(area: Rect, stack: &StackConfig, points_per_row: f64) -> HomeLayout {
    let rows = StackGeometry::stack_rows(stack.step, stack.top_padding, points_per_row);
    HomeLayout::from_area(area, rows)
}

pub struct HomeScreen<'a> {
    pub wallets: &'a [Wallet],
    pub transforms: &'a [CardVisualTransform],
    pub stack: &'a StackConfig,
    pub points_per_row: f64,
    pub selected: Option<usize>,
    pub recent: &'a [&'a Transaction],
    pub today: NaiveDate,
    pub status: &'a str,
}

impl<'a> Widget for HomeScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = home_layout(area, self.stack, self.points_per_row);

        // ── header ──
        let header = inset(layout.header_area, 2, 0);
        buf.set_stringn(
            header.x,
            header.y,
            "My Wallets",
            header.width as usize,
            Theme::title_style(),
        );
        let counter = match self.selected {
            Some(i) => format!("{}/{}", i + 1, self.wallets.len()),
            None => format!("0/{}", self.wallets.len()),
        };
        right_aligned(buf, header, header.y, &counter, Theme::muted_style());

        CardStackWidget {
            wallets: self.wallets,
            transforms: self.transforms,
            points_per_row: self.points_per_row,
            selected: self.selected,
        }
        .render(layout.stack_area, buf);

        self.render_recent(layout.recent_area, buf);

        Paragraph::new(self.status)
            .style(Theme::status_bar_style())
            .render(layout.status_area, buf);
    }
}

impl<'a> HomeScreen<'a> {
    fn render_recent(&self, area: Rect, buf: &mut Buffer) {
        let inner = inset(area, 2, 0);
        if inner.height < 2 {
            return;
        }
        let title_row = inner.y + 1;
        buf.set_stringn(
            inner.x,
            title_row,
            "Recent Activity",
            inner.width as usize,
            Theme::title_style(),
        );
        right_aligned(buf, inner, title_row, SEE_ALL, Theme::accent_style());

        let bottom = inner.y + inner.height;
        let mut y = title_row + 2;

        if self.recent.is_empty() {
            if y < bottom {
                let msg = "📭 No transactions yet";
                let w = msg.chars().count() as u16 + 1;
                let x = inner.x + inner.width.saturating_sub(w) / 2;
                buf.set_string(x, y, msg, Theme::muted_style());
            }
            return;
        }

        for t in self.recent.iter().take(RECENT_LIMIT) {
            if y + 1 >= bottom {
                break;
            }
            buf.set_stringn(
                inner.x,
                y,
                format!("{}  {}", t.icon, t.title),
                inner.width as usize,
                Theme::title_style(),
            );
            right_aligned(
                buf,
                inner,
                y,
                &format::format_amount(t.amount),
                Theme::amount_style(t.amount),
            );
            buf.set_stringn(
                inner.x + 4,
                y + 1,
                &t.description,
                inner.width.saturating_sub(4) as usize,
                Theme::muted_style(),
            );
            right_aligned(
                buf,
                inner,
                y + 1,
                &format::format_date(t.date, self.today, false),
                Theme::muted_style(),
            );
            y += 2;
        }
    }
}

/// Write `text` flush against the right edge of `area` on `row`.
pub(super) fn right_aligned(buf: &mut Buffer, area: Rect, row: u16, text: &str, style: Style) {
    let width = text.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width);
    buf.set_stringn(x, row, text, area.width as usize, style);
}
