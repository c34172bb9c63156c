//! Transaction history for one wallet.

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::format;
use crate::core::transaction::{self, Transaction};
use crate::core::wallet::Wallet;

use super::home::right_aligned;
use super::layout::{inset, TransactionsLayout};
use super::theme::Theme;

/// Rows per list entry: title line, detail line, separator.
pub const ENTRY_ROWS: u16 = 3;

pub struct TransactionsScreen<'a> {
    pub wallet: &'a Wallet,
    pub transactions: &'a [&'a Transaction],
    pub today: NaiveDate,
    /// Index of the first item at rest.
    pub scroll_target: usize,
    /// Smooth-scroll displacement in rows.
    pub row_offset: i16,
    pub status: &'a str,
}

impl<'a> Widget for TransactionsScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = TransactionsLayout::from_area(area);

        self.render_header(&layout, buf);
        self.render_summary(layout.summary_area, buf);

        let list_title = inset(layout.list_title_area, 2, 0);
        if list_title.height > 0 {
            buf.set_stringn(
                list_title.x,
                list_title.y,
                "All Transactions",
                list_title.width as usize,
                Theme::title_style(),
            );
        }

        self.render_list(layout.list_area, buf);

        Paragraph::new(self.status)
            .style(Theme::status_bar_style())
            .render(layout.status_area, buf);
    }
}

impl<'a> TransactionsScreen<'a> {
    fn render_header(&self, layout: &TransactionsLayout, buf: &mut Buffer) {
        let header = layout.header_area;
        if header.height == 0 || header.width == 0 {
            return;
        }
        // Arrow sits on the middle row, or the only one.
        let back = layout.back_rect();
        let arrow_row = back.y + back.height.min(2) - 1;
        if back.width > 1 {
            buf.set_string(back.x + 1, arrow_row, "←", Theme::accent_style());
        }

        let title_x = back.x + back.width + 1;
        if title_x >= header.x + header.width {
            return;
        }
        let title_w = (header.x + header.width - title_x) as usize;
        buf.set_stringn(title_x, header.y, &self.wallet.name, title_w, Theme::title_style());
        if header.height >= 2 {
            buf.set_stringn(
                title_x,
                header.y + 1,
                format!("{} transactions", self.transactions.len()),
                title_w,
                Theme::muted_style(),
            );
        }
    }

    fn render_summary(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let totals = transaction::totals(self.transactions);
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inset(area, 2, 0));

        let boxes = [
            ("Income", format!("+${:.2}", totals.income), Theme::income_style()),
            ("Expense", format!("-${:.2}", totals.expense), Theme::expense_style()),
        ];
        for (rect, (label, amount, style)) in halves.iter().zip(boxes) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border_style());
            let inner = block.inner(*rect);
            block.render(*rect, buf);
            if inner.height >= 2 {
                buf.set_stringn(inner.x + 1, inner.y, label, inner.width as usize, Theme::muted_style());
                buf.set_stringn(inner.x + 1, inner.y + 1, amount, inner.width as usize, style);
            }
        }
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        if self.transactions.is_empty() {
            let lines = [
                ("📭", Theme::muted_style()),
                ("No transactions yet", Theme::title_style()),
                ("Start using this wallet to see transactions", Theme::muted_style()),
            ];
            for (i, (text, style)) in lines.into_iter().enumerate() {
                let y = area.y + 1 + i as u16;
                if y >= area.y + area.height {
                    break;
                }
                let w = text.chars().count() as u16;
                let x = area.x + area.width.saturating_sub(w) / 2;
                buf.set_stringn(x, y, text, area.width as usize, style);
            }
            return;
        }

        let top = i32::from(area.y);
        let bottom = top + i32::from(area.height);
        let rows = i32::from(ENTRY_ROWS);
        let shift = -(self.scroll_target as i32) * rows + i32::from(self.row_offset);

        for (i, t) in self.transactions.iter().enumerate() {
            let y0 = top + i as i32 * rows + shift;
            if y0 + rows <= top {
                continue;
            }
            if y0 >= bottom {
                break;
            }
            let visible = |y: i32| (top..bottom).contains(&y).then_some(y as u16);

            if let Some(y) = visible(y0) {
                buf.set_stringn(
                    area.x,
                    y,
                    format!("{}  {}", t.icon, t.title),
                    area.width as usize,
                    Theme::title_style(),
                );
                right_aligned(
                    buf,
                    area,
                    y,
                    &format::format_amount(t.amount),
                    Theme::amount_style(t.amount),
                );
            }
            if let Some(y) = visible(y0 + 1) {
                buf.set_stringn(
                    area.x + 4,
                    y,
                    &t.description,
                    area.width.saturating_sub(4) as usize,
                    Theme::muted_style(),
                );
                right_aligned(
                    buf,
                    area,
                    y,
                    &format::format_date(t.date, self.today, true),
                    Theme::muted_style(),
                );
            }
            if let Some(y) = visible(y0 + 2) {
                let rule = "─".repeat(area.width as usize);
                buf.set_string(area.x, y, rule, Theme::border_style());
            }
        }
    }
}
