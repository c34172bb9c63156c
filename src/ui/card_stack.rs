//! Renders projected card transforms onto the terminal grid.
//!
//! Each card is drawn at full size into a scratch buffer, then copied onto
//! the stack area at its projected row, shrunk by its scale and blended
//! toward the background by its opacity.  Cards are painted in draw order so
//! the active card lands on top.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::card_stack::layout::{self, CardVisualTransform};
use crate::core::wallet::Wallet;

use super::layout::CARD_ROWS;
use super::theme::fade;
use super::wallet_card::WalletCard;

/// Cards fainter than this are not drawn at all.
const MIN_VISIBLE_OPACITY: f64 = 0.02;

/// Horizontal margin on each side of a full-scale card.
const SIDE_MARGIN: u16 = 2;

/// Maps stack offset units onto cells of a stack area.
#[derive(Debug, Clone, Copy)]
pub struct StackGeometry {
    pub area: Rect,
    pub points_per_row: f64,
}

/// Where a card lands.  `top` may be above the stack area (clipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPlacement {
    pub x: u16,
    pub top: i32,
    pub width: u16,
    pub height: u16,
}

impl CardPlacement {
    /// Rows of the card that are visible inside `area`, as an absolute rect.
    pub fn visible_rect(&self, area: Rect) -> Option<Rect> {
        let area_top = i32::from(area.y);
        let area_bottom = area_top + i32::from(area.height);
        let top = self.top.max(area_top);
        let bottom = (self.top + i32::from(self.height)).min(area_bottom);
        if bottom <= top || self.width == 0 {
            return None;
        }
        Some(Rect::new(self.x, top as u16, self.width, (bottom - top) as u16))
    }
}

impl StackGeometry {
    /// Rows needed to show the active card plus a peek of the next one.
    pub fn stack_rows(step: f64, top_padding: f64, points_per_row: f64) -> u16 {
        let extra = ((step + top_padding) / points_per_row).ceil().max(0.0) as u16;
        CARD_ROWS + extra
    }

    pub fn placement(&self, t: &CardVisualTransform) -> CardPlacement {
        let full_width = self.area.width.saturating_sub(SIDE_MARGIN * 2);
        let width = (f64::from(full_width) * t.scale).round() as u16;
        let height = (f64::from(CARD_ROWS) * t.scale).round() as u16;

        // Scale around the card's centre, like a transform origin of 50%/50%.
        let slot_top = (t.vertical_offset / self.points_per_row).round() as i32;
        let top = i32::from(self.area.y) + slot_top + i32::from((CARD_ROWS - height) / 2);
        let x = self.area.x + SIDE_MARGIN + (full_width - width) / 2;

        CardPlacement { x, top, width, height }
    }

    /// Topmost visible card under a cell, if any.
    pub fn hit_test(&self, transforms: &[CardVisualTransform], col: u16, row: u16) -> Option<usize> {
        let mut ordered = transforms.to_vec();
        layout::sort_for_drawing(&mut ordered);
        ordered
            .iter()
            .rev()
            .filter(|t| t.opacity >= MIN_VISIBLE_OPACITY)
            .find(|t| {
                self.placement(t)
                    .visible_rect(self.area)
                    .is_some_and(|r| super::layout::point_in_rect(r, col, row))
            })
            .map(|t| t.index)
    }
}

pub struct CardStackWidget<'a> {
    pub wallets: &'a [Wallet],
    pub transforms: &'a [CardVisualTransform],
    pub points_per_row: f64,
    /// Card that shows the "Tap for details" hint.
    pub selected: Option<usize>,
}

impl<'a> Widget for CardStackWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = StackGeometry {
            area,
            points_per_row: self.points_per_row,
        };
        let mut ordered = self.transforms.to_vec();
        layout::sort_for_drawing(&mut ordered);

        for t in ordered {
            if t.opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let Some(wallet) = self.wallets.get(t.index) else {
                continue;
            };
            let placement = geometry.placement(&t);
            let Some(visible) = placement.visible_rect(area) else {
                continue;
            };

            let card_area = Rect::new(0, 0, placement.width, placement.height);
            let mut scratch = Buffer::empty(card_area);
            WalletCard::new(wallet)
                .hint(self.selected == Some(t.index))
                .render(card_area, &mut scratch);

            let skip_rows = (i32::from(visible.y) - placement.top) as u16;
            for dy in 0..visible.height {
                for dx in 0..visible.width {
                    let Some(src) = scratch.cell((dx, dy + skip_rows)) else {
                        continue;
                    };
                    let mut cell = src.clone();
                    cell.fg = fade(cell.fg, t.opacity);
                    cell.bg = fade(cell.bg, t.opacity);
                    if let Some(dst) = buf.cell_mut((visible.x + dx, visible.y + dy)) {
                        *dst = cell;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card_stack::StackConfig;
    use crate::core::wallet::sample_wallets;
    use ratatui::style::Color;

    const PPR: f64 = 16.0;

    fn geometry() -> StackGeometry {
        StackGeometry {
            area: Rect::new(0, 2, 50, 15),
            points_per_row: PPR,
        }
    }

    fn stack_config(n: usize) -> StackConfig {
        StackConfig {
            card_count: n,
            ..StackConfig::default()
        }
    }

    #[test]
    fn stack_rows_fit_card_and_peek() {
        assert_eq!(StackGeometry::stack_rows(50.0, 16.0, 16.0), CARD_ROWS + 5);
    }

    #[test]
    fn active_card_is_full_width_at_padding_row() {
        let cfg = stack_config(5);
        let t = layout::project(0.0, 0, &cfg);
        let p = geometry().placement(&t);

        assert_eq!(p.width, 46);
        assert_eq!(p.height, CARD_ROWS);
        assert_eq!(p.x, 2);
        assert_eq!(p.top, 2 + 1);
    }

    #[test]
    fn cards_behind_are_narrower_and_lower() {
        let cfg = stack_config(5);
        let front = geometry().placement(&layout::project(0.0, 0, &cfg));
        let next = geometry().placement(&layout::project(0.0, 1, &cfg));

        assert!(next.width < front.width);
        assert!(next.top > front.top);
    }

    #[test]
    fn cards_above_area_are_clipped() {
        let cfg = stack_config(5);
        let past = geometry().placement(&layout::project(100.0, 0, &cfg));
        assert!(past.top < 2);
        if let Some(rect) = past.visible_rect(geometry().area) {
            assert!(rect.y >= 2);
        }
    }

    #[test]
    fn hit_test_prefers_topmost_card() {
        let cfg = stack_config(5);
        let transforms = layout::project_all(0.0, &cfg);
        let g = geometry();

        // Row inside the front card, which overlaps the card behind it.
        assert_eq!(g.hit_test(&transforms, 20, 6), Some(0));
        // Below the front card only the next card's peek is left.
        let below = g.placement(&transforms[0]).top + i32::from(CARD_ROWS) + 1;
        assert_eq!(g.hit_test(&transforms, 20, below as u16), Some(1));
        // Margin column.
        assert_eq!(g.hit_test(&transforms, 0, 6), None);
    }

    #[test]
    fn renders_active_card_on_top_at_full_strength() {
        let wallets = sample_wallets();
        let cfg = stack_config(wallets.len());
        let transforms = layout::project_all(0.0, &cfg);
        let area = geometry().area;
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 20));

        CardStackWidget {
            wallets: &wallets,
            transforms: &transforms,
            points_per_row: PPR,
            selected: Some(0),
        }
        .render(area, &mut buf);

        let top = geometry().placement(&transforms[0]).top as u16;
        let text: String = (0..50)
            .filter_map(|x| buf.cell((x, top + 1)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(text.contains("Main Wallet"), "row was {text:?}");
        assert_eq!(buf.cell((2, top)).map(|c| c.bg), Some(Color::Rgb(0x66, 0x7e, 0xea)));
        // Nothing leaks outside the stack area.
        assert_eq!(buf.cell((10, 0)).map(|c| c.symbol().to_string()), Some(" ".into()));
    }
}
