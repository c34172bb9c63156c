//! Layout helpers: split the terminal area into regions for each screen.
//!
//! Input handling recomputes the same layouts for hit-testing, so these are
//! pure functions of the terminal area.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by one wallet card at full scale.
pub const CARD_ROWS: u16 = 10;

/// Welcome screen: brand block and two buttons.
pub struct WelcomeLayout {
    pub brand_area: Rect,
    pub sign_in: Rect,
    pub sign_up: Rect,
    pub status_area: Rect,
}

impl WelcomeLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),    // brand
                Constraint::Length(3), // sign in
                Constraint::Length(1),
                Constraint::Length(3), // sign up
                Constraint::Length(2),
                Constraint::Length(1), // status
            ])
            .split(area);

        Self {
            brand_area: chunks[0],
            sign_in: centered_fixed(28, 3, chunks[1]),
            sign_up: centered_fixed(28, 3, chunks[3]),
            status_area: chunks[5],
        }
    }
}

/// Home screen: header, card stack, recent activity, status bar.
pub struct HomeLayout {
    pub header_area: Rect,
    pub stack_area: Rect,
    pub recent_area: Rect,
    pub status_area: Rect,
}

impl HomeLayout {
    /// `stack_rows` is the height reserved for the card stack.
    pub fn from_area(area: Rect, stack_rows: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),          // "My Wallets" header
                Constraint::Length(stack_rows), // card stack
                Constraint::Min(3),             // recent activity
                Constraint::Length(1),          // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            stack_area: chunks[1],
            recent_area: chunks[2],
            status_area: chunks[3],
        }
    }

    /// Clickable "See All →" label in the recent-activity header.
    pub fn see_all_rect(&self) -> Rect {
        let inner = inset(self.recent_area, 2, 0);
        let width = SEE_ALL.chars().count() as u16;
        Rect::new(
            inner.x + inner.width.saturating_sub(width),
            inner.y.saturating_add(1),
            width.min(inner.width),
            1.min(inner.height),
        )
    }
}

pub const SEE_ALL: &str = "See All →";

/// Transactions screen: header, summary boxes, list, status bar.
pub struct TransactionsLayout {
    pub header_area: Rect,
    pub summary_area: Rect,
    pub list_title_area: Rect,
    pub list_area: Rect,
    pub status_area: Rect,
}

impl TransactionsLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // back + title
                Constraint::Length(4), // income / expense
                Constraint::Length(2), // "All Transactions"
                Constraint::Min(3),    // list
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            summary_area: chunks[1],
            list_title_area: chunks[2],
            list_area: inset(chunks[3], 2, 0),
            status_area: chunks[4],
        }
    }

    /// Clickable back arrow in the header.
    pub fn back_rect(&self) -> Rect {
        Rect::new(
            self.header_area.x,
            self.header_area.y,
            5.min(self.header_area.width),
            self.header_area.height,
        )
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Shrink `area` by `dx` columns and `dy` rows on each side.
pub fn inset(area: Rect, dx: u16, dy: u16) -> Rect {
    Rect::new(
        area.x.saturating_add(dx),
        area.y.saturating_add(dy),
        area.width.saturating_sub(dx * 2),
        area.height.saturating_sub(dy * 2),
    )
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && row >= area.y
        && col < area.x.saturating_add(area.width)
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_layout_reserves_stack_rows() {
        let layout = HomeLayout::from_area(Rect::new(0, 0, 60, 40), 14);
        assert_eq!(layout.header_area.height, 2);
        assert_eq!(layout.stack_area.height, 14);
        assert_eq!(layout.stack_area.y, 2);
        assert_eq!(layout.status_area.y, 39);
        assert!(layout.recent_area.height >= 3);
    }

    #[test]
    fn see_all_sits_right_aligned_in_recent_header() {
        let layout = HomeLayout::from_area(Rect::new(0, 0, 60, 40), 14);
        let rect = layout.see_all_rect();
        assert_eq!(rect.y, layout.recent_area.y + 1);
        assert_eq!(rect.x + rect.width, 58);
    }

    #[test]
    fn point_in_rect_edges() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(point_in_rect(r, 2, 3));
        assert!(point_in_rect(r, 5, 4));
        assert!(!point_in_rect(r, 6, 4));
        assert!(!point_in_rect(r, 2, 5));
    }
}
