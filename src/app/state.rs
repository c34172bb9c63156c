//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Duration;

use chrono::NaiveDate;
use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::card_stack::notifier::{SelectionChanged, SelectionNotifier};
use crate::core::card_stack::velocity::VelocityTracker;
use crate::core::card_stack::{CardStackController, StackConfigError};
use crate::core::transaction::{self, Transaction};
use crate::core::wallet::{self, Wallet};
use crate::ui::smooth_scroll::SmoothScroll;
use crate::ui::transactions::ENTRY_ROWS;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Home,
    /// Transaction history of the wallet at this index.
    Transactions { wallet: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WelcomeFocus {
    #[default]
    SignIn,
    SignUp,
}

impl WelcomeFocus {
    pub fn toggled(self) -> Self {
        match self {
            WelcomeFocus::SignIn => WelcomeFocus::SignUp,
            WelcomeFocus::SignUp => WelcomeFocus::SignIn,
        }
    }
}

/// A left-button press on the card stack that hasn't been released yet.
#[derive(Debug)]
pub struct DragState {
    pub origin_row: u16,
    pub origin_col: u16,
    /// Most recent pointer cell seen by the gesture.
    pub last: (u16, u16),
    /// Whether the pointer left its starting cell.
    pub moved: bool,
    /// The press stopped a running snap animation.
    pub froze_spring: bool,
    pub tracker: VelocityTracker,
}

/// Top-level application state.
pub struct AppState {
    pub wallets: Vec<Wallet>,
    pub transactions: Vec<Transaction>,
    /// Gesture controller for the home screen's card stack.
    pub stack: CardStackController,
    /// Last selection the stack announced.
    pub selected_wallet: Option<usize>,
    pub screen: Screen,
    /// Screens to return to on Back, innermost last.
    pub history: Vec<Screen>,
    pub drag: Option<DragState>,
    pub welcome_focus: WelcomeFocus,
    /// Row animation of the transaction list.
    pub tx_scroll: SmoothScroll,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    pub config: AppConfig,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Reference date for "Today" / "Yesterday" labels.
    pub today: NaiveDate,
}

impl AppState {
    /// State over the demo wallets and transactions.
    pub fn new(
        config: AppConfig,
        notifier: SelectionNotifier,
        start: Screen,
        today: NaiveDate,
    ) -> Result<Self, StackConfigError> {
        Self::with_data(
            config,
            notifier,
            start,
            today,
            wallet::sample_wallets(),
            transaction::sample_transactions(),
        )
    }

    pub fn with_data(
        config: AppConfig,
        notifier: SelectionNotifier,
        start: Screen,
        today: NaiveDate,
        wallets: Vec<Wallet>,
        transactions: Vec<Transaction>,
    ) -> Result<Self, StackConfigError> {
        let stack = CardStackController::new(config.tuning.stack_config(wallets.len()), notifier)?;
        Ok(Self {
            selected_wallet: stack.active_index(),
            wallets,
            transactions,
            stack,
            screen: start,
            history: Vec::new(),
            drag: None,
            welcome_focus: WelcomeFocus::default(),
            tx_scroll: SmoothScroll::new(0.35),
            terminal_area: Rect::default(),
            config,
            status_message: None,
            should_quit: false,
            today,
        })
    }

    pub fn selected(&self) -> Option<&Wallet> {
        self.selected_wallet.and_then(|i| self.wallets.get(i))
    }

    /// Record a selection announced by the card stack.
    pub fn apply_selection(&mut self, event: SelectionChanged) {
        if event.index < self.wallets.len() {
            self.selected_wallet = Some(event.index);
        }
    }

    /// Transactions of the wallet at `index`, in list order.
    pub fn wallet_transactions(&self, index: usize) -> Vec<&Transaction> {
        match self.wallets.get(index) {
            Some(w) => transaction::for_wallet(&self.transactions, &w.id),
            None => Vec::new(),
        }
    }

    // ── navigation ───────────────────────────────────────────────

    pub fn navigate(&mut self, to: Screen) {
        if to == self.screen {
            return;
        }
        tracing::info!(from = ?self.screen, ?to, "navigate");
        self.history.push(self.screen);
        self.enter(to);
    }

    /// Pop back to the previous screen.  Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        let Some(prev) = self.history.pop() else {
            return false;
        };
        tracing::info!(from = ?self.screen, to = ?prev, "back");
        self.enter(prev);
        true
    }

    fn enter(&mut self, screen: Screen) {
        self.screen = screen;
        self.status_message = None;
        self.drag = None;
        if self.stack.is_dragging() {
            self.stack.cancel_gesture();
        }
        if let Screen::Transactions { .. } = screen {
            self.tx_scroll.reset(0);
        }
    }

    /// Open the transaction screen for the active card.
    pub fn open_active_wallet(&mut self) {
        if let Some(index) = self.stack.active_index() {
            self.navigate(Screen::Transactions { wallet: index });
        }
    }

    // ── transaction list scrolling ───────────────────────────────

    /// Scroll the transaction list by `delta` items, clamped to the list.
    pub fn scroll_transactions(&mut self, delta: isize) {
        let Screen::Transactions { wallet } = self.screen else {
            return;
        };
        let count = self.wallet_transactions(wallet).len();
        let last = count.saturating_sub(1);
        let target = self.tx_scroll.target().saturating_add_signed(delta).min(last);
        self.tx_scroll.set_target(target, f64::from(ENTRY_ROWS));
    }

    // ── frames ───────────────────────────────────────────────────

    /// True while anything on screen is still moving.
    pub fn is_animating(&self) -> bool {
        self.stack.is_animating() || self.tx_scroll.is_animating()
    }

    /// Advance running animations by `dt`.
    pub fn on_frame(&mut self, dt: Duration) {
        self.stack.tick(dt);
        self.tx_scroll.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn state(start: Screen) -> (AppState, UnboundedReceiver<SelectionChanged>) {
        let (notifier, rx) = SelectionNotifier::channel();
        let today = NaiveDate::from_ymd_opt(2024, 12, 23).expect("date");
        let s = AppState::new(AppConfig::default(), notifier, start, today).expect("state");
        (s, rx)
    }

    #[test]
    fn starts_with_first_wallet_selected() {
        let (s, _rx) = state(Screen::Home);
        assert_eq!(s.selected_wallet, Some(0));
        assert_eq!(s.selected().map(|w| w.name.as_str()), Some("Main Wallet"));
    }

    #[test]
    fn navigation_is_a_stack() {
        let (mut s, _rx) = state(Screen::Welcome);
        s.navigate(Screen::Home);
        s.open_active_wallet();
        assert_eq!(s.screen, Screen::Transactions { wallet: 0 });

        assert!(s.back());
        assert_eq!(s.screen, Screen::Home);
        assert!(s.back());
        assert_eq!(s.screen, Screen::Welcome);
        assert!(!s.back());
    }

    #[test]
    fn selection_events_update_selected_wallet() {
        let (mut s, mut rx) = state(Screen::Home);
        s.stack.step_by(2);
        while let Ok(ev) = rx.try_recv() {
            s.apply_selection(ev);
        }
        assert_eq!(s.selected_wallet, Some(2));

        s.apply_selection(SelectionChanged { index: 99 });
        assert_eq!(s.selected_wallet, Some(2));
    }

    #[test]
    fn transaction_scroll_clamps_to_list() {
        let (mut s, _rx) = state(Screen::Home);
        s.open_active_wallet();
        let count = s.wallet_transactions(0).len();
        s.scroll_transactions(100);
        assert_eq!(s.tx_scroll.target(), count - 1);
        s.scroll_transactions(-100);
        assert_eq!(s.tx_scroll.target(), 0);
    }

    #[test]
    fn frames_run_until_spring_settles() {
        let (mut s, _rx) = state(Screen::Home);
        s.stack.step_by(1);
        let mut frames = 0;
        while s.is_animating() {
            s.on_frame(Duration::from_millis(16));
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(s.stack.scroll_offset(), 50.0);
    }
}
