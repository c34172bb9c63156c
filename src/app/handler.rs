//! Input handling: maps key and mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::card_stack::CardStackController;
use crate::ui::card_stack::StackGeometry;
use crate::ui::home::home_layout;
use crate::ui::layout::{point_in_rect, TransactionsLayout, WelcomeLayout};
use crate::ui::transactions::ENTRY_ROWS;

use super::state::{AppState, DragState, Screen, WelcomeFocus};

pub const SIGN_UP_UNAVAILABLE: &str = "Sign up is not available in this demo";

/// Process a key event, dispatching based on the active screen.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits, regardless of screen.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.screen {
        Screen::Welcome => handle_welcome_key(state, key),
        Screen::Home => handle_home_key(state, key),
        Screen::Transactions { .. } => handle_transactions_key(state, key),
    }
}

// ── Welcome ─────────────────────────────────────────────────────

fn handle_welcome_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
            state.welcome_focus = state.welcome_focus.toggled();
        }
        KeyCode::Enter => {
            let focus = state.welcome_focus;
            activate_welcome(state, focus);
        }
        _ => {
            if state.config.match_key(key) == Some(Action::Quit) {
                state.should_quit = true;
            }
        }
    }
}

fn activate_welcome(state: &mut AppState, button: WelcomeFocus) {
    state.welcome_focus = button;
    match button {
        WelcomeFocus::SignIn => state.navigate(Screen::Home),
        WelcomeFocus::SignUp => {
            tracing::info!("sign up requested");
            state.status_message = Some(SIGN_UP_UNAVAILABLE.into());
        }
    }
}

// ── Home (card stack) ───────────────────────────────────────────

fn handle_home_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    match action {
        Action::PrevCard => {
            state.stack.step_by(-1);
        }
        Action::NextCard => {
            state.stack.step_by(1);
        }
        Action::OpenWallet => state.open_active_wallet(),
        Action::Back => {
            state.back();
        }
        Action::Quit => state.should_quit = true,
    }
}

// ── Transactions ────────────────────────────────────────────────

fn handle_transactions_key(state: &mut AppState, key: KeyEvent) {
    let page = transactions_page(state);
    let jump = match key.code {
        KeyCode::PageUp => Some(-page),
        KeyCode::PageDown => Some(page),
        KeyCode::Home => Some(isize::MIN / 2),
        KeyCode::End => Some(isize::MAX / 2),
        _ => None,
    };
    if let Some(delta) = jump {
        state.scroll_transactions(delta);
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    match action {
        Action::PrevCard => state.scroll_transactions(-1),
        Action::NextCard => state.scroll_transactions(1),
        Action::Back => {
            state.back();
        }
        Action::Quit => state.should_quit = true,
        Action::OpenWallet => {}
    }
}

/// Whole list entries that fit on screen.
fn transactions_page(state: &AppState) -> isize {
    let list = TransactionsLayout::from_area(state.terminal_area).list_area;
    (list.height / ENTRY_ROWS).max(1) as isize
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event read at `at`.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, at: Instant) {
    match state.screen {
        Screen::Welcome => handle_welcome_mouse(state, mouse),
        Screen::Home => handle_home_mouse(state, mouse, at),
        Screen::Transactions { .. } => handle_transactions_mouse(state, mouse),
    }
}

fn handle_welcome_mouse(state: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let layout = WelcomeLayout::from_area(state.terminal_area);
    if point_in_rect(layout.sign_in, mouse.column, mouse.row) {
        activate_welcome(state, WelcomeFocus::SignIn);
    } else if point_in_rect(layout.sign_up, mouse.column, mouse.row) {
        activate_welcome(state, WelcomeFocus::SignUp);
    }
}

fn handle_transactions_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = TransactionsLayout::from_area(state.terminal_area);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.back_rect(), mouse.column, mouse.row) {
                state.back();
            }
        }
        MouseEventKind::ScrollUp => state.scroll_transactions(-1),
        MouseEventKind::ScrollDown => state.scroll_transactions(1),
        _ => {}
    }
}

fn handle_home_mouse(state: &mut AppState, mouse: MouseEvent, at: Instant) {
    let points_per_row = state.config.tuning.points_per_row;
    let layout = home_layout(state.terminal_area, state.stack.config(), points_per_row);
    let pointer = f64::from(mouse.row) * points_per_row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.see_all_rect(), mouse.column, mouse.row) {
                if let Some(wallet) = state.selected_wallet {
                    state.navigate(Screen::Transactions { wallet });
                }
                return;
            }
            if !point_in_rect(layout.stack_area, mouse.column, mouse.row) {
                return;
            }
            let froze_spring = !state.stack.is_settled();
            state.stack.begin_gesture();
            let mut drag = DragState {
                origin_row: mouse.row,
                origin_col: mouse.column,
                last: (mouse.column, mouse.row),
                moved: false,
                froze_spring,
                tracker: Default::default(),
            };
            drag.tracker.reset(at, pointer);
            state.drag = Some(drag);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(drag) = state.drag.as_mut() else {
                return;
            };
            track_pointer(drag, &mut state.stack, mouse, at, points_per_row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(mut drag) = state.drag.take() else {
                return;
            };
            if (mouse.column, mouse.row) != drag.last {
                track_pointer(&mut drag, &mut state.stack, mouse, at, points_per_row);
            }

            if drag.moved {
                // Pointer moving down the screen drags the offset backwards.
                let velocity = -drag.tracker.release_velocity(at);
                tracing::debug!(offset = state.stack.scroll_offset(), velocity, "release");
                state.stack.end_gesture(velocity);
                return;
            }

            state.stack.cancel_gesture();
            if drag.froze_spring {
                return;
            }
            let geometry = StackGeometry {
                area: layout.stack_area,
                points_per_row,
            };
            let hit = geometry.hit_test(&state.stack.transforms(), mouse.column, mouse.row);
            if hit.is_some() && hit == state.stack.active_index() {
                state.open_active_wallet();
            }
        }
        MouseEventKind::ScrollUp => {
            state.stack.step_by(-1);
        }
        MouseEventKind::ScrollDown => {
            state.stack.step_by(1);
        }
        _ => {}
    }
}

/// Feed a pointer move into the live gesture.
fn track_pointer(
    drag: &mut DragState,
    stack: &mut CardStackController,
    mouse: MouseEvent,
    at: Instant,
    points_per_row: f64,
) {
    if mouse.row != drag.origin_row || mouse.column != drag.origin_col {
        drag.moved = true;
    }
    drag.last = (mouse.column, mouse.row);
    let rows = f64::from(mouse.row) - f64::from(drag.origin_row);
    stack.update_gesture(rows * points_per_row);
    drag.tracker.record(at, f64::from(mouse.row) * points_per_row);
}
