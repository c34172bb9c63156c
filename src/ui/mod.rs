//! Rendering layer. Everything that touches Ratatui widgets lives here.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  Screens are plain `Widget`s built fresh every frame.

pub mod card_stack;
pub mod home;
pub mod layout;
pub mod smooth_scroll;
pub mod theme;
pub mod transactions;
pub mod wallet_card;
pub mod welcome;
