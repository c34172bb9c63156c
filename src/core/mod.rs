//! Core model – wallets, transactions, formatting, and the card stack
//! interaction.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod card_stack;
pub mod format;
pub mod transaction;
pub mod wallet;
