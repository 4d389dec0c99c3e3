//! Decision providers for automated participants.

pub mod bot;

pub use bot::{BotPolicy, DefaultBotPolicy};
