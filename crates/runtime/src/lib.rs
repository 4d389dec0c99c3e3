//! Session runtime for card-battle matches.
//!
//! This crate wires the pure engines of `game-core` to storage, bot
//! continuations and event publishing. Consumers build a
//! [`SessionOrchestrator`] and feed it [`SessionAction`]s (or call its typed
//! methods directly).
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] publishes post-action snapshots
//! - [`hooks`] runs bot continuations after state-changing commands
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod clock;
pub mod config;
pub mod events;
pub mod hooks;
pub mod oracle;
pub mod providers;
pub mod repository;
pub mod session;

pub use api::{
    ExpiryReport, MatchResult, MatchSummary, ParticipantStats, Result, SessionAction,
    SessionError, SessionResponse,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use events::{MatchEvent, MatchEventBus, MatchEventKind, Publisher};
pub use hooks::{
    ClassicBotHook, DuelBotAttributeHook, DuelBotCardHook, HookContext, HookCriticality,
    HookRegistry, PostTransitionHook,
};
pub use oracle::CatalogOracleImpl;
pub use providers::{BotPolicy, DefaultBotPolicy};
pub use repository::{
    FileMatchRepository, InMemoryMatchRepository, InMemoryMatchTable, MatchRecord,
    MatchRepository, RepositoryError,
};
pub use session::{MatchLocks, SessionOrchestrator, SessionOrchestratorBuilder};
