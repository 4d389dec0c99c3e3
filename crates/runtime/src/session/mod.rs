//! Session orchestrator.
//!
//! [`SessionOrchestrator`] owns both stores, the hook registry and the
//! publisher, and is the only entry point that mutates matches:
//! - Classic matches live in the volatile [`InMemoryMatchTable`] while they
//!   tick and are archived to the [`MatchRepository`] once they end
//! - Attribute Duel matches live in the [`MatchRepository`] from creation on
//!
//! Every mutating call locks the match, works on a copy, writes it back once
//! and publishes the snapshot after the lock is released.

mod classic;
mod duel;
mod lifecycle;
mod locks;
mod queries;

pub use locks::MatchLocks;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use game_core::{CardOracle, Match, MatchCommand, MatchEnv, MatchError, MatchId, Transition, Variant};

use crate::api::{Result, SessionAction, SessionError, SessionResponse};
use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::events::{MatchEvent, MatchEventBus, MatchEventKind, Publisher};
use crate::hooks::HookRegistry;
use crate::oracle::CatalogOracleImpl;
use crate::providers::{BotPolicy, DefaultBotPolicy};
use crate::repository::{
    FileMatchRepository, InMemoryMatchRepository, InMemoryMatchTable, MatchRepository,
};

/// Creates matches and routes actions to the engine of their variant.
pub struct SessionOrchestrator {
    config: SessionConfig,
    cards: Arc<dyn CardOracle>,
    table: InMemoryMatchTable,
    repository: Arc<dyn MatchRepository>,
    hooks: HookRegistry,
    publisher: Arc<dyn Publisher>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
    locks: MatchLocks,
}

/// Where a located match currently lives.
enum Located {
    /// Live Classic match in the volatile table.
    Live(Match),
    /// Row in the durable store: any Duel match or an archived Classic one.
    Stored(Match),
}

impl SessionOrchestrator {
    pub fn builder() -> SessionOrchestratorBuilder {
        SessionOrchestratorBuilder::new()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cards(&self) -> &dyn CardOracle {
        self.cards.as_ref()
    }

    pub fn locks(&self) -> &MatchLocks {
        &self.locks
    }

    /// Executes one transport-level action.
    pub async fn dispatch(&self, action: SessionAction) -> Result<SessionResponse> {
        let response = match action {
            SessionAction::Start {
                participant_id,
                variant,
                opponent_id,
            } => SessionResponse::Match(Box::new(
                self.start(participant_id, variant, opponent_id).await?,
            )),
            SessionAction::PlayCard {
                match_id,
                participant_id,
                card_code,
            } => SessionResponse::Match(Box::new(
                self.play_card(&match_id, participant_id, card_code).await?,
            )),
            SessionAction::SkipTurn {
                match_id,
                participant_id,
            } => SessionResponse::Match(Box::new(self.skip_turn(&match_id, participant_id).await?)),
            SessionAction::ChooseCard {
                match_id,
                participant_id,
                card_code,
            } => SessionResponse::Match(Box::new(
                self.choose_card(&match_id, participant_id, card_code).await?,
            )),
            SessionAction::ChooseAttribute {
                match_id,
                participant_id,
                attribute,
            } => SessionResponse::Match(Box::new(
                self.choose_attribute(&match_id, participant_id, attribute)
                    .await?,
            )),
            SessionAction::Advance { match_id } => {
                SessionResponse::Match(Box::new(self.advance(&match_id).await?))
            }
            SessionAction::UnchooseCard {
                match_id,
                participant_id,
            } => SessionResponse::Match(Box::new(
                self.unchoose_card(&match_id, participant_id).await?,
            )),
            SessionAction::Surrender {
                match_id,
                participant_id,
            } => SessionResponse::Match(Box::new(self.surrender(&match_id, participant_id).await?)),
            SessionAction::End { match_id } => {
                SessionResponse::Match(Box::new(self.end(&match_id).await?))
            }
            SessionAction::GetState { match_id } => {
                SessionResponse::Match(Box::new(self.get_state(&match_id)?))
            }
            SessionAction::GetResult { match_id } => {
                SessionResponse::Result(self.get_result(&match_id)?)
            }
            SessionAction::ListActive { participant_id } => {
                SessionResponse::Active(self.list_active(participant_id.as_ref())?)
            }
            SessionAction::Expire => SessionResponse::Expired(self.expire().await?),
            SessionAction::Stats { participant_id } => {
                SessionResponse::Stats(self.stats(&participant_id)?)
            }
            SessionAction::ListCards => SessionResponse::Catalog(self.list_cards()),
            SessionAction::GetCard { card_code } => {
                SessionResponse::Card(self.get_card(&card_code)?)
            }
        };
        Ok(response)
    }

    /// Applies `command` to the match under its lock and publishes the
    /// resulting snapshots.
    async fn run(&self, id: &MatchId, command: MatchCommand) -> Result<Match> {
        let mut events = Vec::new();
        let result = {
            let _guard = self.locks.acquire(id).await;
            self.apply_locked(id, &command, &mut events)
        };
        if matches!(result, Err(SessionError::MatchNotFound(_))) {
            self.locks.release(id);
        }
        self.publish_all(events).await;
        result
    }

    fn apply_locked(
        &self,
        id: &MatchId,
        command: &MatchCommand,
        events: &mut Vec<MatchEvent>,
    ) -> Result<Match> {
        match self.locate(id)? {
            Located::Live(state) => self.apply_classic(state, command, events),
            Located::Stored(state) => match state.variant {
                Variant::AttributeDuel => self.apply_duel(state, command, events),
                Variant::Classic if command.is_duel_only() => Ok(state),
                Variant::Classic => Err(SessionError::AlreadyResolved(state.id)),
            },
        }
    }

    fn locate(&self, id: &MatchId) -> Result<Located> {
        if let Some(state) = self.table.get(id)? {
            return Ok(Located::Live(state));
        }
        match self.repository.find(id)? {
            Some(state) => Ok(Located::Stored(state)),
            None => Err(SessionError::MatchNotFound(id.clone())),
        }
    }

    /// Applies one command and, if it changed anything, the hook cascade.
    fn step(
        &self,
        state: &mut Match,
        command: &MatchCommand,
        env: MatchEnv<'_>,
        rng: &mut StdRng,
    ) -> Result<Transition> {
        let transition = command
            .apply(state, env, rng)
            .map_err(|error| lift(&state.id, error))?;

        if !transition.changed() {
            debug!(match_id = %state.id, ?command, "command left the match unchanged");
            return Ok(transition);
        }

        let cascade = self.hooks.run(state, env, rng)?;
        Ok(transition.then(cascade))
    }

    fn env(&self, now: chrono::DateTime<chrono::Utc>) -> MatchEnv<'_> {
        MatchEnv::new(self.cards.as_ref(), &self.config.match_config, now)
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn publish_all(&self, events: Vec<MatchEvent>) {
        for event in events {
            self.publisher.publish(event).await;
        }
    }
}

/// Maps engine errors that name the match itself onto session errors.
fn lift(id: &MatchId, error: MatchError) -> SessionError {
    match error {
        MatchError::WrongVariant => SessionError::InvalidVariant(id.clone()),
        MatchError::AlreadyResolved => SessionError::AlreadyResolved(id.clone()),
        other => SessionError::Match(other),
    }
}

fn event_for(transition: Transition, state: &Match) -> Option<MatchEvent> {
    match transition {
        Transition::Unchanged => None,
        Transition::Updated => Some(MatchEvent::new(MatchEventKind::Updated, state.clone())),
        Transition::Finished => {
            info!(match_id = %state.id, winner = ?state.winner, "match finished");
            Some(MatchEvent::new(MatchEventKind::Finished, state.clone()))
        }
    }
}

/// Builder for [`SessionOrchestrator`].
///
/// Everything is optional. Defaults: catalog from `config.catalog_path` or
/// the built-in set, file store under `config.data_dir` or in memory, a
/// fresh [`MatchEventBus`], the system clock and the default bot hooks.
pub struct SessionOrchestratorBuilder {
    config: SessionConfig,
    cards: Option<Arc<dyn CardOracle>>,
    repository: Option<Arc<dyn MatchRepository>>,
    publisher: Option<Arc<dyn Publisher>>,
    clock: Option<Arc<dyn Clock>>,
    hooks: Option<HookRegistry>,
    bot_policy: Option<Arc<dyn BotPolicy>>,
}

impl SessionOrchestratorBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            cards: None,
            repository: None,
            publisher: None,
            clock: None,
            hooks: None,
            bot_policy: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Card catalog used for dealing and effect lookup
    pub fn cards(mut self, cards: Arc<dyn CardOracle>) -> Self {
        self.cards = Some(cards);
        self
    }

    /// Durable store for Duel matches and archived Classic matches
    pub fn repository(mut self, repository: Arc<dyn MatchRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the hook set entirely.
    ///
    /// Takes precedence over [`bot_policy`](Self::bot_policy).
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Policy for the default bot hooks.
    pub fn bot_policy(mut self, policy: Arc<dyn BotPolicy>) -> Self {
        self.bot_policy = Some(policy);
        self
    }

    /// Build the orchestrator
    pub fn build(self) -> Result<SessionOrchestrator> {
        let config = self.config;

        let cards = match self.cards {
            Some(cards) => cards,
            None => Arc::new(load_catalog(&config)?),
        };

        let repository: Arc<dyn MatchRepository> = match (self.repository, &config.data_dir) {
            (Some(repository), _) => repository,
            (None, Some(dir)) => Arc::new(FileMatchRepository::new(dir)?),
            (None, None) => Arc::new(InMemoryMatchRepository::new()),
        };

        let publisher = self
            .publisher
            .unwrap_or_else(|| Arc::new(MatchEventBus::with_capacity(config.event_buffer_size)));

        let hooks = self.hooks.unwrap_or_else(|| {
            HookRegistry::default_hooks(
                self.bot_policy
                    .unwrap_or_else(|| Arc::new(DefaultBotPolicy)),
            )
        });

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            cards = cards.codes().len(),
            hooks = hooks.len(),
            durable = ?config.data_dir,
            "session orchestrator ready"
        );

        Ok(SessionOrchestrator {
            config,
            cards,
            table: InMemoryMatchTable::new(),
            repository,
            hooks,
            publisher,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            rng: Mutex::new(rng),
            locks: MatchLocks::new(),
        })
    }
}

fn load_catalog(config: &SessionConfig) -> Result<CatalogOracleImpl> {
    let oracle = match &config.catalog_path {
        Some(path) => {
            let cards = game_content::CatalogLoader::load(path)
                .map_err(|error| SessionError::Catalog(format!("{error:#}")))?;
            CatalogOracleImpl::from_cards(cards)
        }
        None => CatalogOracleImpl::builtin(),
    };

    if oracle.is_empty() {
        return Err(SessionError::Catalog("catalog has no cards".to_string()));
    }
    Ok(oracle)
}
