//! Hook registry for managing and executing post-transition hooks.

use std::sync::Arc;

use rand::RngCore;
use tracing::{debug, error};

use game_core::{Match, MatchEnv, MatchError, Transition};

use super::{
    ClassicBotHook, DuelBotAttributeHook, DuelBotCardHook, HookContext, HookCriticality,
    MAX_HOOK_DEPTH, PostTransitionHook,
};
use crate::api::{Result, SessionError};
use crate::providers::BotPolicy;

/// Registry that evaluates hooks after each state-changing command.
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn PostTransitionHook>]>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower first).
    pub fn new(mut hooks: Vec<Arc<dyn PostTransitionHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());
        Self {
            hooks: hooks.into(),
        }
    }

    /// Registry without hooks. Bot seats never move on their own.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a registry with the bot hooks for both variants.
    pub fn default_hooks(policy: Arc<dyn BotPolicy>) -> Self {
        Self::new(vec![
            Arc::new(ClassicBotHook::new(Arc::clone(&policy))) as Arc<dyn PostTransitionHook>,
            Arc::new(DuelBotCardHook::new(Arc::clone(&policy))) as Arc<dyn PostTransitionHook>,
            Arc::new(DuelBotAttributeHook::new(policy)) as Arc<dyn PostTransitionHook>,
        ])
    }

    /// Runs the hook cascade on `state` until no hook triggers.
    ///
    /// Returns the combined transition of every applied follow-up command.
    ///
    /// # Errors
    ///
    /// - A `Critical` hook whose command fails aborts with that error
    /// - A cascade still triggering after [`MAX_HOOK_DEPTH`] rounds fails
    ///   with [`SessionError::HookDepthExceeded`]
    pub fn run(
        &self,
        state: &mut Match,
        env: MatchEnv<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<Transition> {
        let mut total = Transition::Unchanged;

        for depth in 0..MAX_HOOK_DEPTH {
            let pending = {
                let ctx = HookContext {
                    state: &*state,
                    cards: env.cards,
                    now: env.now,
                };
                let mut pending = Vec::new();
                for hook in self.hooks.iter() {
                    if hook.should_trigger(&ctx) {
                        for command in hook.create_commands(&ctx, rng) {
                            pending.push((Arc::clone(hook), command));
                        }
                    }
                }
                pending
            };

            if pending.is_empty() {
                return Ok(total);
            }

            let mut progressed = false;
            for (hook, command) in pending {
                debug!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    depth,
                    match_id = %state.id,
                    ?command,
                    "hook fired"
                );
                match command.apply(state, env, rng) {
                    Ok(transition) => {
                        progressed |= transition.changed();
                        total = total.then(transition);
                    }
                    Err(err) => {
                        self.handle_hook_error(hook.as_ref(), err)?;
                        return Ok(total);
                    }
                }
            }

            if !progressed {
                return Ok(total);
            }
        }

        Err(SessionError::HookDepthExceeded {
            max_depth: MAX_HOOK_DEPTH,
        })
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    fn handle_hook_error(&self, hook: &dyn PostTransitionHook, error: MatchError) -> Result<()> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = ?error,
                    "Critical hook failed, aborting action"
                );
                Err(error.into())
            }
            HookCriticality::Important => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "important",
                    error = ?error,
                    "Hook failed, stopping cascade"
                );
                Ok(())
            }
        }
    }
}
