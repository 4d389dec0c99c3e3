//! Match engines.
//!
//! [`ClassicEngine`] and [`DuelEngine`] are the only code that mutates a
//! [`Match`]. Both borrow the match mutably for the duration of a call and
//! report what happened as a [`Transition`]; storage, locking and bot
//! continuations are the runtime's concern.

mod classic;
mod command;
mod duel;
mod setup;

pub use classic::ClassicEngine;
pub use command::MatchCommand;
pub use duel::DuelEngine;
pub use setup::new_match;

/// What a single engine call did to the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Transition {
    /// Structural no-op: wrong stage, duplicate message, nothing to do.
    Unchanged,
    /// State changed, match still live.
    Updated,
    /// State changed and the match is now finished.
    Finished,
}

impl Transition {
    pub fn changed(self) -> bool {
        self != Transition::Unchanged
    }

    pub fn finished(self) -> bool {
        self == Transition::Finished
    }

    /// Combines two transitions applied in sequence.
    pub fn then(self, next: Transition) -> Transition {
        self.max(next)
    }
}
