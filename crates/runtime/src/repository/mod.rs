//! Storage for match state.
//!
//! Two backends with different lifetimes:
//! - [`InMemoryMatchTable`]: volatile, process-local table of live Classic matches
//! - [`MatchRepository`]: durable store for Duel matches and finished matches
//!
//! Static card content is served by the oracle layer, not by repositories.

mod error;
mod file;
mod memory;
mod record;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileMatchRepository;
pub use memory::{InMemoryMatchRepository, InMemoryMatchTable};
pub use record::MatchRecord;
pub use traits::MatchRepository;
