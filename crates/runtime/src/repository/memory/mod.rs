//! In-memory repository implementations.

mod durable;
mod table;

pub use durable::InMemoryMatchRepository;
pub use table::InMemoryMatchTable;
