//! File-based repository implementations.

mod records;

pub use records::FileMatchRepository;
