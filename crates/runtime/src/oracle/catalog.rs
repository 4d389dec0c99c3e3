//! [`game_core::CardOracle`] backed by an in-memory map.
use std::collections::BTreeMap;

use game_core::{CardCode, CardDefinition, CardOracle};

/// CardOracle implementation with static card definitions.
///
/// Codes are kept sorted so deck building sees a stable code order.
#[derive(Clone, Debug, Default)]
pub struct CatalogOracleImpl {
    definitions: BTreeMap<CardCode, CardDefinition>,
}

impl CatalogOracleImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut oracle = Self::new();
        for card in cards {
            oracle.add_definition(card);
        }
        oracle
    }

    /// Catalog shipped with `game-content`.
    pub fn builtin() -> Self {
        Self::from_cards(game_content::builtin_catalog())
    }

    /// Add a card definition, replacing any previous one with the same code.
    pub fn add_definition(&mut self, def: CardDefinition) {
        self.definitions.insert(def.code.clone(), def);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl CardOracle for CatalogOracleImpl {
    fn lookup(&self, code: &CardCode) -> Option<CardDefinition> {
        self.definitions.get(code).cloned()
    }

    fn codes(&self) -> Vec<CardCode> {
        self.definitions.keys().cloned().collect()
    }
}
