//! Card catalog loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::CardDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Card catalog structure for RON and TOML files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<CardDefinition>,
}

/// Loader for card catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a card catalog, picking the format from the file extension
    /// (`.ron` or `.toml`).
    ///
    /// Duplicate card codes are rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<CardDefinition>> {
        let content = read_file(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("ron") => Self::from_ron_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(anyhow::anyhow!(
                "Unsupported catalog format: {} (expected .ron or .toml)",
                path.display()
            )),
        }
    }

    pub fn from_ron_str(content: &str) -> LoadResult<Vec<CardDefinition>> {
        let catalog: CardCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;
        Self::validate(catalog.cards)
    }

    pub fn from_toml_str(content: &str) -> LoadResult<Vec<CardDefinition>> {
        let catalog: CardCatalog = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog TOML: {}", e))?;
        Self::validate(catalog.cards)
    }

    fn validate(cards: Vec<CardDefinition>) -> LoadResult<Vec<CardDefinition>> {
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.code.clone()) {
                anyhow::bail!("Duplicate card code in catalog: {}", card.code);
            }
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const RON: &str = r#"(
        cards: [
            (code: "fireball", display_name: "Fireball", magic: 2, might: 1, fire: 3, damage: Some(5)),
            (code: "knight", display_name: "Knight", magic: 10, might: 23, fire: 15),
        ],
    )"#;

    const TOML: &str = r#"
        [[cards]]
        code = "heal"
        display_name = "Heal"
        magic = 3
        might = 1
        fire = 2
        heal = 4

        [[cards]]
        code = "colossus"
        display_name = "Colossus"
        magic = 0
        might = 30
        fire = 0
    "#;

    #[test]
    fn parses_ron_catalog() {
        let cards = CatalogLoader::from_ron_str(RON).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].damage, Some(5));
        assert_eq!(cards[1].heal, None);
    }

    #[test]
    fn parses_toml_catalog() {
        let cards = CatalogLoader::from_toml_str(TOML).unwrap();
        assert_eq!(cards[0].heal, Some(4));
        assert_eq!(cards[1].might, 30);
    }

    #[test]
    fn load_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML.as_bytes()).unwrap();
        assert_eq!(CatalogLoader::load(file.path()).unwrap().len(), 2);

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{}").unwrap();
        assert!(CatalogLoader::load(file.path()).is_err());
    }

    #[test]
    fn rejects_duplicate_codes() {
        let duplicated = r#"(cards: [
            (code: "elf", display_name: "Elf", magic: 25, might: 6, fire: 14),
            (code: "elf", display_name: "Elf", magic: 25, might: 6, fire: 14),
        ])"#;
        assert!(CatalogLoader::from_ron_str(duplicated).is_err());
    }
}
