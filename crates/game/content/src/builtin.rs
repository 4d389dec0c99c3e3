//! Built-in card set.

use game_core::CardDefinition;

/// (code, display name, magic, might, fire)
const ATTRIBUTE_CARDS: &[(&str, &str, u32, u32, u32)] = &[
    ("master_dragon", "Master dragon", 22, 18, 29),
    ("golden_dragon", "Golden dragon", 16, 24, 28),
    ("silver_dragon", "Silver dragon", 15, 21, 27),
    ("bronze_dragon", "Bronze dragon", 14, 20, 26),
    ("copper_dragon", "Copper dragon", 13, 19, 25),
    ("white_dragon", "White dragon", 21, 15, 22),
    ("black_dragon", "Black dragon", 19, 17, 24),
    ("red_dragon", "Red dragon", 20, 16, 23),
    ("blue_dragon", "Blue dragon", 18, 13, 21),
    ("green_dragon", "Green dragon", 17, 14, 20),
    ("knight", "Knight", 10, 23, 15),
    ("colossus", "Colossus", 0, 30, 0),
    ("sorceress", "Sorceress", 28, 2, 19),
    ("warrioress", "Warrioress", 14, 22, 12),
    ("warrior", "Warrior", 12, 25, 10),
    ("hero", "Hero", 12, 27, 15),
    ("werewolf", "Werewolf", 15, 21, 13),
    ("mage", "Mage", 29, 4, 17),
    ("merlin", "Merlin", 30, 0, 0),
    ("mummy", "Mummy", 15, 24, 0),
    ("pegasus", "Pegasus", 23, 12, 12),
    ("sorcerer", "Sorcerer", 26, 5, 18),
    ("shadow", "Shadow", 23, 10, 1),
    ("barbarian", "Barbarian", 11, 29, 8),
    ("viking", "Viking", 13, 28, 6),
    ("witch", "Witch", 27, 3, 16),
    ("elf", "Elf", 25, 6, 14),
    ("angel", "Angel", 24, 1, 7),
    ("lava_giant", "Lava Giant", 0, 0, 30),
    ("skeleton", "Skeleton", 15, 20, 2),
    ("ogre", "Ogre", 16, 21, 4),
    ("unicorn", "Unicorn", 25, 13, 7),
];

/// Catalog shipped with the binary: the Classic effect cards followed by the
/// dragons and heroes compared in Attribute Duel rounds.
pub fn builtin_catalog() -> Vec<CardDefinition> {
    let effects = [
        CardDefinition::new("fireball", "Fireball")
            .with_attributes(2, 1, 3)
            .with_damage(5),
        CardDefinition::new("lightning", "Lightning Bolt")
            .with_attributes(1, 2, 3)
            .with_damage(3),
        CardDefinition::new("heal", "Heal")
            .with_attributes(3, 1, 2)
            .with_heal(4),
    ];

    effects
        .into_iter()
        .chain(
            ATTRIBUTE_CARDS
                .iter()
                .map(|&(code, name, magic, might, fire)| {
                    CardDefinition::new(code, name).with_attributes(magic, might, fire)
                }),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_unique() {
        let catalog = builtin_catalog();
        let codes: HashSet<_> = catalog.iter().map(|card| card.code.clone()).collect();
        assert_eq!(codes.len(), catalog.len());
        assert_eq!(catalog.len(), 35);
    }

    #[test]
    fn effect_cards_carry_damage_and_heal() {
        let catalog = builtin_catalog();
        let find = |code: &str| catalog.iter().find(|card| card.code.as_str() == code);
        assert_eq!(find("fireball").and_then(|card| card.damage), Some(5));
        assert_eq!(find("lightning").and_then(|card| card.damage), Some(3));
        assert_eq!(find("heal").and_then(|card| card.heal), Some(4));
        assert_eq!(find("master_dragon").map(|card| card.fire), Some(29));
    }
}
