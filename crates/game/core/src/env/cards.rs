use crate::state::CardCode;

/// Attribute compared in an Attribute Duel round.
///
/// Declaration order is the tie-break order used by the bot policy.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Attribute {
    Magic,
    Might,
    Fire,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Magic, Attribute::Might, Attribute::Fire];
}

/// Static definition of a card.
///
/// Classic uses `damage`/`heal`; Attribute Duel compares `magic`, `might`
/// and `fire`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub code: CardCode,
    pub display_name: String,
    pub magic: u32,
    pub might: u32,
    pub fire: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal: Option<u32>,
}

impl CardDefinition {
    pub fn new(code: impl Into<CardCode>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            magic: 0,
            might: 0,
            fire: 0,
            damage: None,
            heal: None,
        }
    }

    pub fn with_attributes(mut self, magic: u32, might: u32, fire: u32) -> Self {
        self.magic = magic;
        self.might = might;
        self.fire = fire;
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_heal(mut self, heal: u32) -> Self {
        self.heal = Some(heal);
        self
    }

    pub fn attribute(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Magic => self.magic,
            Attribute::Might => self.might,
            Attribute::Fire => self.fire,
        }
    }
}

/// Read-only card catalog.
pub trait CardOracle: Send + Sync {
    fn lookup(&self, code: &CardCode) -> Option<CardDefinition>;

    /// Looks up several codes at once, skipping unknown ones.
    fn lookup_many(&self, codes: &[CardCode]) -> Vec<CardDefinition> {
        codes.iter().filter_map(|code| self.lookup(code)).collect()
    }

    /// Every code in the catalog, in a stable order.
    fn codes(&self) -> Vec<CardCode>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn enumeration_order_is_magic_might_fire() {
        let order: Vec<Attribute> = Attribute::iter().collect();
        assert_eq!(order, Attribute::ALL.to_vec());
    }

    #[test]
    fn attribute_lookup() {
        let card = CardDefinition::new("master_dragon", "Master dragon").with_attributes(22, 18, 29);
        assert_eq!(card.attribute(Attribute::Fire), 29);
        assert_eq!(card.attribute(Attribute::Might), 18);
        assert_eq!("fire".parse::<Attribute>().ok(), Some(Attribute::Fire));
    }
}
