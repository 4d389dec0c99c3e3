//! String identifiers used throughout the match model.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Unique identifier of a match.
    MatchId
);

string_id!(
    /// Identifier of a match participant (user id or the bot sentinel).
    ParticipantId
);

string_id!(
    /// Catalog code of a card. Hands and decks hold codes, not definitions.
    CardCode
);

impl ParticipantId {
    /// Sentinel identifying the automated opponent.
    pub const BOT: &'static str = "BOT";

    pub fn bot() -> Self {
        Self::new(Self::BOT)
    }

    pub fn is_bot(&self) -> bool {
        self.0 == Self::BOT
    }
}
