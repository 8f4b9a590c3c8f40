use std::{fmt::Display, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// Games won and lost within a single match, persisted as `"<wins>-<losses>"`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GameScore {
    pub wins: u32,
    pub losses: u32,
}

impl GameScore {
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }
}

impl Display for GameScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

impl FromStr for GameScore {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::GameScore(s.to_string());
        let (wins, losses) = s.trim().split_once('-').ok_or_else(invalid)?;
        let wins = wins.trim().parse().map_err(|_| invalid())?;
        let losses = losses.trim().parse().map_err(|_| invalid())?;
        Ok(Self { wins, losses })
    }
}

impl Serialize for GameScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
