use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    choice::{Format, PlayDraw, SideboardStatus},
    lenient,
    recorded::Recorded,
    score::GameScore,
};

/// One persisted match outcome.
///
/// Optional fields are omitted from the serialized form when absent, never
/// written as empty strings. Rows read back keep every cell: text that does
/// not parse into a choice or score stays as [`Recorded::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::id"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub opponent: String,
    #[serde(default)]
    pub format: Recorded<Format>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player_deck: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub opponent_deck: String,
    #[serde(default)]
    pub games: Recorded<GameScore>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::blank_as_none"
    )]
    pub play_draw: Option<Recorded<PlayDraw>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::blank_as_none"
    )]
    pub sideboard_status: Option<Recorded<SideboardStatus>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::calendar_date"
    )]
    pub date: Option<NaiveDate>,
}

impl MatchRecord {
    /// Both participant names, player first.
    pub fn names(&self) -> [&str; 2] {
        [&self.player, &self.opponent]
    }

    /// Both deck names, player's deck first.
    pub fn decks(&self) -> [&str; 2] {
        [&self.player_deck, &self.opponent_deck]
    }
}

impl Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let date = self
            .date
            .map(|d| d.to_string())
            .unwrap_or("----------".to_string());
        write!(
            f,
            "{date} [{}] {} ({}) vs {} ({}): {}",
            self.format,
            self.player,
            self.player_deck,
            self.opponent,
            self.opponent_deck,
            self.games
        )?;
        if let Some(play_draw) = &self.play_draw {
            write!(f, ", on the {}", play_draw.to_string().to_lowercase())?;
        }
        if let Some(status) = &self.sideboard_status {
            write!(f, ", {status}")?;
        }
        Ok(())
    }
}
