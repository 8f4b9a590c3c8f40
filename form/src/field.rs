use std::fmt::Display;

/// Inputs collected by the match result form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Player,
    Opponent,
    Format,
    PlayerDeck,
    OpponentDeck,
    Wins,
    Losses,
    PlayDraw,
    SideboardStatus,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Player,
        Field::Opponent,
        Field::Format,
        Field::PlayerDeck,
        Field::OpponentDeck,
        Field::Wins,
        Field::Losses,
        Field::PlayDraw,
        Field::SideboardStatus,
    ];

    /// Name of the field in the persisted record.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Player => "player",
            Field::Opponent => "opponent",
            Field::Format => "format",
            Field::PlayerDeck => "playerDeck",
            Field::OpponentDeck => "opponentDeck",
            Field::Wins => "wins",
            Field::Losses => "losses",
            Field::PlayDraw => "playDraw",
            Field::SideboardStatus => "sideboardStatus",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Player => "Your Name",
            Field::Opponent => "Opponent",
            Field::Format => "Format",
            Field::PlayerDeck => "Your Deck",
            Field::OpponentDeck => "Opp Deck",
            Field::Wins => "Wins",
            Field::Losses => "Losses",
            Field::PlayDraw => "Play/Draw",
            Field::SideboardStatus => "Sideboard",
        }
    }

    /// Fields offered as a choice from previously recorded values.
    pub fn is_pooled(&self) -> bool {
        matches!(
            self,
            Field::Player | Field::Opponent | Field::PlayerDeck | Field::OpponentDeck
        )
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Raw, unvalidated form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormValues {
    pub player: String,
    pub opponent: String,
    pub format: String,
    pub player_deck: String,
    pub opponent_deck: String,
    pub wins: String,
    pub losses: String,
    pub play_draw: String,
    pub sideboard_status: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            player: String::new(),
            opponent: String::new(),
            format: String::new(),
            player_deck: String::new(),
            opponent_deck: String::new(),
            wins: "0".to_string(),
            losses: "0".to_string(),
            play_draw: String::new(),
            sideboard_status: String::new(),
        }
    }
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Player => &self.player,
            Field::Opponent => &self.opponent,
            Field::Format => &self.format,
            Field::PlayerDeck => &self.player_deck,
            Field::OpponentDeck => &self.opponent_deck,
            Field::Wins => &self.wins,
            Field::Losses => &self.losses,
            Field::PlayDraw => &self.play_draw,
            Field::SideboardStatus => &self.sideboard_status,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Player => &mut self.player,
            Field::Opponent => &mut self.opponent,
            Field::Format => &mut self.format,
            Field::PlayerDeck => &mut self.player_deck,
            Field::OpponentDeck => &mut self.opponent_deck,
            Field::Wins => &mut self.wins,
            Field::Losses => &mut self.losses,
            Field::PlayDraw => &mut self.play_draw,
            Field::SideboardStatus => &mut self.sideboard_status,
        };
        *slot = value;
    }
}
