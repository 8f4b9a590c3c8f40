//! Declarative validation rules for the match result form. Every message a
//! user can see comes from [`MATCH_RESULT_SCHEMA`].

use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use types::{Format, GameScore, MatchRecord, PlayDraw, Recorded, SideboardStatus};

use crate::field::{Field, FormValues};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

#[derive(Clone, Copy)]
pub enum Constraint {
    /// Trimmed text must have at least `min` characters.
    MinLength { min: usize, message: &'static str },
    /// Must parse as a whole number.
    WholeNumber { message: &'static str },
    /// Whole number no smaller than `min`.
    AtLeast { min: i64, message: &'static str },
    /// Whole number no larger than `max`.
    AtMost { max: i64, message: &'static str },
    /// Must be one of a fixed set of choices.
    OneOf {
        accepts: fn(&str) -> bool,
        message: &'static str,
    },
}

impl Constraint {
    fn check(&self, raw: &str) -> Result<(), &'static str> {
        let ok = match self {
            Constraint::MinLength { min, .. } => raw.chars().count() >= *min,
            Constraint::WholeNumber { .. } => raw.parse::<i64>().is_ok(),
            Constraint::AtLeast { min, .. } => raw.parse::<i64>().map_or(false, |n| n >= *min),
            Constraint::AtMost { max, .. } => raw.parse::<i64>().map_or(false, |n| n <= *max),
            Constraint::OneOf { accepts, .. } => accepts(raw),
        };
        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Constraint::MinLength { message, .. }
            | Constraint::WholeNumber { message }
            | Constraint::AtLeast { message, .. }
            | Constraint::AtMost { message, .. }
            | Constraint::OneOf { message, .. } => *message,
        }
    }
}

#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    /// Optional fields skip their constraints when left blank.
    pub optional: bool,
    pub constraints: &'static [Constraint],
}

fn is_format(raw: &str) -> bool {
    raw.parse::<Format>().is_ok()
}

fn is_play_draw(raw: &str) -> bool {
    raw.parse::<PlayDraw>().is_ok()
}

fn is_sideboard_status(raw: &str) -> bool {
    raw.parse::<SideboardStatus>().is_ok()
}

/// Largest game count a record can hold.
pub const MAX_GAMES: i64 = u32::MAX as i64;

pub static MATCH_RESULT_SCHEMA: &[FieldRule] = &[
    FieldRule {
        field: Field::Player,
        optional: false,
        constraints: &[Constraint::MinLength {
            min: 1,
            message: "Player name is required",
        }],
    },
    FieldRule {
        field: Field::Opponent,
        optional: false,
        constraints: &[Constraint::MinLength {
            min: 1,
            message: "Opponent name is required",
        }],
    },
    FieldRule {
        field: Field::Format,
        optional: false,
        constraints: &[
            Constraint::MinLength {
                min: 1,
                message: "Format is required",
            },
            Constraint::OneOf {
                accepts: is_format,
                message: "Format must be one of Standard, Pioneer, Modern, Legacy, Vintage, \
                          Commander, Limited, Draft, Sealed, Pauper",
            },
        ],
    },
    FieldRule {
        field: Field::PlayerDeck,
        optional: false,
        constraints: &[Constraint::MinLength {
            min: 1,
            message: "Player deck is required",
        }],
    },
    FieldRule {
        field: Field::OpponentDeck,
        optional: false,
        constraints: &[Constraint::MinLength {
            min: 1,
            message: "Opponent deck is required",
        }],
    },
    FieldRule {
        field: Field::Wins,
        optional: false,
        constraints: &[
            Constraint::WholeNumber {
                message: "Wins must be a whole number",
            },
            Constraint::AtLeast {
                min: 0,
                message: "Wins must be 0 or greater",
            },
            Constraint::AtMost {
                max: MAX_GAMES,
                message: "Wins must be 4294967295 or fewer",
            },
        ],
    },
    FieldRule {
        field: Field::Losses,
        optional: false,
        constraints: &[
            Constraint::WholeNumber {
                message: "Losses must be a whole number",
            },
            Constraint::AtLeast {
                min: 0,
                message: "Losses must be 0 or greater",
            },
            Constraint::AtMost {
                max: MAX_GAMES,
                message: "Losses must be 4294967295 or fewer",
            },
        ],
    },
    FieldRule {
        field: Field::PlayDraw,
        optional: true,
        constraints: &[Constraint::OneOf {
            accepts: is_play_draw,
            message: "Play/Draw must be Play or Draw",
        }],
    },
    FieldRule {
        field: Field::SideboardStatus,
        optional: true,
        constraints: &[Constraint::OneOf {
            accepts: is_sideboard_status,
            message: "Sideboard must be Pre-Sideboard or Post-Sideboard",
        }],
    },
];

/// Input that passed the schema, with every field in its typed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedForm {
    pub player: String,
    pub opponent: String,
    pub format: Format,
    pub player_deck: String,
    pub opponent_deck: String,
    pub score: GameScore,
    pub play_draw: Option<PlayDraw>,
    pub sideboard_status: Option<SideboardStatus>,
}

impl ValidatedForm {
    /// Builds the record handed to storage, stamped with `date`.
    pub fn into_record(self, date: NaiveDate) -> MatchRecord {
        MatchRecord {
            id: None,
            player: self.player,
            opponent: self.opponent,
            format: self.format.into(),
            player_deck: self.player_deck,
            opponent_deck: self.opponent_deck,
            games: self.score.into(),
            play_draw: self.play_draw.map(Recorded::Known),
            sideboard_status: self.sideboard_status.map(Recorded::Known),
            date: Some(date),
        }
    }
}

/// Blank or whitespace-only input becomes `None`.
pub fn normalize_optional<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        raw.parse().ok()
    }
}

/// Checks `values` against `schema`, reporting at most one error per field.
pub fn check(schema: &[FieldRule], values: &FormValues) -> Vec<FieldError> {
    schema
        .iter()
        .filter_map(|rule| {
            let raw = values.get(rule.field).trim();
            if rule.optional && raw.is_empty() {
                return None;
            }
            rule.constraints
                .iter()
                .find_map(|constraint| constraint.check(raw).err())
                .map(|message| FieldError::new(rule.field, message))
        })
        .collect()
}

pub fn validate(values: &FormValues) -> Result<ValidatedForm, Vec<FieldError>> {
    let errors = check(MATCH_RESULT_SCHEMA, values);
    if !errors.is_empty() {
        return Err(errors);
    }

    // the schema has already accepted these, so parsing cannot fail
    let count = |field: Field| -> u32 {
        values
            .get(field)
            .trim()
            .parse()
            .expect("Schema bounds game counts to 0..=MAX_GAMES")
    };
    let format = values
        .format
        .parse::<Format>()
        .expect("Schema only accepts known formats");

    Ok(ValidatedForm {
        player: values.player.trim().to_string(),
        opponent: values.opponent.trim().to_string(),
        format,
        player_deck: values.player_deck.trim().to_string(),
        opponent_deck: values.opponent_deck.trim().to_string(),
        score: GameScore::new(count(Field::Wins), count(Field::Losses)),
        play_draw: normalize_optional(&values.play_draw),
        sideboard_status: normalize_optional(&values.sideboard_status),
    })
}
