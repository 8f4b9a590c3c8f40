use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Format {
    Standard,
    Pioneer,
    Modern,
    Legacy,
    Vintage,
    Commander,
    Limited,
    Draft,
    Sealed,
    Pauper,
}

impl Format {
    pub const ALL: [Format; 10] = [
        Format::Standard,
        Format::Pioneer,
        Format::Modern,
        Format::Legacy,
        Format::Vintage,
        Format::Commander,
        Format::Limited,
        Format::Draft,
        Format::Sealed,
        Format::Pauper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Standard => "Standard",
            Format::Pioneer => "Pioneer",
            Format::Modern => "Modern",
            Format::Legacy => "Legacy",
            Format::Vintage => "Vintage",
            Format::Commander => "Commander",
            Format::Limited => "Limited",
            Format::Draft => "Draft",
            Format::Sealed => "Sealed",
            Format::Pauper => "Pauper",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Format::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::Format(s.to_string()))
    }
}

/// Whether the recording player was on the play or on the draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayDraw {
    Play,
    Draw,
}

impl PlayDraw {
    pub const ALL: [PlayDraw; 2] = [PlayDraw::Play, PlayDraw::Draw];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayDraw::Play => "Play",
            PlayDraw::Draw => "Draw",
        }
    }
}

impl Display for PlayDraw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlayDraw {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PlayDraw::ALL
            .into_iter()
            .find(|pd| pd.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::PlayDraw(s.to_string()))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideboardStatus {
    #[serde(rename = "Pre-Sideboard")]
    PreSideboard,
    #[serde(rename = "Post-Sideboard")]
    PostSideboard,
}

impl SideboardStatus {
    pub const ALL: [SideboardStatus; 2] =
        [SideboardStatus::PreSideboard, SideboardStatus::PostSideboard];

    pub fn as_str(&self) -> &'static str {
        match self {
            SideboardStatus::PreSideboard => "Pre-Sideboard",
            SideboardStatus::PostSideboard => "Post-Sideboard",
        }
    }
}

impl Display for SideboardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SideboardStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SideboardStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::SideboardStatus(s.to_string()))
    }
}
