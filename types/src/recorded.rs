use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A cell read back from storage. Values this crate does not recognize (a
/// format added by hand, a score the spreadsheet turned into a date) are kept
/// as their raw text so the rest of the row is not lost.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Recorded<T> {
    Known(T),
    Unrecognized(String),
}

impl<T> Recorded<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Recorded::Known(value) => Some(value),
            Recorded::Unrecognized(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.known().is_some()
    }
}

impl<T: FromStr> Recorded<T> {
    /// Parses `raw`, falling back to keeping it verbatim.
    pub fn parse(raw: &str) -> Self {
        match raw.parse() {
            Ok(value) => Recorded::Known(value),
            Err(_) => Recorded::Unrecognized(raw.to_string()),
        }
    }

    pub(crate) fn from_value(value: Value) -> Self {
        match value {
            Value::String(raw) => Self::parse(&raw),
            Value::Null => Recorded::Unrecognized(String::new()),
            other => Recorded::Unrecognized(other.to_string()),
        }
    }
}

impl<T> From<T> for Recorded<T> {
    fn from(value: T) -> Self {
        Recorded::Known(value)
    }
}

impl<T> Default for Recorded<T> {
    fn default() -> Self {
        Recorded::Unrecognized(String::new())
    }
}

impl<T: Display> Display for Recorded<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recorded::Known(value) => write!(f, "{value}"),
            Recorded::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}

impl<T: Serialize> Serialize for Recorded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Recorded::Known(value) => value.serialize(serializer),
            Recorded::Unrecognized(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Recorded<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}
