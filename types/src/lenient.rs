//! Decoders for rows read back from the spreadsheet, which are looser than
//! what this crate writes.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::recorded::Recorded;

pub(crate) fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Ok(Some(other.to_string())),
    }
}

/// Text cells; the spreadsheet hands back numbers for names such as `8`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Ok(other.to_string()),
    }
}

pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<Recorded<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => Ok(Some(Recorded::from_value(value))),
    }
}

/// Row dates. A cell that is not a date is dropped rather than the row.
pub(crate) fn calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::String(raw)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    // timestamps such as 2024-05-01T00:00:00.000Z keep only their date part
    let date_part = raw.get(..10).unwrap_or(raw);
    Ok(NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok())
}
