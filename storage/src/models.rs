use std::fmt::Display;

use serde::Deserialize;
use serde_json::Value;

/// The `action` query parameter understood by the endpoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndpointAction {
    GetMatches,
    AddMatch,
}

impl EndpointAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointAction::GetMatches => "getMatches",
            EndpointAction::AddMatch => "addMatch",
        }
    }
}

impl Display for EndpointAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body of a `getMatches` response. Rows stay raw so that one bad row does not
/// discard the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchesEnvelope {
    pub success: bool,
    pub data: Vec<Value>,
}

/// Body of an `addMatch` response. Anything besides the flag is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AppendResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AppendResponse {
    pub fn failure_reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or("success flag was not true".to_string())
    }
}
