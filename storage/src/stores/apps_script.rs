use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use types::MatchRecord;

use super::MatchStore;
use crate::config::EndpointConfig;
use crate::models::{AppendResponse, EndpointAction, MatchesEnvelope};
use crate::StorageError;

/// Client for a spreadsheet-backed script endpoint. Every operation is a
/// single query-string GET; nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct AppsScriptClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl AppsScriptClient {
    pub fn new(config: EndpointConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: EndpointConfig) -> Self {
        Self {
            http,
            endpoint: config.url,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn try_fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        let body = self
            .request(&[("action", EndpointAction::GetMatches.as_str())])
            .await?;
        let envelope: MatchesEnvelope = serde_json::from_str(&body)
            .map_err(|e| StorageError::UnexpectedShape(format!("{e}: {body}")))?;
        if !envelope.success {
            return Err(StorageError::UnexpectedShape(format!(
                "success flag was not true: {body}"
            )));
        }
        Ok(decode_rows(envelope.data))
    }

    pub async fn try_append(&self, record: &MatchRecord) -> Result<(), StorageError> {
        let data = serde_json::to_string(record)?;
        tracing::debug!("Sending match to endpoint: {data}");
        let body = self
            .request(&[("action", EndpointAction::AddMatch.as_str()), ("data", data.as_str())])
            .await?;
        let response: AppendResponse = serde_json::from_str(&body)
            .map_err(|e| StorageError::UnexpectedShape(format!("{e}: {body}")))?;
        tracing::debug!("Endpoint append response: {body}");
        if response.success {
            Ok(())
        } else {
            Err(StorageError::Rejected(response.failure_reason()))
        }
    }

    async fn request(&self, query: &[(&str, &str)]) -> Result<String, StorageError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

fn decode_rows(rows: Vec<Value>) -> Vec<MatchRecord> {
    let total = rows.len();
    let records: Vec<MatchRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping unreadable match row {}: {}", idx, e);
                None
            }
        })
        .collect();
    tracing::debug!("Decoded {} of {} match rows", records.len(), total);
    records
}

#[async_trait]
impl MatchStore for AppsScriptClient {
    async fn fetch_all(&self) -> Vec<MatchRecord> {
        match self.try_fetch_all().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Error fetching matches from {}: {}", self.endpoint, e);
                Vec::new()
            }
        }
    }

    async fn append(&self, record: &MatchRecord) -> Result<bool, StorageError> {
        match self.try_append(record).await {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::error!("Error appending match to {}: {}", self.endpoint, e);
                Ok(false)
            }
        }
    }
}
