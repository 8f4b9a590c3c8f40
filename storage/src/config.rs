use reqwest::Url;

use crate::error::StorageError;

pub const ENDPOINT_ENV_VAR: &str = "MATCH_TRACKER_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub url: Url,
}

impl EndpointConfig {
    pub fn new(url: &str) -> Result<Self, StorageError> {
        let parsed = Url::parse(url.trim())
            .map_err(|e| StorageError::Config(format!("invalid endpoint url {url:?}: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self { url: parsed }),
            scheme => Err(StorageError::Config(format!(
                "endpoint must be http or https, got {scheme}"
            ))),
        }
    }

    pub fn from_cli_or_env_or_yaml(
        cli_arg: Option<String>,
        yaml_config: Option<String>,
    ) -> Result<Self, StorageError> {
        let env = std::env::var(ENDPOINT_ENV_VAR).ok();
        Self::from_sources(cli_arg, env, yaml_config)
    }

    fn from_sources(
        cli_arg: Option<String>,
        env: Option<String>,
        yaml_config: Option<String>,
    ) -> Result<Self, StorageError> {
        let url = if let Some(arg) = cli_arg {
            arg
        } else if let Some(env) = env.filter(|value| !value.trim().is_empty()) {
            env
        } else if let Some(yaml) = yaml_config {
            yaml
        } else {
            return Err(StorageError::Config(format!(
                "no endpoint given; pass --endpoint, set {ENDPOINT_ENV_VAR}, \
                 or add `endpoint:` to the config file"
            )));
        };

        Self::new(&url)
    }
}
