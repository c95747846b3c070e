use anyhow::Context;
use url::Url;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub server_url: Url,
    pub token: String,
    pub log_filter: String,
}

impl CliConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup("SEAFILE_SERVER_URL").context("SEAFILE_SERVER_URL is not set")?;
        let server_url = Url::parse(server_url.trim())
            .with_context(|| format!("SEAFILE_SERVER_URL is not a valid url: {server_url}"))?;
        let token = lookup("SEAFILE_TOKEN")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .context("SEAFILE_TOKEN is not set")?;
        let log_filter = lookup("SEAFILE_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            server_url,
            token,
            log_filter,
        })
    }
}
