//! The remote statistics provider seam.

use std::future::Future;

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;

use crate::error::ProviderError;
use crate::model::EnrichmentResult;

/// Keyed lookup of repository statistics.
pub trait StatsProvider {
    fn lookup(
        &self,
        repo: &str,
    ) -> impl Future<Output = Result<EnrichmentResult, ProviderError>>;
}

/// Body returned by `GET <base>/<owner>/<name>`. Only the fields the gallery
/// shows are decoded.
#[derive(Debug, Deserialize)]
struct RepoPayload {
    stargazers_count: u64,
    forks_count: u64,
    #[serde(default)]
    language: Option<String>,
    html_url: String,
    #[serde(default)]
    homepage: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<RepoPayload> for EnrichmentResult {
    fn from(payload: RepoPayload) -> Self {
        Self {
            stars: payload.stargazers_count,
            forks: payload.forks_count,
            language: payload.language,
            url: payload.html_url,
            // the API reports an unset homepage as an empty string
            homepage: payload.homepage.filter(|home| !home.is_empty()),
            updated: payload.updated_at,
        }
    }
}

/// [`StatsProvider`] backed by a GitHub-compatible REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    http: reqwest::Client,
    base: String,
    user_agent: String,
}

impl HttpProvider {
    pub fn new(base: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    pub fn with_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn endpoint(&self, repo: &str) -> String {
        format!("{}/{}", self.base, repo.trim_matches('/'))
    }
}

impl StatsProvider for HttpProvider {
    async fn lookup(&self, repo: &str) -> Result<EnrichmentResult, ProviderError> {
        let response = self
            .http
            .get(self.endpoint(repo))
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let payload: RepoPayload = serde_json::from_slice(&bytes)?;

        Ok(payload.into())
    }
}
