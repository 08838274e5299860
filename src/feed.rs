//! The static project document feed.

use std::fmt::Display;
use std::future::Future;

use camino::Utf8PathBuf;
use serde::Deserialize;

use crate::error::FeedError;
use crate::model::ProjectRecord;

/// Default feed location, relative to the working directory.
pub const DEFAULT_FEED: &str = "projects.json";

/// Anything able to produce the raw feed document.
pub trait FeedSource {
    fn fetch(&self) -> impl Future<Output = Result<String, FeedError>>;
}

#[derive(Deserialize)]
struct FeedDocument {
    projects: Vec<ProjectRecord>,
}

/// Parses the feed document into records, in document order.
pub fn parse_feed(text: &str) -> Result<Vec<ProjectRecord>, FeedError> {
    let document: FeedDocument = serde_json::from_str(text)?;
    Ok(document.projects)
}

/// Where the feed lives: a local file or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    File(Utf8PathBuf),
    Http(String),
}

impl FeedLocation {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http(location.to_string())
        } else {
            Self::File(location.into())
        }
    }
}

impl Default for FeedLocation {
    fn default() -> Self {
        Self::File(DEFAULT_FEED.into())
    }
}

impl From<&str> for FeedLocation {
    fn from(location: &str) -> Self {
        Self::parse(location)
    }
}

impl Display for FeedLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedLocation::File(path) => write!(f, "{path}"),
            FeedLocation::Http(url) => write!(f, "{url}"),
        }
    }
}

impl FeedSource for FeedLocation {
    async fn fetch(&self) -> Result<String, FeedError> {
        match self {
            FeedLocation::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|err| FeedError::FileSystem(path.to_string(), err)),
            FeedLocation::Http(url) => {
                let response = reqwest::get(url).await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FeedError::Status(status.as_u16()));
                }

                Ok(response.text().await?)
            }
        }
    }
}
