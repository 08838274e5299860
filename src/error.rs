use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VitrineError {
    #[error("Failed to build runtime")]
    RuntimeBuild(#[source] std::io::Error),

    #[error("Couldn't load the project feed.\n{0}")]
    Feed(#[from] FeedError),

    #[error("Error while writing the output.\n{0}")]
    Output(#[from] OutputError),
}

/// Fatal, feed-level failure. When this happens nothing is rendered except the
/// terminal error page.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Couldn't read feed file '{0}'.\n{1}")]
    FileSystem(String, #[source] std::io::Error),

    #[error("Couldn't fetch feed.\n{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed responded with status {0}")]
    Status(u16),

    #[error("Malformed feed document.\n{0}")]
    Malformed(#[from] serde_json::Error),
}

/// Item-level failure of a single enrichment lookup. Always recovered by the
/// catalog loader, never shown to the user.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider responded with status {0}")]
    Status(u16),

    #[error("Couldn't reach provider.\n{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed provider response.\n{0}")]
    Decode(#[from] serde_json::Error),

    #[error("Lookup timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Couldn't clear the output directory.\n{0}")]
    Clear(#[source] std::io::Error),

    #[error("Couldn't write '{0}'.\n{1}")]
    Write(String, #[source] std::io::Error),
}
