#![forbid(unsafe_code)]
//! A searchable, filterable gallery of project cards.
//!
//! The gallery is built from a static JSON feed of projects. Every project is
//! enriched with live repository statistics (stars, forks, language) from a
//! GitHub-compatible API; a failed lookup only costs that one card its
//! statistics. The result is rendered to a single HTML document which filters
//! itself in the browser, while [`Gallery`] exposes the same filtering and
//! event handling to Rust callers.

mod error;
mod io;

pub mod cache;
pub mod client;
pub mod feed;
pub mod filter;
pub mod gallery;
pub mod loader;
pub mod model;
pub mod output;
pub mod provider;
pub mod render;

use std::sync::Arc;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};
use console::style;
use tracing::info;

pub use crate::cache::EnrichmentCache;
pub use crate::client::EnrichmentClient;
pub use crate::error::*;
pub use crate::feed::{FeedLocation, FeedSource};
pub use crate::filter::{FilterState, ResultCount, VisibleSet, apply_filters};
pub use crate::gallery::{ClickTarget, Effect, Event, Gallery};
pub use crate::loader::CatalogLoader;
pub use crate::model::{Catalog, Contributor, EnrichedProject, EnrichmentResult, ProjectRecord};
pub use crate::output::Output;
pub use crate::provider::{HttpProvider, StatsProvider};
pub use crate::render::{PageOptions, PageState, View};

/// Default statistics provider endpoint.
pub const DEFAULT_PROVIDER: &str = "https://api.github.com/repos";

const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));

/// Settings of a gallery build.
///
/// ```rust,no_run
/// use vitrine::Config;
///
/// Config::new()
///     .feed("data/projects.json")
///     .out_dir("public")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    feed: FeedLocation,
    provider: String,
    web_base: String,
    out_dir: Utf8PathBuf,
    timeout: Duration,
    concurrency: usize,
    user_agent: String,
    page: PageOptions,
    progress: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            feed: FeedLocation::default(),
            provider: DEFAULT_PROVIDER.to_string(),
            web_base: render::DEFAULT_WEB_BASE.to_string(),
            out_dir: "dist".into(),
            timeout: loader::DEFAULT_TIMEOUT,
            concurrency: loader::DEFAULT_CONCURRENCY,
            user_agent: USER_AGENT.to_string(),
            page: PageOptions::default(),
            progress: false,
        }
    }

    /// Location of the project feed, a file path or an `http(s)://` URL.
    pub fn feed(mut self, location: &str) -> Self {
        self.feed = FeedLocation::parse(location);
        self
    }

    /// Base address of the statistics API; lookups go to `<base>/<owner>/<name>`.
    pub fn provider(mut self, base: impl Into<String>) -> Self {
        self.provider = base.into();
        self
    }

    /// Base address for contributor profiles and fallback repository links.
    pub fn web_base(mut self, base: impl Into<String>) -> Self {
        self.web_base = base.into();
        self
    }

    pub fn out_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn page(mut self, page: PageOptions) -> Self {
        self.page = page;
        self
    }

    /// Show a progress bar on stderr while statistics are fetched.
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn out(&self) -> &Utf8Path {
        &self.out_dir
    }

    /// Loads the catalog, using `cache` for enrichment lookups.
    pub async fn load(&self, cache: Arc<EnrichmentCache>) -> Result<Catalog, FeedError> {
        let provider = HttpProvider::new(&self.provider, &self.user_agent);
        let client = EnrichmentClient::new(provider, cache);

        let mut loader = CatalogLoader::new(self.feed.clone(), client)
            .concurrency(self.concurrency)
            .timeout(self.timeout);

        if self.progress {
            loader = loader.progress(io::progress_bar());
        }

        loader.load_catalog().await
    }

    /// Renders the documents shown while the catalog is still loading.
    pub fn loading_pages(&self) -> Vec<Output> {
        vec![Output::html("index", render::render_page(PageState::Loading, &self.page))]
    }

    /// Renders the documents for a load outcome. A failed load yields only
    /// the error page.
    pub fn pages(&self, catalog: Result<&Catalog, &FeedError>) -> Vec<Output> {
        let html = match catalog {
            Ok(catalog) => {
                let gallery = Gallery::new(catalog.clone(), &self.web_base);
                let view = gallery.view();
                render::render_page(PageState::Ready(&view), &self.page)
            }
            Err(_) => render::render_page(PageState::Failed, &self.page),
        };

        vec![Output::html("index", html)]
    }

    /// Loads the feed, enriches it and writes the gallery to the output
    /// directory.
    pub fn build(&self) -> Result<(), VitrineError> {
        eprintln!(
            "Running {} for {}",
            style("vitrine").red(),
            style(&self.feed).blue()
        );

        let s = Instant::now();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(VitrineError::RuntimeBuild)?;

        // replaced once the load settles
        output::clear_dir(&self.out_dir)?;
        output::save_outputs(&self.out_dir, &self.loading_pages())?;

        let result = runtime.block_on(self.load(Arc::new(EnrichmentCache::new())));

        output::save_outputs(&self.out_dir, &self.pages(result.as_ref()))?;

        let catalog = result?;

        info!(projects = catalog.len(), out = %self.out_dir, "gallery written");
        eprintln!(
            "Wrote {} projects to {} {}",
            catalog.len(),
            style(&self.out_dir).blue(),
            io::as_overhead(s)
        );

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
