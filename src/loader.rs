//! Builds the in-memory catalog: feed fetch, ordering, and the enrichment
//! fan-out.

use std::time::{Duration, Instant};

use futures::{StreamExt, stream};
use indicatif::ProgressBar;
use tracing::{error, info, warn};

use crate::client::EnrichmentClient;
use crate::error::{FeedError, ProviderError};
use crate::feed::{FeedSource, parse_feed};
use crate::model::{Catalog, EnrichedProject, ProjectRecord};
use crate::provider::StatsProvider;

/// How many enrichment lookups may be in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Ceiling for a single enrichment lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct CatalogLoader<F, P> {
    feed: F,
    client: EnrichmentClient<P>,
    concurrency: usize,
    timeout: Duration,
    progress: ProgressBar,
}

impl<F, P> CatalogLoader<F, P>
where
    F: FeedSource,
    P: StatsProvider,
{
    pub fn new(feed: F, client: EnrichmentClient<P>) -> Self {
        Self {
            feed,
            client,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reports enrichment progress on `bar`, one tick per settled project.
    pub fn progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    pub fn client(&self) -> &EnrichmentClient<P> {
        &self.client
    }

    /// Loads the feed and enriches every project.
    ///
    /// Fails only when the feed itself cannot be fetched or parsed. Each
    /// enrichment failure is contained to its own project, which ends up with
    /// no statistics. The returned catalog is complete: every lookup has
    /// settled before it is assembled.
    pub async fn load_catalog(&self) -> Result<Catalog, FeedError> {
        let s = Instant::now();

        let text = self
            .feed
            .fetch()
            .await
            .inspect_err(|err| error!("failed to fetch project feed: {err}"))?;

        let mut records = parse_feed(&text)
            .inspect_err(|err| error!("failed to parse project feed: {err}"))?;

        records.sort_by_key(|record| record.order);

        info!(projects = records.len(), "loaded project feed");

        self.progress.set_length(records.len() as u64);
        self.progress.set_message("Fetching repository statistics");

        let projects: Vec<EnrichedProject> = stream::iter(records)
            .map(|record| self.enrich(record))
            .buffered(self.concurrency)
            .collect()
            .await;

        let enriched = projects.iter().filter(|p| p.stats.is_some()).count();
        info!(
            projects = projects.len(),
            enriched,
            elapsed_ms = s.elapsed().as_millis() as u64,
            "catalog ready"
        );

        self.progress.finish_with_message(format!(
            "Enriched {enriched}/{} projects {}",
            projects.len(),
            crate::io::as_overhead(s)
        ));

        Ok(Catalog::new(projects))
    }

    async fn enrich(&self, record: ProjectRecord) -> EnrichedProject {
        if !record.enrich {
            self.progress.inc(1);
            return EnrichedProject::new(record, None);
        }

        let lookup = self.client.fetch_enrichment(&record.repo);
        let result = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        };

        let stats = match result {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!(repo = %record.repo, "failed to load repository statistics: {err}");
                None
            }
        };

        self.progress.inc(1);
        EnrichedProject::new(record, stats)
    }
}
