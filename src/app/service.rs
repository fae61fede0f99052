use std::sync::Arc;

use crate::app::error::{HeadlineError, Result};
use crate::cache::{CacheEntry, HeadlineCache};
use crate::config::Config;
use crate::export::{self, ExportEnvelope, ExportFormat, ExportPayload};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::filter::{self, Selection};
use crate::parser::FeedParser;

/// Query surface handed to the boundary layer. One instance per process,
/// owning the only headline cache.
pub struct HeadlineService {
    cache: HeadlineCache,
    max_limit: usize,
    default_limit: usize,
}

impl HeadlineService {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout(), &config.user_agent)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| HeadlineError::Config(e.to_string()))?;

        let parser = FeedParser::with_max_items(config.source_label.as_str(), config.fetch_size);
        let cache = HeadlineCache::new(config.feed_url.as_str(), fetcher, parser);

        Ok(Self {
            cache,
            max_limit: config.max_limit,
            default_limit: config.default_limit,
        })
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn max_limit(&self) -> usize {
        self.max_limit
    }

    /// First `limit` headlines whose title contains `filter` (ignoring
    /// case) and the number of matches in the whole cached batch.
    pub async fn query(&self, filter: &str, limit: usize) -> Result<Selection> {
        self.check_limit(limit)?;

        let entry = self.cache.get().await?;
        let selection = filter::select(entry.batch(), filter, limit);

        tracing::debug!(
            filter = %filter,
            limit,
            returned = selection.records.len(),
            total_matching = selection.total_matching,
            "Query served"
        );
        Ok(selection)
    }

    /// Run a query and render the result as `format`.
    pub async fn export(
        &self,
        format: ExportFormat,
        filter: &str,
        limit: usize,
    ) -> Result<ExportPayload> {
        let selection = self.query(filter, limit).await?;
        let envelope = ExportEnvelope::new(filter, selection.records);
        export::render(format, &envelope)
    }

    /// Forget the cached batch so the next query fetches the feed again.
    pub async fn reset(&self) {
        self.cache.reset().await;
    }

    /// The cached batch, if any, without fetching.
    pub async fn cached(&self) -> Option<Arc<CacheEntry>> {
        self.cache.peek().await
    }

    fn check_limit(&self, limit: usize) -> Result<()> {
        if limit == 0 || limit > self.max_limit {
            return Err(HeadlineError::InvalidParameter(format!(
                "limit must be between 1 and {}, got {}",
                self.max_limit, limit
            )));
        }
        Ok(())
    }
}
