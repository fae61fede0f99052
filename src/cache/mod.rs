//! Single-entry headline cache with single-flight population.
//!
//! Readers take a snapshot (`Arc<CacheEntry>`) under a short read lock.
//! A miss serialises on `populate` so concurrent callers share one
//! fetch+parse; a failed fetch leaves the previous state untouched.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::app::Result;
use crate::domain::FetchBatch;
use crate::fetcher::Fetcher;
use crate::parser::FeedParser;

/// The currently held batch and when it was captured.
#[derive(Debug)]
pub struct CacheEntry {
    batch: FetchBatch,
    captured_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(batch: FetchBatch) -> Self {
        Self {
            batch,
            captured_at: Utc::now(),
        }
    }

    pub fn batch(&self) -> &FetchBatch {
        &self.batch
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }
}

pub struct HeadlineCache {
    feed_url: String,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parser: FeedParser,
    entry: RwLock<Option<Arc<CacheEntry>>>,
    populate: Mutex<()>,
}

impl HeadlineCache {
    pub fn new(
        feed_url: impl Into<String>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        parser: FeedParser,
    ) -> Self {
        Self {
            feed_url: feed_url.into(),
            fetcher,
            parser,
            entry: RwLock::new(None),
            populate: Mutex::new(()),
        }
    }

    /// Return the live entry, fetching and parsing the feed on a miss.
    pub async fn get(&self) -> Result<Arc<CacheEntry>> {
        if let Some(entry) = self.peek().await {
            tracing::debug!(items = entry.len(), "Headline cache hit");
            return Ok(entry);
        }

        let _guard = self.populate.lock().await;

        // Another caller may have filled the cache while we waited
        if let Some(entry) = self.peek().await {
            tracing::debug!(items = entry.len(), "Headline cache filled by concurrent caller");
            return Ok(entry);
        }

        let started = Instant::now();
        let body = self.fetcher.fetch(&self.feed_url).await?;
        let batch = self.parser.parse(&body)?;
        let entry = Arc::new(CacheEntry::new(batch));

        *self.entry.write().await = Some(entry.clone());
        tracing::info!(
            url = %self.feed_url,
            items = entry.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Headline cache populated"
        );

        Ok(entry)
    }

    /// Current entry without triggering a fetch.
    pub async fn peek(&self) -> Option<Arc<CacheEntry>> {
        self.entry.read().await.clone()
    }

    /// Drop the current entry; the next `get` fetches again.
    pub async fn reset(&self) {
        if self.entry.write().await.take().is_some() {
            tracing::info!("Headline cache reset");
        }
    }
}
