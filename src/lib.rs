//! # Headlines
//!
//! Top-N headline queries over a single RSS 2.0 feed.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Parser → Cache → Filter → Export
//! ```
//!
//! - [`fetcher`]: HTTP retrieval of the raw feed with a bounded timeout
//! - [`parser`]: RSS 2.0 decoding into ordered headline records
//! - [`cache`]: Single-entry, single-flight cache of the parsed batch
//! - [`filter`]: Case-insensitive title filter, applied before the limit
//! - [`export`]: JSON and CSV rendering with export metadata
//!
//! ## Quick Start
//!
//! ```bash
//! # Five newest headlines
//! headlines top
//!
//! # Headlines mentioning "politik", at most ten
//! headlines top --filter politik --limit 10
//!
//! # Export as CSV
//! headlines export --format csv --filter politik
//! ```

/// Query service and error types.
///
/// [`HeadlineService`](app::HeadlineService) wires fetcher, parser and
/// cache together and exposes `query`, `export` and `reset`.
pub mod app;

/// Headline cache.
///
/// - [`HeadlineCache`](cache::HeadlineCache): holds at most one parsed batch
/// - [`CacheEntry`](cache::CacheEntry): the batch and its capture time
pub mod cache;

/// Command-line interface using clap.
///
/// - `top [--filter F] [--limit N]` - Print matching headlines
/// - `export --format json|csv` - Write an export file
/// - `config` - Show the resolved configuration
pub mod cli;

/// Configuration loaded from `~/.config/headlines/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`HeadlineRecord`](domain::HeadlineRecord): one feed item
/// - [`PublishedAt`](domain::PublishedAt): parsed, raw or missing publish date
/// - [`FetchBatch`](domain::FetchBatch): ordered records from one fetch
pub mod domain;

/// JSON and CSV export.
pub mod export;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed retrieval
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Filtering and limiting of a cached batch.
pub mod filter;

/// RSS 2.0 parsing.
pub mod parser;
