use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};

/// Publish timestamp as reported by the feed.
///
/// A feed that carries an unparsable date still yields a record; the text
/// is kept verbatim so nothing the source reported is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishedAt {
    Parsed(DateTime<FixedOffset>),
    Raw(String),
    Missing,
}

impl PublishedAt {
    /// Parse a `pubDate` value. RFC 2822 is the RSS 2.0 format; RFC 3339 is
    /// accepted as well since some feeds emit it anyway.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return PublishedAt::Missing;
        };

        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(PublishedAt::Parsed)
            .unwrap_or_else(|_| PublishedAt::Raw(raw.to_string()))
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, PublishedAt::Parsed(_))
    }

    /// Text form used by the exporters; `None` when the feed gave no date.
    pub fn display(&self) -> Option<String> {
        match self {
            PublishedAt::Parsed(dt) => Some(dt.to_rfc3339()),
            PublishedAt::Raw(raw) => Some(raw.clone()),
            PublishedAt::Missing => None,
        }
    }
}

impl Serialize for PublishedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.display() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

/// One news item from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlineRecord {
    title: String,
    link: String,
    #[serde(rename = "publishedAt")]
    published_at: PublishedAt,
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl HeadlineRecord {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        published_at: PublishedAt,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            published_at,
            source: source.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn published_at(&self) -> &PublishedAt {
        &self.published_at
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc2822() {
        let published = PublishedAt::parse(Some("Mon, 01 Jan 2024 10:30:00 +0100"));
        assert!(published.is_parsed());
        assert_eq!(
            published.display().as_deref(),
            Some("2024-01-01T10:30:00+01:00")
        );
    }

    #[test]
    fn test_parse_rfc3339_best_effort() {
        let published = PublishedAt::parse(Some("2024-01-01T00:00:00Z"));
        assert!(published.is_parsed());
    }

    #[test]
    fn test_unparsable_date_kept_raw() {
        let published = PublishedAt::parse(Some("  gestern, 12 Uhr "));
        assert_eq!(published, PublishedAt::Raw("gestern, 12 Uhr".into()));
        assert_eq!(published.display().as_deref(), Some("gestern, 12 Uhr"));
    }

    #[test]
    fn test_missing_date() {
        assert_eq!(PublishedAt::parse(None), PublishedAt::Missing);
        assert_eq!(PublishedAt::parse(Some("   ")), PublishedAt::Missing);
        assert_eq!(PublishedAt::Missing.display(), None);
    }

    #[test]
    fn test_serialize_field_names() {
        let record = HeadlineRecord::new(
            "Title",
            "https://example.com/a",
            PublishedAt::Missing,
            "example",
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["title"], "Title");
        assert_eq!(value["link"], "https://example.com/a");
        assert!(value["publishedAt"].is_null());
        assert_eq!(value["source"], "example");
        assert!(value.get("category").is_none());
    }

    #[test]
    fn test_serialize_category_when_present() {
        let record = HeadlineRecord::new("T", "https://e.com", PublishedAt::Missing, "s")
            .with_category(Some("Inland".into()));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["category"], "Inland");
    }
}
