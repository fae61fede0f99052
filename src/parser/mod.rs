//! RSS 2.0 parsing into a [`FetchBatch`].
//!
//! The document is walked with `quick-xml`'s pull reader rather than
//! deserialized, so an item with a bad date or a repeated element never
//! fails the whole batch. Only unprefixed element names are recognised;
//! `media:title`, `atom:link` and friends are ignored.

use html_escape::decode_html_entities;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use url::Url;

use crate::domain::{FetchBatch, HeadlineRecord, PublishedAt};

/// Default number of items retained from a single document.
pub const DEFAULT_MAX_ITEMS: usize = 100;

const ROOT_DEPTH: usize = 1;
const CHANNEL_DEPTH: usize = 2;
const ITEM_DEPTH: usize = 3;
const FIELD_DEPTH: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Xml(String),
    #[error("not an RSS document (root element <{0}>)")]
    NotRss(String),
    #[error("feed has no <channel> element")]
    MissingChannel,
    #[error("feed contains no usable items")]
    NoItems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    PubDate,
    Category,
}

#[derive(Debug, Default)]
struct RawItem {
    title: String,
    link: String,
    pub_date: Option<String>,
    category: Option<String>,
}

impl RawItem {
    fn push(&mut self, field: Field, text: &str) {
        match field {
            Field::Title => self.title.push_str(text),
            Field::Link => self.link.push_str(text),
            Field::PubDate => self.pub_date.get_or_insert_with(String::new).push_str(text),
            Field::Category => self.category.get_or_insert_with(String::new).push_str(text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedParser {
    source_label: String,
    max_items: usize,
}

impl FeedParser {
    pub fn new(source_label: impl Into<String>) -> Self {
        Self::with_max_items(source_label, DEFAULT_MAX_ITEMS)
    }

    pub fn with_max_items(source_label: impl Into<String>, max_items: usize) -> Self {
        Self {
            source_label: source_label.into(),
            max_items,
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Decode an RSS 2.0 document. Items keep document order; at most
    /// `max_items` usable items are returned.
    pub fn parse(&self, body: &[u8]) -> Result<FetchBatch, ParseError> {
        let mut reader = Reader::from_reader(body);
        let mut buf = Vec::new();

        let mut depth: usize = 0;
        let mut saw_channel = false;
        let mut in_channel = false;
        let mut current: Option<RawItem> = None;
        let mut field: Option<Field> = None;
        let mut records = Vec::new();
        let mut dropped = 0usize;

        loop {
            match reader
                .read_event_into(&mut buf)
                .map_err(|e| ParseError::Xml(e.to_string()))?
            {
                Event::Start(e) => {
                    depth += 1;
                    let name = e.name();
                    match depth {
                        ROOT_DEPTH => check_root(name.as_ref())?,
                        CHANNEL_DEPTH if name.as_ref() == b"channel" && !saw_channel => {
                            saw_channel = true;
                            in_channel = true;
                        }
                        ITEM_DEPTH if in_channel && name.as_ref() == b"item" => {
                            current = Some(RawItem::default());
                        }
                        FIELD_DEPTH if current.is_some() => {
                            field = match name.as_ref() {
                                b"title" => Some(Field::Title),
                                b"link" => Some(Field::Link),
                                b"pubDate" => Some(Field::PubDate),
                                b"category"
                                    if current.as_ref().is_some_and(|i| i.category.is_none()) =>
                                {
                                    Some(Field::Category)
                                }
                                _ => None,
                            };
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    let name = e.name();
                    match depth + 1 {
                        ROOT_DEPTH => check_root(name.as_ref())?,
                        CHANNEL_DEPTH if name.as_ref() == b"channel" => saw_channel = true,
                        ITEM_DEPTH if in_channel && name.as_ref() == b"item" => dropped += 1,
                        _ => {}
                    }
                }
                // Markup nested inside a field contributes its text
                Event::Text(e) if depth >= FIELD_DEPTH => {
                    if let (Some(item), Some(f)) = (current.as_mut(), field) {
                        item.push(f, &decode_html_entities(&String::from_utf8_lossy(&e)));
                    }
                }
                // CDATA is literal; no entity decoding
                Event::CData(e) if depth >= FIELD_DEPTH => {
                    if let (Some(item), Some(f)) = (current.as_mut(), field) {
                        item.push(f, &String::from_utf8_lossy(&e));
                    }
                }
                Event::End(_) => {
                    match depth {
                        FIELD_DEPTH => field = None,
                        ITEM_DEPTH => {
                            if let Some(raw) = current.take() {
                                match self.build_record(raw) {
                                    Some(record) => records.push(record),
                                    None => dropped += 1,
                                }
                                if records.len() >= self.max_items {
                                    break;
                                }
                            }
                        }
                        CHANNEL_DEPTH => in_channel = false,
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => {
                    if depth != 0 {
                        return Err(ParseError::Xml("unexpected end of document".into()));
                    }
                    break;
                }
                _ => {}
            }
            buf.clear();
        }

        if !saw_channel {
            return Err(ParseError::MissingChannel);
        }
        if dropped > 0 {
            tracing::warn!(dropped, kept = records.len(), "Dropped feed items without title or link");
        }
        if records.is_empty() {
            return Err(ParseError::NoItems);
        }

        Ok(FetchBatch::new(records))
    }

    fn build_record(&self, raw: RawItem) -> Option<HeadlineRecord> {
        let title = clean(&raw.title);
        if title.is_empty() {
            return None;
        }

        let link = clean(&raw.link);
        if let Err(e) = Url::parse(&link) {
            tracing::debug!(title = %title, link = %link, error = %e, "Item link is not a URL");
            return None;
        }

        let published_at = PublishedAt::parse(raw.pub_date.as_deref());
        if let PublishedAt::Raw(ref value) = published_at {
            tracing::warn!(title = %title, pub_date = %value, "Keeping unparsable pubDate verbatim");
        }

        let category = raw
            .category
            .map(|c| clean(&c))
            .filter(|c| !c.is_empty());

        Some(
            HeadlineRecord::new(title, link, published_at, self.source_label.as_str())
                .with_category(category),
        )
    }
}

fn check_root(name: &[u8]) -> Result<(), ParseError> {
    if name == b"rss" {
        Ok(())
    } else {
        Err(ParseError::NotRss(String::from_utf8_lossy(name).into_owned()))
    }
}

fn clean(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com/</link>
    <atom:link href="https://example.com/feed.xml" rel="self"/>
    <image>
      <title>Logo</title>
      <url>https://example.com/logo.png</url>
      <link>https://example.com/</link>
    </image>
    <item>
      <title>Bundestag beschlie&#223;t Haushalt</title>
      <link>https://example.com/item1</link>
      <pubDate>Mon, 01 Jan 2024 10:00:00 +0100</pubDate>
      <category>Inland</category>
      <category>Politik</category>
      <media:title>ignored</media:title>
    </item>
    <item>
      <title><![CDATA[Tom & Jerry "live"]]></title>
      <link>https://example.com/item2</link>
      <pubDate>not a date</pubDate>
    </item>
    <item>
      <title>Third &amp; last</title>
      <link> https://example.com/item3 </link>
    </item>
  </channel>
</rss>"#;

    fn parser() -> FeedParser {
        FeedParser::new("example")
    }

    fn rss_with_items(count: usize) -> String {
        let items: String = (1..=count)
            .map(|i| {
                format!(
                    "<item><title>Item {i}</title><link>https://example.com/{i}</link></item>"
                )
            })
            .collect();
        format!(r#"<rss version="2.0"><channel><title>T</title>{items}</channel></rss>"#)
    }

    #[test]
    fn test_parse_rss() {
        let batch = parser().parse(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].title(), "Bundestag beschließt Haushalt");
        assert_eq!(batch[0].link(), "https://example.com/item1");
        assert_eq!(batch[0].source(), "example");
        assert!(batch[0].published_at().is_parsed());
        assert_eq!(batch[0].category(), Some("Inland"));
    }

    #[test]
    fn test_cdata_title() {
        let batch = parser().parse(RSS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(batch[1].title(), r#"Tom & Jerry "live""#);
    }

    #[test]
    fn test_bad_date_keeps_record() {
        let batch = parser().parse(RSS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            batch[1].published_at(),
            &PublishedAt::Raw("not a date".into())
        );
        assert_eq!(batch[2].published_at(), &PublishedAt::Missing);
    }

    #[test]
    fn test_entities_and_whitespace() {
        let batch = parser().parse(RSS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(batch[2].title(), "Third & last");
        assert_eq!(batch[2].link(), "https://example.com/item3");
    }

    #[test]
    fn test_document_order_preserved() {
        let batch = parser().parse(rss_with_items(30).as_bytes()).unwrap();
        let titles: Vec<_> = batch.iter().map(|r| r.title().to_string()).collect();
        let expected: Vec<_> = (1..=30).map(|i| format!("Item {i}")).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_item_ceiling() {
        let batch = FeedParser::with_max_items("example", 50)
            .parse(rss_with_items(80).as_bytes())
            .unwrap();
        assert_eq!(batch.len(), 50);
        assert_eq!(batch[49].title(), "Item 50");
    }

    #[test]
    fn test_default_ceiling_retains_large_working_set() {
        let batch = parser().parse(rss_with_items(60).as_bytes()).unwrap();
        assert_eq!(batch.len(), 60);
    }

    #[test]
    fn test_items_without_title_or_link_dropped() {
        let xml = r#"<rss version="2.0"><channel>
            <item><link>https://example.com/no-title</link></item>
            <item><title>   </title><link>https://example.com/blank</link></item>
            <item><title>No link</title></item>
            <item><title>Bad link</title><link>not a url</link></item>
            <item/>
            <item><title>Kept</title><link>https://example.com/kept</link></item>
        </channel></rss>"#;
        let batch = parser().parse(xml.as_bytes()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].title(), "Kept");
    }

    #[test]
    fn test_malformed_xml() {
        let result = parser().parse(b"<rss version=\"2.0\"><channel><item></channel></rss>");
        assert!(matches!(result, Err(ParseError::Xml(_))));
    }

    #[test]
    fn test_truncated_document() {
        let result = parser().parse(b"<rss version=\"2.0\"><channel><item><title>x</title>");
        assert!(matches!(result, Err(ParseError::Xml(_))));
    }

    #[test]
    fn test_missing_channel() {
        let result = parser().parse(b"<rss version=\"2.0\"></rss>");
        assert_eq!(result, Err(ParseError::MissingChannel));
    }

    #[test]
    fn test_empty_channel_is_no_items() {
        let result = parser().parse(b"<rss version=\"2.0\"><channel><title>T</title></channel></rss>");
        assert_eq!(result, Err(ParseError::NoItems));

        let result = parser().parse(b"<rss version=\"2.0\"><channel/></rss>");
        assert_eq!(result, Err(ParseError::NoItems));
    }

    #[test]
    fn test_atom_rejected() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>A</title></feed>"#;
        let result = parser().parse(xml.as_bytes());
        assert_eq!(result, Err(ParseError::NotRss("feed".into())));
    }

    #[test]
    fn test_newline_in_title_preserved() {
        let xml = "<rss version=\"2.0\"><channel><item><title>Line one\nLine two</title>\
                   <link>https://example.com/a</link></item></channel></rss>";
        let batch = parser().parse(xml.as_bytes()).unwrap();
        assert_eq!(batch[0].title(), "Line one\nLine two");
    }

    #[test]
    fn test_cdata_is_not_entity_decoded() {
        let xml = "<rss version=\"2.0\"><channel><item>\
                   <title><![CDATA[AT&amp;T fusion]]></title>\
                   <link>https://example.com/a</link></item></channel></rss>";
        let batch = parser().parse(xml.as_bytes()).unwrap();
        assert_eq!(batch[0].title(), "AT&amp;T fusion");
    }

    #[test]
    fn test_mixed_text_and_cdata() {
        let xml = "<rss version=\"2.0\"><channel><item>\
                   <title>Q&amp;A: <![CDATA[<b>&lt;live&gt;</b>]]></title>\
                   <link>https://example.com/a</link></item></channel></rss>";
        let batch = parser().parse(xml.as_bytes()).unwrap();
        assert_eq!(batch[0].title(), "Q&A: <b>&lt;live&gt;</b>");
    }

    #[test]
    fn test_nested_markup_text_kept() {
        let xml = "<rss version=\"2.0\"><channel><item>\
                   <title>Foo <b>bar</b> baz</title>\
                   <link>https://example.com/a</link></item></channel></rss>";
        let batch = parser().parse(xml.as_bytes()).unwrap();
        assert_eq!(batch[0].title(), "Foo bar baz");
    }
}
