use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::app::{HeadlineError, Result};
use crate::domain::HeadlineRecord;
use crate::export::ExportEnvelope;

#[derive(Serialize)]
struct JsonExport<'a> {
    export_date: String,
    total_items: usize,
    filter_applied: &'a str,
    headlines: &'a [HeadlineRecord],
}

fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(super) fn render(envelope: &ExportEnvelope) -> Result<Vec<u8>> {
    let export = JsonExport {
        export_date: iso8601(envelope.exported_at),
        total_items: envelope.total_items(),
        filter_applied: &envelope.filter,
        headlines: &envelope.headlines,
    };

    serde_json::to_vec_pretty(&export).map_err(|e| HeadlineError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    use crate::domain::PublishedAt;

    fn envelope(filter: &str, count: usize) -> ExportEnvelope {
        let headlines = (0..count)
            .map(|i| {
                HeadlineRecord::new(
                    format!("Wahl {i}"),
                    format!("https://example.com/{i}"),
                    PublishedAt::parse(Some("Tue, 05 Mar 2024 14:07:09 +0000")),
                    "example",
                )
            })
            .collect();
        ExportEnvelope {
            exported_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap(),
            filter: filter.into(),
            headlines,
        }
    }

    #[test]
    fn test_json_envelope_fields() {
        let body = render(&envelope("wahl", 3)).unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["export_date"], "2024-03-05T14:07:09Z");
        assert_eq!(value["total_items"], 3);
        assert_eq!(value["filter_applied"], "wahl");
        assert_eq!(value["headlines"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_json_headline_shape() {
        let body = render(&envelope("", 1)).unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        let headline = &value["headlines"][0];

        assert_eq!(value["filter_applied"], "");
        assert_eq!(headline["title"], "Wahl 0");
        assert_eq!(headline["link"], "https://example.com/0");
        assert_eq!(headline["publishedAt"], "2024-03-05T14:07:09+00:00");
        assert_eq!(headline["source"], "example");
    }

    #[test]
    fn test_json_empty() {
        let body = render(&envelope("nothing", 0)).unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["total_items"], 0);
        assert!(value["headlines"].as_array().unwrap().is_empty());
    }
}
