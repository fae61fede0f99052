//! JSON and CSV rendering of a headline selection.

mod csv;
mod json;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::app::{HeadlineError, Result};
use crate::domain::HeadlineRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json; charset=utf-8",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = HeadlineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(HeadlineError::InvalidParameter(format!(
                "unsupported export format {other:?} (expected json or csv)"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Headlines plus the metadata written alongside them.
#[derive(Debug, Clone)]
pub struct ExportEnvelope {
    pub exported_at: DateTime<Utc>,
    pub filter: String,
    pub headlines: Vec<HeadlineRecord>,
}

impl ExportEnvelope {
    pub fn new(filter: impl Into<String>, headlines: Vec<HeadlineRecord>) -> Self {
        Self {
            exported_at: Utc::now(),
            filter: filter.into(),
            headlines,
        }
    }

    pub fn total_items(&self) -> usize {
        self.headlines.len()
    }
}

/// Rendered export, ready for a response body or a file.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

pub fn render(format: ExportFormat, envelope: &ExportEnvelope) -> Result<ExportPayload> {
    let body = match format {
        ExportFormat::Json => json::render(envelope)?,
        ExportFormat::Csv => csv::render(envelope)?,
    };

    Ok(ExportPayload {
        body,
        content_type: format.content_type(),
        filename: suggested_filename(format, &envelope.filter, envelope.exported_at),
    })
}

/// `headlines[_<filter>]_<timestamp>.<ext>`; the filter is reduced to
/// characters that are safe in a filename.
pub fn suggested_filename(format: ExportFormat, filter: &str, at: DateTime<Utc>) -> String {
    let stamp = at.format("%Y%m%d_%H%M%S");
    let filter: String = filter
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if filter.is_empty() {
        format!("headlines_{}.{}", stamp, format.extension())
    } else {
        format!("headlines_{}_{}.{}", filter, stamp, format.extension())
    }
}
