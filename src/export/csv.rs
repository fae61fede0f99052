use ::csv::{QuoteStyle, WriterBuilder};

use crate::app::{HeadlineError, Result};
use crate::export::ExportEnvelope;

const HEADER: [&str; 5] = ["Title", "Link", "Published_At", "Source", "Category"];

pub(super) fn render(envelope: &ExportEnvelope) -> Result<Vec<u8>> {
    // Header row is bare; every data field is quoted
    let mut out = HEADER.join(",").into_bytes();
    out.push(b'\n');

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    for headline in &envelope.headlines {
        wtr.write_record([
            headline.title(),
            headline.link(),
            headline.published_at().display().as_deref().unwrap_or(""),
            headline.source(),
            headline.category().unwrap_or(""),
        ])
        .map_err(export_error)?;
    }

    wtr.into_inner()
        .map_err(|e| HeadlineError::Export(e.to_string()))
}

fn export_error(err: ::csv::Error) -> HeadlineError {
    HeadlineError::Export(err.to_string())
}
