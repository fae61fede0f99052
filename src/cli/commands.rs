use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app::{HeadlineError, HeadlineService, Result};
use crate::config::Config;
use crate::domain::HeadlineRecord;
use crate::export::ExportFormat;

pub async fn top(service: &HeadlineService, filter: &str, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(service.default_limit());
    let selection = service.query(filter, limit).await?;

    if selection.records.is_empty() {
        if filter.is_empty() {
            println!("No headlines");
        } else {
            println!("No headlines matching \"{}\"", filter);
        }
        return Ok(());
    }

    for (i, record) in selection.records.iter().enumerate() {
        print_record(i + 1, record);
    }

    println!(
        "\nShowing {} of {} matching headlines",
        selection.records.len(),
        selection.total_matching
    );
    Ok(())
}

fn print_record(position: usize, record: &HeadlineRecord) {
    println!("{:>2}. {}", position, record.title());
    println!("    {}", record.link());
    if let Some(published) = record.published_at().display() {
        println!("    {} | {}", published, record.source());
    } else {
        println!("    {}", record.source());
    }
}

pub async fn export(
    service: &HeadlineService,
    format: &str,
    filter: &str,
    limit: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let limit = limit.unwrap_or(service.default_limit());
    let payload = service.export(format, filter, limit).await?;

    match output {
        Some(path) if path == Path::new("-") => {
            std::io::stdout().write_all(&payload.body)?;
        }
        _ => {
            let path = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(&payload.filename));
            std::fs::write(&path, &payload.body)?;
            println!(
                "Exported {} ({}, {} bytes)",
                path.display(),
                payload.content_type,
                payload.body.len()
            );
        }
    }

    Ok(())
}

pub fn show_config(config: &Config, path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::default_config_path().map_err(|e| HeadlineError::Config(e.to_string()))?,
    };
    let rendered = toml::to_string_pretty(config).map_err(|e| HeadlineError::Config(e.to_string()))?;

    println!("# {}", path.display());
    print!("{}", rendered);
    Ok(())
}
