use thiserror::Error;

use crate::fetcher::FetchError;
use crate::parser::ParseError;

#[derive(Error, Debug)]
pub enum HeadlineError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Feed parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export error: {0}")]
    Export(String),
}

impl HeadlineError {
    /// True for failures of the upstream feed (fetch or parse), which a
    /// boundary layer usually surfaces as "service unavailable".
    pub fn is_upstream(&self) -> bool {
        matches!(self, HeadlineError::Fetch(_) | HeadlineError::Parse(_))
    }
}

pub type Result<T> = std::result::Result<T, HeadlineError>;
