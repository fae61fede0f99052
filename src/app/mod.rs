pub mod error;
pub mod service;

pub use error::{HeadlineError, Result};
pub use service::HeadlineService;
