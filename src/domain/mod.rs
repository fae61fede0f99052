pub mod batch;
pub mod headline;

pub use batch::FetchBatch;
pub use headline::{HeadlineRecord, PublishedAt};
