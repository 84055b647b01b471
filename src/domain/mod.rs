pub mod entry;
pub mod feed;
pub mod record;

pub use entry::{guid_for, Entry};
pub use feed::{FeedConfig, SourceKind};
pub use record::HistoryRecord;
