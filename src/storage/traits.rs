use std::path::Path;

use crate::domain::HistoryRecord;
use crate::errors::MirrorResult;

#[cfg_attr(test, mockall::automock)]
pub trait HistoryRepository: Send + Sync {
    /// Stored records, newest first; empty when the store is missing or unreadable
    fn load(&self, path: &Path) -> Vec<HistoryRecord>;

    /// Replace the stored records with `records`
    fn save(&self, path: &Path, records: &[HistoryRecord]) -> MirrorResult<()>;
}
