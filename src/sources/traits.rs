use crate::domain::{Entry, SourceKind};
use crate::errors::MirrorResult;

#[cfg_attr(test, mockall::automock)]
pub trait EntrySource: Send + Sync {
    /// Identifies this source type
    fn source_kind(&self) -> SourceKind;

    /// Fetch the single most recently published item as an entry
    fn fetch(&self) -> MirrorResult<Entry>;
}
