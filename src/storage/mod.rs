pub mod document;
pub mod json_history;
pub mod traits;

pub use document::write_document;
pub use json_history::JsonHistoryStore;
pub use traits::HistoryRepository;
