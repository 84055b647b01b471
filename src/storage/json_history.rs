use std::fs;
use std::path::Path;

use tracing::warn;

use crate::domain::HistoryRecord;
use crate::errors::{MirrorError, MirrorResult};
use crate::storage::document::write_atomic;
use crate::storage::traits::HistoryRepository;

/// History kept as one pretty-printed JSON array per feed
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHistoryStore;

impl JsonHistoryStore {
    pub fn new() -> Self {
        Self
    }

    fn read_records(path: &Path) -> MirrorResult<Vec<HistoryRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| MirrorError::MalformedHistory(e.to_string()))
    }
}

impl HistoryRepository for JsonHistoryStore {
    fn load(&self, path: &Path) -> Vec<HistoryRecord> {
        match Self::read_records(path) {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Starting from empty history");
                Vec::new()
            }
        }
    }

    fn save(&self, path: &Path, records: &[HistoryRecord]) -> MirrorResult<()> {
        let payload = serde_json::to_string_pretty(records)?;
        write_atomic(path, payload.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use tempfile::TempDir;

    use super::*;

    fn record(n: u32) -> HistoryRecord {
        HistoryRecord {
            id: format!("id-{}", n),
            title: format!("Entry {}", n),
            link: format!("https://example.test/{}", n),
            published: DateTime::parse_from_rfc3339("2024-03-17T09:00:00+01:00").unwrap(),
            summary: "summary".to_string(),
            content_html: "<p>summary</p>".to_string(),
            author: if n % 2 == 0 { Some("Jane Roe".to_string()) } else { None },
        }
    }

    #[test]
    fn test_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonHistoryStore::new();
        assert!(store.load(&dir.path().join("nothing.json")).is_empty());
    }

    #[test]
    fn test_invalid_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("journal9_history.json");
        fs::write(&path, "[{\"id\": \"abc\", ").unwrap();

        let store = JsonHistoryStore::new();
        assert!(store.load(&path).is_empty());
    }

    #[test]
    fn test_wrong_shape_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"entries": []}"#).unwrap();

        assert!(JsonHistoryStore::new().load(&path).is_empty());
    }

    #[test]
    fn test_save_creates_directories_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/data/feed_history.json");
        let records = vec![record(2), record(1)];

        let store = JsonHistoryStore::new();
        store.save(&path, &records).unwrap();

        assert_eq!(store.load(&path), records);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonHistoryStore::new();

        store.save(&path, &[record(3), record(2), record(1)]).unwrap();
        store.save(&path, &[record(4)]).unwrap();

        assert_eq!(store.load(&path), vec![record(4)]);
    }

    #[test]
    fn test_saved_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        JsonHistoryStore::new().save(&path, &[record(1)]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value[0];

        assert_eq!(first["id"], "id-1");
        assert_eq!(first["published"], "2024-03-17T09:00:00+01:00");
        assert_eq!(first["content_html"], "<p>summary</p>");
        assert!(first["author"].is_null());
    }
}
