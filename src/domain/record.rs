use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One persisted history entry, as stored in `{slug}_history.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub title: String,
    pub link: String,
    pub published: DateTime<FixedOffset>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content_html: String,
    #[serde(default)]
    pub author: Option<String>,
}
