use chrono::{DateTime, FixedOffset};
use sha1::{Digest, Sha1};

use super::HistoryRecord;

/// Stable identity for a link: lowercase hex SHA-1 of its UTF-8 bytes
pub fn guid_for(link: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(link.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub published: DateTime<FixedOffset>,
    pub summary: String,
    pub content_html: String,
    pub author: Option<String>,
}

impl Entry {
    pub fn new(
        title: String,
        link: String,
        published: DateTime<FixedOffset>,
        summary: String,
        content_html: String,
    ) -> Self {
        Self {
            title,
            link,
            published,
            summary,
            content_html,
            author: None,
        }
    }

    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    pub fn guid(&self) -> String {
        guid_for(&self.link)
    }

    /// Body used for the feed item: the HTML body when present, else the summary
    pub fn description(&self) -> &str {
        if self.content_html.is_empty() {
            &self.summary
        } else {
            &self.content_html
        }
    }

    pub fn to_record(&self) -> HistoryRecord {
        HistoryRecord {
            id: self.guid(),
            title: self.title.clone(),
            link: self.link.clone(),
            published: self.published,
            summary: self.summary.clone(),
            content_html: self.content_html.clone(),
            author: self.author.clone(),
        }
    }

    pub fn from_record(record: &HistoryRecord) -> Self {
        Self {
            title: record.title.clone(),
            link: record.link.clone(),
            published: record.published,
            summary: record.summary.clone(),
            content_html: record.content_html.clone(),
            author: record.author.clone(),
        }
    }
}
