use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    TopicFeed,
    ListingPage,
    IssueIndex,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::TopicFeed => "topic_feed",
            SourceKind::ListingPage => "listing_page",
            SourceKind::IssueIndex => "issue_index",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static description of one mirrored feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub slug: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub history_path: PathBuf,
    pub output_path: PathBuf,
    pub max_items: usize,
}

impl FeedConfig {
    pub fn new(slug: &str, title: &str, link: &str, description: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            link: link.to_string(),
            description: description.to_string(),
            history_path: PathBuf::from(format!("{}_history.json", slug)),
            output_path: PathBuf::from(format!("{}.xml", slug)),
            max_items: 30,
        }
    }

    pub fn with_paths(mut self, history_path: PathBuf, output_path: PathBuf) -> Self {
        self.history_path = history_path;
        self.output_path = output_path;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Retention limit for a run, honouring a one-off override
    pub fn effective_limit(&self, max_items_override: Option<usize>) -> usize {
        max_items_override.unwrap_or(self.max_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit() {
        let feed = FeedConfig::new("journal9", "Journal", "https://example.test", "desc")
            .with_max_items(12);

        assert_eq!(feed.effective_limit(None), 12);
        assert_eq!(feed.effective_limit(Some(3)), 3);
    }
}
