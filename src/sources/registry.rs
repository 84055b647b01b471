use crate::config::Config;
use crate::domain::FeedConfig;
use crate::errors::{MirrorError, MirrorResult};
use crate::sources::http::HttpFetcher;
use crate::sources::issue_index::IssueIndexSource;
use crate::sources::listing_page::ListingPageSource;
use crate::sources::topic_feed::TopicFeedSource;
use crate::sources::traits::EntrySource;

pub const JOURNAL_FEED_URL: &str = "https://www.thejournal.ie/topic/9-at-9/feed/";
pub const REDNETWORK_BASE: &str = "https://rednetwork.net";
pub const IMR_BASE_URL: &str = "https://irishmarxistreview.net/index.php/imr";

const IMR_DEFAULT_TITLE: &str = "Irish Marxist Review – Latest Issue";

/// A feed definition bound to the adapter that fills it
pub struct RegisteredFeed {
    pub config: FeedConfig,
    pub source: Box<dyn EntrySource>,
}

pub struct FeedRegistry {
    feeds: Vec<RegisteredFeed>,
}

impl FeedRegistry {
    pub fn empty() -> Self {
        Self { feeds: Vec::new() }
    }

    /// The fixed set of mirrored feeds, storing under `config.data_dir`
    pub fn new(config: &Config) -> MirrorResult<Self> {
        let http = HttpFetcher::new(&config.http)?;
        let mut registry = Self::empty();

        registry.register(
            Self::feed(
                config,
                "journal9",
                "Journal.ie – Daily 9-at-9 Mirror",
                "https://www.thejournal.ie/topic/9-at-9/",
                "Locally mirrored feed of TheJournal.ie Daily 9-at-9 bulletins.",
                30,
            ),
            Box::new(TopicFeedSource::new(JOURNAL_FEED_URL, http.clone())),
        );
        registry.register(
            Self::feed(
                config,
                "red_articles",
                "Red Network – Articles",
                &format!("{}/articles/", REDNETWORK_BASE),
                "Mirror of the main Red Network articles section.",
                30,
            ),
            Box::new(ListingPageSource::new(REDNETWORK_BASE, "articles", http.clone())?),
        );
        registry.register(
            Self::feed(
                config,
                "red_theory",
                "Red Network – Red Theory",
                &format!("{}/red-theory/", REDNETWORK_BASE),
                "Mirror of the Red Theory long-form pieces.",
                30,
            ),
            Box::new(ListingPageSource::new(REDNETWORK_BASE, "red-theory", http.clone())?),
        );
        registry.register(
            Self::feed(
                config,
                "imr_issue",
                "Irish Marxist Review – Issues",
                &format!("{}/issue/current", IMR_BASE_URL),
                "Notifies when a new Irish Marxist Review issue is published.",
                12,
            ),
            Box::new(IssueIndexSource::new(IMR_BASE_URL, IMR_DEFAULT_TITLE, http)?),
        );

        Ok(registry)
    }

    fn feed(
        config: &Config,
        slug: &str,
        title: &str,
        link: &str,
        description: &str,
        max_items: usize,
    ) -> FeedConfig {
        FeedConfig::new(slug, title, link, description)
            .with_paths(config.history_path(slug), config.output_path(slug))
            .with_max_items(max_items)
    }

    pub fn register(&mut self, config: FeedConfig, source: Box<dyn EntrySource>) {
        self.feeds.push(RegisteredFeed { config, source });
    }

    pub fn get(&self, slug: &str) -> Option<&RegisteredFeed> {
        self.feeds.iter().find(|feed| feed.config.slug == slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredFeed> {
        self.feeds.iter()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.feeds.iter().map(|feed| feed.config.slug.as_str()).collect()
    }

    /// Feeds for the given slugs, in request order without repeats; all feeds when empty.
    /// Any unknown slug rejects the whole selection, naming the registered slugs.
    pub fn select(&self, slugs: &[String]) -> MirrorResult<Vec<&RegisteredFeed>> {
        if slugs.is_empty() {
            return Ok(self.feeds.iter().collect());
        }

        let mut selected: Vec<&RegisteredFeed> = Vec::new();
        for slug in slugs {
            let feed = self.get(slug).ok_or_else(|| {
                MirrorError::UnknownFeed(format!(
                    "{} (known feeds: {})",
                    slug,
                    self.slugs().join(", ")
                ))
            })?;
            if !selected.iter().any(|s| s.config.slug == feed.config.slug) {
                selected.push(feed);
            }
        }

        Ok(selected)
    }
}
