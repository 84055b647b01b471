use tracing::{info, warn};

use crate::domain::{Entry, FeedConfig, HistoryRecord};
use crate::errors::{MirrorError, MirrorResult};
use crate::render::render_feed;
use crate::sources::{EntrySource, RegisteredFeed};
use crate::storage::{write_document, HistoryRepository};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Replaces every feed's retention limit for this run
    pub max_items_override: Option<usize>,
    /// Render only; leave the output document and history untouched
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub records: Vec<HistoryRecord>,
    pub inserted: bool,
}

/// Put `latest` at the head unless its identity is already stored, then keep the first `max_items`
pub fn merge_latest(
    mut history: Vec<HistoryRecord>,
    latest: &Entry,
    max_items: usize,
) -> MergeOutcome {
    let guid = latest.guid();
    let inserted = !history.iter().any(|record| record.id == guid);

    if inserted {
        history.insert(0, latest.to_record());
    }
    history.truncate(max_items);

    MergeOutcome {
        records: history,
        inserted,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MirrorOutcome {
    pub slug: String,
    pub inserted: bool,
    pub retained: usize,
    pub document: String,
    pub written: bool,
}

pub struct FeedResult {
    pub slug: String,
    pub result: MirrorResult<MirrorOutcome>,
}

#[derive(Default)]
pub struct RunReport {
    pub results: Vec<FeedResult>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|feed| feed.result.is_err())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &MirrorOutcome> {
        self.results.iter().filter_map(|feed| feed.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &MirrorError)> {
        self.results
            .iter()
            .filter_map(|feed| feed.result.as_ref().err().map(|e| (feed.slug.as_str(), e)))
    }
}

pub struct MirrorService<R: HistoryRepository> {
    repository: R,
}

impl<R: HistoryRepository> MirrorService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Fetch, merge, trim, render and (unless dry-running) persist one feed
    pub fn mirror(
        &self,
        feed: &FeedConfig,
        source: &dyn EntrySource,
        options: &RunOptions,
    ) -> MirrorResult<MirrorOutcome> {
        let latest = source.fetch()?;
        let history = self.repository.load(&feed.history_path);

        let limit = feed.effective_limit(options.max_items_override);
        let merged = merge_latest(history, &latest, limit);

        if merged.inserted {
            info!(slug = %feed.slug, title = %latest.title, "Adding new entry");
        } else {
            info!(slug = %feed.slug, "Latest entry already mirrored; keeping history order");
        }

        // Rendered and persisted from the same trimmed sequence
        let entries: Vec<Entry> = merged.records.iter().map(Entry::from_record).collect();
        let document = render_feed(feed, &entries)?;

        if !options.dry_run {
            // History first: a document left stale by a failed write is rebuilt on the next run
            let records: Vec<HistoryRecord> = entries.iter().map(Entry::to_record).collect();
            self.repository.save(&feed.history_path, &records)?;
            write_document(&feed.output_path, &document)?;
            info!(slug = %feed.slug, path = %feed.output_path.display(), "Wrote RSS feed");
        }

        Ok(MirrorOutcome {
            slug: feed.slug.clone(),
            inserted: merged.inserted,
            retained: entries.len(),
            document,
            written: !options.dry_run,
        })
    }

    /// Mirror every feed in order; a failing feed is recorded and the rest still run
    pub fn run_all(&self, feeds: &[&RegisteredFeed], options: &RunOptions) -> RunReport {
        let mut report = RunReport::default();

        for feed in feeds {
            let result = self.mirror(&feed.config, feed.source.as_ref(), options);
            if let Err(e) = &result {
                warn!(slug = %feed.config.slug, kind = e.kind(), error = %e, "Mirror failed");
            }
            report.results.push(FeedResult {
                slug: feed.config.slug.clone(),
                result,
            });
        }

        report
    }
}
