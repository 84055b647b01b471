use chrono::{DateTime, FixedOffset};
use scraper::Html;
use url::Url;

use crate::domain::{Entry, SourceKind};
use crate::errors::{MirrorError, MirrorResult};
use crate::sources::dates;
use crate::sources::html::{attr, escape_text, first_text, resolve, select_first, summary_from, texts};
use crate::sources::http::HttpFetcher;
use crate::sources::traits::EntrySource;

const ARTICLE_CARD: &str = ".articles__grid a.article-link";
const CARD_TITLE: &str = ".headline";
const CARD_AUTHOR: &str = ".author";
const CARD_DATE: &str = ".date";

const SUMMARY_META: &str = r#"meta[name="description"]"#;
const CONTENT_PARAGRAPHS: &str = ".reader__content p";

pub const MAX_PARAGRAPHS: usize = 15;

/// First article card of a section listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub title: String,
    pub link: String,
    pub author: Option<String>,
    pub date_text: Option<String>,
}

pub fn parse_listing(page: &str, base: &Url) -> MirrorResult<ListingCard> {
    let document = Html::parse_document(page);

    let card = select_first(document.root_element(), ARTICLE_CARD)?
        .ok_or_else(|| MirrorError::UnexpectedShape("no article card on listing page".to_string()))?;

    let href = attr(card, "href").ok_or_else(|| {
        MirrorError::UnexpectedShape("article card has no link".to_string())
    })?;

    let title = first_text(card, CARD_TITLE)?.unwrap_or_else(|| href.clone());

    Ok(ListingCard {
        title,
        link: resolve(base, &href)?,
        author: first_text(card, CARD_AUTHOR)?,
        date_text: first_text(card, CARD_DATE)?,
    })
}

/// "17 March 2024" style dates, anchored to Dublin
pub fn parse_listing_date(text: &str) -> MirrorResult<DateTime<FixedOffset>> {
    dates::parse_local_date(text, &[dates::DAY_MONTH_YEAR], dates::SOURCE_ZONE)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleText {
    pub summary: String,
    pub paragraphs: Vec<String>,
}

impl ArticleText {
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        if !self.summary.is_empty() {
            html.push_str(&format!("<p>{}</p>", escape_text(&self.summary)));
        }
        for paragraph in &self.paragraphs {
            html.push_str(&format!("<p>{}</p>", escape_text(paragraph)));
        }
        html
    }
}

pub fn extract_article(page: &str) -> MirrorResult<ArticleText> {
    let document = Html::parse_document(page);

    Ok(ArticleText {
        summary: summary_from(&document, SUMMARY_META, CONTENT_PARAGRAPHS)?,
        paragraphs: texts(document.root_element(), CONTENT_PARAGRAPHS, MAX_PARAGRAPHS)?,
    })
}

pub struct ListingPageSource {
    base_url: Url,
    section_slug: String,
    http: HttpFetcher,
}

impl ListingPageSource {
    pub fn new(base_url: &str, section_slug: &str, http: HttpFetcher) -> MirrorResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| MirrorError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            base_url,
            section_slug: section_slug.trim_matches('/').to_string(),
            http,
        })
    }

    pub fn listing_url(&self) -> MirrorResult<String> {
        resolve(&self.base_url, &format!("/{}/", self.section_slug))
    }
}

impl EntrySource for ListingPageSource {
    fn source_kind(&self) -> SourceKind {
        SourceKind::ListingPage
    }

    fn fetch(&self) -> MirrorResult<Entry> {
        let listing = self.http.get_text(&self.listing_url()?)?;
        let card = parse_listing(&listing, &self.base_url).map_err(|e| match e {
            MirrorError::UnexpectedShape(message) => {
                MirrorError::UnexpectedShape(format!("{} ({})", message, self.section_slug))
            }
            other => other,
        })?;

        let published = match card.date_text.as_deref() {
            Some(text) => dates::or_now(parse_listing_date(text)),
            None => dates::now(),
        };

        let page = self.http.get_text(&card.link)?;
        let article = extract_article(&page)?;

        Ok(Entry::new(
            card.title,
            card.link,
            published,
            article.summary.clone(),
            article.to_html(),
        )
        .with_author(card.author))
    }
}
