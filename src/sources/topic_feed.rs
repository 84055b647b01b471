use quick_xml::events::Event;
use quick_xml::Reader;
use scraper::Html;
use tracing::debug;

use crate::domain::{Entry, SourceKind};
use crate::errors::{MirrorError, MirrorResult};
use crate::sources::dates;
use crate::sources::html::{clean_text, escape_text, select_first, summary_from, texts};
use crate::sources::http::HttpFetcher;
use crate::sources::traits::EntrySource;

/// Containers probed for a bulleted body, with the minimum item count each must yield
pub const BODY_LIST_PROBES: &[(&str, usize)] = &[
    ("article ol", 5),
    ("article ul", 5),
    (".article_body ol", 5),
    (".article_body ul", 5),
    (".article-content ol", 5),
    (".article-content ul", 5),
];

pub const MAX_POINTS: usize = 9;

const SUMMARY_META: &str = r#"meta[property="og:description"]"#;
const ARTICLE_PARAGRAPHS: &str = "article p";

/// Fields of the first `<item>` of an upstream feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub pub_date: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum ItemField {
    Title,
    Link,
    PubDate,
}

impl ItemField {
    fn from_tag(name: &[u8]) -> Option<Self> {
        if tag_is(name, "title") {
            Some(ItemField::Title)
        } else if tag_is(name, "link") {
            Some(ItemField::Link)
        } else if tag_is(name, "pubdate") {
            Some(ItemField::PubDate)
        } else {
            None
        }
    }
}

/// Tag comparison ignoring any namespace prefix and ASCII case
fn tag_is(name: &[u8], wanted: &str) -> bool {
    let local = match name.iter().rposition(|b| *b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    };
    local.eq_ignore_ascii_case(wanted.as_bytes())
}

fn shape(message: &str) -> MirrorError {
    MirrorError::UnexpectedShape(message.to_string())
}

#[derive(Default)]
struct ItemText {
    title: String,
    link: String,
    pub_date: String,
    /// Fields whose first element has closed; later siblings with the same name are ignored
    done: [bool; 3],
}

impl ItemText {
    fn index(field: ItemField) -> usize {
        match field {
            ItemField::Title => 0,
            ItemField::Link => 1,
            ItemField::PubDate => 2,
        }
    }

    fn open(&self, name: &[u8]) -> Option<ItemField> {
        ItemField::from_tag(name).filter(|field| !self.done[Self::index(*field)])
    }

    fn close(&mut self, field: ItemField) {
        self.done[Self::index(field)] = true;
    }

    fn push(&mut self, field: ItemField, text: &str) {
        match field {
            ItemField::Title => self.title.push_str(text),
            ItemField::Link => self.link.push_str(text),
            ItemField::PubDate => self.pub_date.push_str(text),
        }
    }

    fn finish(self) -> FeedItem {
        let pub_date = self.pub_date.trim().to_string();
        FeedItem {
            title: clean_text(&self.title),
            link: self.link.trim().to_string(),
            pub_date: (!pub_date.is_empty()).then_some(pub_date),
        }
    }
}

/// Read the first `<item>` of the first `<channel>` under the document root
pub fn parse_latest_item(xml: &[u8]) -> MirrorResult<FeedItem> {
    // Untrimmed, so text split around CDATA keeps its spacing until `finish` cleans it
    let mut reader = Reader::from_reader(xml);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut found_channel = false;
    let mut in_channel = false;
    let mut in_item = false;
    let mut field: Option<ItemField> = None;
    let mut item = ItemText::default();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| MirrorError::UnexpectedShape(format!("unreadable feed XML: {}", e)))?
        {
            Event::Start(ref e) => {
                depth += 1;
                let name = e.name();
                match depth {
                    2 if !found_channel && tag_is(name.as_ref(), "channel") => {
                        found_channel = true;
                        in_channel = true;
                    }
                    3 if in_channel && tag_is(name.as_ref(), "item") => in_item = true,
                    4 if in_item => field = item.open(name.as_ref()),
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                let name = e.name();
                match depth + 1 {
                    2 if !found_channel && tag_is(name.as_ref(), "channel") => {
                        return Err(shape("feed has no items"));
                    }
                    3 if in_channel && tag_is(name.as_ref(), "item") => return Ok(item.finish()),
                    _ => {}
                }
            }
            Event::Text(ref text) if in_item && depth == 4 => {
                if let Some(field) = field {
                    let value = text.unescape().map_err(|e| {
                        MirrorError::UnexpectedShape(format!("bad text in feed item: {}", e))
                    })?;
                    item.push(field, &value);
                }
            }
            Event::CData(ref data) if in_item && depth == 4 => {
                if let Some(field) = field {
                    let value = reader.decoder().decode(data).map_err(|e| {
                        MirrorError::UnexpectedShape(format!("bad text in feed item: {}", e))
                    })?;
                    item.push(field, &value);
                }
            }
            Event::End(_) => {
                match depth {
                    4 if in_item => {
                        if let Some(done) = field.take() {
                            item.close(done);
                        }
                    }
                    3 if in_item => return Ok(item.finish()),
                    2 if in_channel => return Err(shape("feed has no items")),
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if found_channel {
        Err(shape("feed has no items"))
    } else {
        Err(shape("feed has no channel"))
    }
}

/// Summary plus the bulleted body of an article page
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDigest {
    pub summary: String,
    pub points: Vec<String>,
}

impl ArticleDigest {
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        if !self.summary.is_empty() {
            html.push_str(&format!("<p>{}</p>", escape_text(&self.summary)));
        }
        if !self.points.is_empty() {
            html.push_str("<ol>");
            for point in &self.points {
                html.push_str(&format!("<li>{}</li>", escape_text(point)));
            }
            html.push_str("</ol>");
        }
        html
    }
}

pub fn extract_article(page: &str) -> MirrorResult<ArticleDigest> {
    let document = Html::parse_document(page);
    let root = document.root_element();

    let summary = summary_from(&document, SUMMARY_META, ARTICLE_PARAGRAPHS)?;

    let mut points = Vec::new();
    for (css, min_yield) in BODY_LIST_PROBES {
        if let Some(list) = select_first(root, css)? {
            let items = texts(list, "li", usize::MAX)?;
            if items.len() >= *min_yield {
                debug!(selector = css, count = items.len(), "Using list body");
                points = items;
                break;
            }
        }
    }

    if points.is_empty() {
        points = texts(root, ARTICLE_PARAGRAPHS, MAX_POINTS)?;
    }
    points.truncate(MAX_POINTS);

    Ok(ArticleDigest { summary, points })
}

pub struct TopicFeedSource {
    feed_url: String,
    http: HttpFetcher,
}

impl TopicFeedSource {
    pub fn new(feed_url: &str, http: HttpFetcher) -> Self {
        Self {
            feed_url: feed_url.to_string(),
            http,
        }
    }
}

impl EntrySource for TopicFeedSource {
    fn source_kind(&self) -> SourceKind {
        SourceKind::TopicFeed
    }

    fn fetch(&self) -> MirrorResult<Entry> {
        let xml = self.http.get_bytes(&self.feed_url)?;
        let item = parse_latest_item(&xml)?;

        if item.link.is_empty() {
            return Err(MirrorError::UnexpectedShape(format!(
                "latest item in {} has no link",
                self.feed_url
            )));
        }

        let published = match item.pub_date.as_deref() {
            Some(raw) => dates::or_now(dates::parse_rfc2822(raw)),
            None => dates::now(),
        };

        let page = self.http.get_text(&item.link)?;
        let digest = extract_article(&page)?;

        let title = if item.title.is_empty() {
            item.link.clone()
        } else {
            item.title
        };

        Ok(Entry::new(
            title,
            item.link,
            published,
            digest.summary.clone(),
            digest.to_html(),
        ))
    }
}
