//! Journal "current issue" block, flattened into a single aggregated entry.

use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Html};
use url::Url;

use crate::domain::{Entry, SourceKind};
use crate::errors::{MirrorError, MirrorResult};
use crate::sources::dates;
use crate::sources::html::{
    attr, clean_text, element_text, escape_attr, escape_text, first_text, resolve, select_first,
    selector,
};
use crate::sources::http::HttpFetcher;
use crate::sources::traits::EntrySource;

const CURRENT_ISSUE: &str = "section.current_issue";
const ISSUE_TITLE: &str = ".current_issue_title";
const COVER_LINK: &str = ".obj_issue_toc .heading a.cover";
const PUBLISHED: &str = ".published .value";
const SECTIONS: &str = ".sections";
const SECTION: &str = ".section";
const ARTICLE_SUMMARY: &str = ".obj_article_summary";

#[derive(Debug, Clone, PartialEq)]
pub struct Cover {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueArticle {
    pub title: String,
    pub link: Option<String>,
    pub authors: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueSection {
    pub heading: Option<String>,
    pub articles: Vec<IssueArticle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueSummary {
    pub title: String,
    pub link: String,
    pub cover: Option<Cover>,
    pub published_text: Option<String>,
    pub sections: Vec<IssueSection>,
}

impl IssueSummary {
    pub fn published(&self) -> DateTime<FixedOffset> {
        match self.published_text.as_deref() {
            Some(text) => dates::or_now(parse_issue_date(text)),
            None => dates::now(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();

        if let Some(cover) = &self.cover {
            html.push_str(&format!(
                r#"<p><a href="{}"><img src="{}" alt="{}"></a></p>"#,
                escape_attr(&self.link),
                escape_attr(&cover.src),
                escape_attr(&cover.alt)
            ));
        }

        html.push_str(&format!("<p>{}</p>", escape_text(&self.title)));

        if let Some(published) = &self.published_text {
            html.push_str(&format!(
                "<p><strong>Published:</strong> {}</p>",
                escape_text(published)
            ));
        }

        for section in &self.sections {
            if let Some(heading) = &section.heading {
                html.push_str(&format!("<h4>{}</h4>", escape_text(heading)));
            }
            html.push_str("<ul>");
            for article in &section.articles {
                match &article.link {
                    Some(link) => html.push_str(&format!(
                        r#"<li><a href="{}">{}</a>"#,
                        escape_attr(link),
                        escape_text(&article.title)
                    )),
                    None => html.push_str(&format!("<li>{}", escape_text(&article.title))),
                }
                if let Some(authors) = &article.authors {
                    html.push_str(&format!(" – {}", escape_text(authors)));
                }
                html.push_str("</li>");
            }
            html.push_str("</ul>");
        }

        html
    }

    pub fn into_entry(self) -> Entry {
        let published = self.published();
        let content_html = self.to_html();
        Entry::new(
            self.title.clone(),
            self.link,
            published,
            self.title,
            content_html,
        )
    }
}

/// ISO dates first, then "17 March 2024" text, both in Dublin time
pub fn parse_issue_date(text: &str) -> MirrorResult<DateTime<FixedOffset>> {
    dates::parse_local_date(
        text,
        &[dates::ISO_DATE, dates::DAY_MONTH_YEAR],
        dates::SOURCE_ZONE,
    )
}

fn parse_article(article: ElementRef<'_>, base: &Url) -> MirrorResult<Option<IssueArticle>> {
    let link_node = select_first(article, "h4 a")?;

    let title = link_node.map(element_text).unwrap_or_default();
    if title.is_empty() {
        return Ok(None);
    }

    let link = match link_node.and_then(|node| attr(node, "href")) {
        Some(href) => Some(resolve(base, &href)?),
        None => None,
    };

    Ok(Some(IssueArticle {
        title,
        link,
        authors: first_text(article, ".meta .authors")?,
    }))
}

fn parse_sections(issue: ElementRef<'_>, base: &Url) -> MirrorResult<Vec<IssueSection>> {
    let container = match select_first(issue, SECTIONS)? {
        Some(container) => container,
        None => return Ok(Vec::new()),
    };

    let section_selector = selector(SECTION)?;
    let article_selector = selector(ARTICLE_SUMMARY)?;
    let mut sections = Vec::new();

    for section in container.select(&section_selector) {
        let nodes: Vec<ElementRef<'_>> = section.select(&article_selector).collect();
        if nodes.is_empty() {
            continue;
        }

        let mut articles = Vec::new();
        for node in nodes {
            if let Some(article) = parse_article(node, base)? {
                articles.push(article);
            }
        }

        sections.push(IssueSection {
            heading: first_text(section, "h3")?,
            articles,
        });
    }

    Ok(sections)
}

pub fn parse_issue(page: &str, base: &Url, default_title: &str) -> MirrorResult<IssueSummary> {
    let document = Html::parse_document(page);

    let issue = select_first(document.root_element(), CURRENT_ISSUE)?.ok_or_else(|| {
        MirrorError::UnexpectedShape("index page has no current issue block".to_string())
    })?;

    let title = first_text(issue, ISSUE_TITLE)?.unwrap_or_else(|| default_title.to_string());

    let cover_link = select_first(issue, COVER_LINK)?;
    let link = match cover_link.and_then(|node| attr(node, "href")) {
        Some(href) => resolve(base, &href)?,
        None => base.to_string(),
    };

    let cover_img = match cover_link {
        Some(node) => select_first(node, "img")?,
        None => None,
    };
    let cover = match cover_img.and_then(|img| attr(img, "src").map(|src| (img, src))) {
        Some((img, src)) => Some(Cover {
            src: resolve(base, &src)?,
            alt: img
                .value()
                .attr("alt")
                .map(clean_text)
                .unwrap_or_else(|| title.clone()),
        }),
        None => None,
    };

    Ok(IssueSummary {
        link,
        cover,
        published_text: first_text(issue, PUBLISHED)?,
        sections: parse_sections(issue, base)?,
        title,
    })
}

pub struct IssueIndexSource {
    index_url: Url,
    default_title: String,
    http: HttpFetcher,
}

impl IssueIndexSource {
    pub fn new(index_url: &str, default_title: &str, http: HttpFetcher) -> MirrorResult<Self> {
        let index_url = Url::parse(index_url)
            .map_err(|e| MirrorError::InvalidUrl(format!("{}: {}", index_url, e)))?;

        Ok(Self {
            index_url,
            default_title: default_title.to_string(),
            http,
        })
    }
}

impl EntrySource for IssueIndexSource {
    fn source_kind(&self) -> SourceKind {
        SourceKind::IssueIndex
    }

    fn fetch(&self) -> MirrorResult<Entry> {
        let page = self.http.get_text(self.index_url.as_str())?;
        let issue = parse_issue(&page, &self.index_url, &self.default_title)?;
        Ok(issue.into_entry())
    }
}
