#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tokio_util::sync::CancellationToken;

use fu_reviews_scrapping::pagination::WalkOptions;
use fu_reviews_scrapping::record::Record;
use fu_reviews_scrapping::session::{BrowserSession, SessionError, WaitOptions};
use fu_reviews_scrapping::storage::RecordSink;

/// Handle to an element of one of the fake pages, by document-order index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeElement {
    page: usize,
    index: usize,
}

/// In-memory browser over a fixed list of HTML pages.
///
/// Clicking an element carrying `data-goto="N"` switches to page `N`; any
/// other click is only counted.
pub struct FakeSession {
    pages: Vec<Html>,
    current: Cell<usize>,
    pub visited: RefCell<Vec<String>>,
    pub clicks: Cell<usize>,
    text_reads: Cell<usize>,
    cancel_on_page_change: Option<CancellationToken>,
    cancel_after_text_reads: Option<(usize, CancellationToken)>,
    fail_clicks: bool,
}

impl FakeSession {
    pub fn new(pages: &[String]) -> Self {
        Self {
            pages: pages.iter().map(|page| Html::parse_document(page)).collect(),
            current: Cell::new(0),
            visited: RefCell::new(Vec::new()),
            clicks: Cell::new(0),
            text_reads: Cell::new(0),
            cancel_on_page_change: None,
            cancel_after_text_reads: None,
            fail_clicks: false,
        }
    }

    /// Fires `token` as soon as a click moves to another page.
    pub fn cancel_on_page_change(mut self, token: CancellationToken) -> Self {
        self.cancel_on_page_change = Some(token);
        self
    }

    /// Fires `token` once `reads` element texts have been read.
    pub fn cancel_after_text_reads(mut self, reads: usize, token: CancellationToken) -> Self {
        self.cancel_after_text_reads = Some((reads, token));
        self
    }

    pub fn failing_clicks(mut self) -> Self {
        self.fail_clicks = true;
        self
    }

    pub fn current_page(&self) -> usize {
        self.current.get()
    }

    fn elements(&self, page: usize) -> Vec<ElementRef<'_>> {
        self.pages[page]
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn resolve(&self, element: &FakeElement) -> Result<ElementRef<'_>, SessionError> {
        if element.page != self.current.get() {
            return Err(SessionError::Io(io::Error::other("stale element reference")));
        }
        Ok(self.elements(element.page)[element.index])
    }
}

impl BrowserSession for FakeSession {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.visited.borrow_mut().push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String, SessionError> {
        Ok(format!("https://shop.test/p/cleanser?page={}", self.current.get() + 1))
    }

    async fn find_all(
        &self,
        scope: Option<&FakeElement>,
        selector: &str,
    ) -> Result<Vec<FakeElement>, SessionError> {
        let selector = Selector::parse(selector)
            .map_err(|e| SessionError::Io(io::Error::other(e.to_string())))?;
        let page = self.current.get();
        let all = self.elements(page);
        let position = |found: ElementRef<'_>| all.iter().position(|e| e.id() == found.id());

        let matches: Vec<ElementRef<'_>> = match scope {
            Some(element) => self.resolve(element)?.select(&selector).collect(),
            None => self.pages[page].select(&selector).collect(),
        };

        Ok(matches
            .into_iter()
            .filter_map(position)
            .map(|index| FakeElement { page, index })
            .collect())
    }

    async fn text(&self, element: &FakeElement) -> Result<String, SessionError> {
        let text = self.resolve(element)?.text().collect::<String>();

        self.text_reads.set(self.text_reads.get() + 1);
        if let Some((reads, token)) = &self.cancel_after_text_reads {
            if self.text_reads.get() >= *reads {
                token.cancel();
            }
        }
        Ok(text)
    }

    async fn attribute(
        &self,
        element: &FakeElement,
        name: &str,
    ) -> Result<Option<String>, SessionError> {
        Ok(self.resolve(element)?.value().attr(name).map(str::to_string))
    }

    async fn scroll_into_view(&self, element: &FakeElement) -> Result<(), SessionError> {
        self.resolve(element).map(|_| ())
    }

    async fn click(&self, element: &FakeElement) -> Result<(), SessionError> {
        if self.fail_clicks {
            return Err(SessionError::Io(io::Error::other("element click intercepted")));
        }

        let target = self
            .resolve(element)?
            .value()
            .attr("data-goto")
            .and_then(|page| page.parse::<usize>().ok());
        self.clicks.set(self.clicks.get() + 1);

        if let Some(page) = target {
            if page < self.pages.len() {
                self.current.set(page);
                if let Some(token) = &self.cancel_on_page_change {
                    token.cancel();
                }
            }
        }
        Ok(())
    }

    async fn close(self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Keeps every snapshot it is given.
#[derive(Default)]
pub struct MemorySink {
    pub snapshots: Vec<Vec<Record>>,
}

impl MemorySink {
    pub fn last(&self) -> &[Record] {
        self.snapshots.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl RecordSink for MemorySink {
    fn persist(&mut self, records: &[Record]) -> Result<()> {
        self.snapshots.push(records.to_vec());
        Ok(())
    }
}

/// Rejects every write.
pub struct FailingSink;

impl RecordSink for FailingSink {
    fn persist(&mut self, _records: &[Record]) -> Result<()> {
        Err(anyhow!("disk full"))
    }
}

pub struct Review<'a> {
    pub rating: Option<&'a str>,
    pub title: &'a str,
    pub author: &'a str,
    pub date: &'a str,
    pub text: &'a str,
}

impl<'a> Review<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            rating: Some("5"),
            title,
            author: "Jane",
            date: " 2 months ago ",
            text: "Works well.",
        }
    }

    pub fn without_rating(mut self) -> Self {
        self.rating = None;
        self
    }

    fn to_html(&self) -> String {
        let rating = self
            .rating
            .map(|value| format!(r#"<meta itemprop="ratingValue" content="{}">"#, value))
            .unwrap_or_default();
        format!(
            r#"<li class="bv-content-item">
                {rating}
                <h3 class="bv-content-title">{title}</h3>
                <span class="bv-author">{author}</span>
                <span class="bv-content-datetime-stamp">{date}</span>
                <div class="bv-content-summary-body-text">{text}</div>
            </li>"#,
            rating = rating,
            title = self.title,
            author = self.author,
            date = self.date,
            text = self.text,
        )
    }
}

/// A review page; `next_page` adds an active "next" control leading there.
pub fn review_page(reviews: &[Review<'_>], next_page: Option<usize>) -> String {
    let items: String = reviews.iter().map(Review::to_html).collect();
    let list = if reviews.is_empty() {
        String::new()
    } else {
        format!(r#"<ol class="bv-content-list bv-content-list-reviews">{}</ol>"#, items)
    };
    let next = next_page
        .map(|page| {
            format!(
                r#"<ul><li class="bv-content-pagination-buttons-item bv-content-pagination-buttons-item-next">
                    <a class="bv-content-btn bv-content-btn-pages-active" data-goto="{}">Next</a>
                </li></ul>"#,
                page
            )
        })
        .unwrap_or_default();

    format!("<html><body><div id=\"reviews\">{}{}</div></body></html>", list, next)
}

pub fn walk_options() -> WalkOptions {
    WalkOptions {
        wait: WaitOptions {
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
        },
        delay_min_ms: 1000,
        delay_max_ms: 5000,
    }
}
