use std::fmt;

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::extractors::{extract, FieldRule};
use crate::record::{Record, RecordTemplate};
use crate::session::{wait_for, wait_for_all, BrowserSession, SessionError, WaitOptions};
use crate::storage::RecordSink;
use crate::utilities::generate_random_delay::generate_random_delay;

/// Selectors describing a paginated list.
#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    /// Matches every item element of the current page.
    pub list_selector: &'static str,
    /// Matches the control that loads the next page.
    pub next_selector: &'static str,
}

/// How each item element becomes a record.
#[derive(Debug, Clone, Copy)]
pub struct ItemExtractor<'a> {
    pub template: &'a RecordTemplate,
    pub rules: &'a [FieldRule],
}

#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    pub wait: WaitOptions,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
}

/// Why a walk ended. Every variant leaves the sink holding all records of the
/// pages completed before the stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// No next-page control appeared; the list was walked to its end.
    NoMorePages,
    /// The operator interrupted the run.
    UserCancelled,
    /// Advancing or persisting failed.
    UnexpectedStop(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::NoMorePages => write!(f, "no more pages"),
            StopReason::UserCancelled => write!(f, "cancelled by the user"),
            StopReason::UnexpectedStop(reason) => write!(f, "unexpected stop: {}", reason),
        }
    }
}

#[derive(Debug)]
pub struct WalkReport {
    pub stop: StopReason,
    pub records: Vec<Record>,
    /// Pages whose items were fully extracted.
    pub pages: usize,
    /// Successful snapshot writes.
    pub writes: usize,
}

enum State<E> {
    AwaitingList,
    Extracting(Vec<E>),
    Persisting,
    AdvancingOrDone,
    Done(StopReason),
}

/// Walks every page of a list, saving the accumulated records after each one.
///
/// The record set only grows, in page-then-document order, and the sink is
/// overwritten with the whole set after every page. Cancellation is observed
/// between items, while waiting and during the inter-page delay; records
/// already complete at that point are persisted before returning.
pub async fn collect_all_pages<S, K>(
    session: &S,
    layout: &PageLayout,
    items: &ItemExtractor<'_>,
    sink: &mut K,
    options: &WalkOptions,
    cancel: &CancellationToken,
) -> WalkReport
where
    S: BrowserSession,
    K: RecordSink + ?Sized,
{
    let mut records: Vec<Record> = Vec::new();
    let mut pages = 0;
    let mut writes = 0;
    let mut interrupted = false;
    let mut state = State::AwaitingList;

    let stop = loop {
        state = match state {
            State::AwaitingList => {
                match wait_for_all(session, layout.list_selector, options.wait, cancel).await {
                    Ok(found) => State::Extracting(found),
                    Err(SessionError::Timeout { .. }) => {
                        info!("There aren't any items on the current page");
                        State::Extracting(Vec::new())
                    }
                    Err(SessionError::Cancelled) => State::Done(StopReason::UserCancelled),
                    Err(e) => {
                        warn!("Waiting for the item list failed: {}", e);
                        State::Extracting(Vec::new())
                    }
                }
            }

            State::Extracting(elements) => {
                for element in &elements {
                    if cancel.is_cancelled() {
                        interrupted = true;
                        break;
                    }
                    let record = extract(session, Some(element), items.template, items.rules).await;
                    records.push(record);
                }
                if !interrupted {
                    pages += 1;
                }
                State::Persisting
            }

            State::Persisting => match sink.persist(&records) {
                Ok(()) => {
                    writes += 1;
                    info!("Saved {} {} records", records.len(), items.template.name);
                    if interrupted {
                        State::Done(StopReason::UserCancelled)
                    } else {
                        State::AdvancingOrDone
                    }
                }
                Err(e) => State::Done(StopReason::UnexpectedStop(format!("{:#}", e))),
            },

            State::AdvancingOrDone => advance(session, layout, options, cancel).await,

            State::Done(stop) => break stop,
        };
    };

    match &stop {
        StopReason::NoMorePages => info!("There aren't any more pages to show"),
        StopReason::UserCancelled => info!("The collect has been interrupted by the user"),
        StopReason::UnexpectedStop(reason) => warn!("The collect stopped unexpectedly: {}", reason),
    }

    WalkReport { stop, records, pages, writes }
}

async fn advance<S: BrowserSession>(
    session: &S,
    layout: &PageLayout,
    options: &WalkOptions,
    cancel: &CancellationToken,
) -> State<S::Element> {
    let next = match wait_for(session, layout.next_selector, options.wait, cancel).await {
        Ok(next) => next,
        Err(SessionError::Timeout { .. }) => return State::Done(StopReason::NoMorePages),
        Err(SessionError::Cancelled) => return State::Done(StopReason::UserCancelled),
        Err(e) => return State::Done(StopReason::UnexpectedStop(e.to_string())),
    };

    let clicked = async {
        session.scroll_into_view(&next).await?;
        session.click(&next).await
    };
    if let Err(e) = clicked.await {
        return State::Done(StopReason::UnexpectedStop(e.to_string()));
    }
    info!("Clicked the next page button");

    if !generate_random_delay(options.delay_min_ms, options.delay_max_ms, cancel).await {
        return State::Done(StopReason::UserCancelled);
    }

    State::AwaitingList
}
