use log::info;
use tokio_util::sync::CancellationToken;

use crate::config::config::ScrapeConfig;
use crate::extractors::feelunique;
use crate::pagination::{collect_all_pages, ItemExtractor, WalkOptions, WalkReport};
use crate::record::REVIEW_TEMPLATE;
use crate::session::BrowserSession;
use crate::storage::RecordSink;

/// Walks the review list of the page currently loaded in `session`.
pub async fn collect_reviews<S, K>(
    session: &S,
    scrape: &ScrapeConfig,
    sink: &mut K,
    cancel: &CancellationToken,
) -> WalkReport
where
    S: BrowserSession,
    K: RecordSink + ?Sized,
{
    let items = ItemExtractor {
        template: &REVIEW_TEMPLATE,
        rules: feelunique::REVIEW_RULES,
    };
    let options = WalkOptions {
        wait: scrape.wait_options(),
        delay_min_ms: scrape.delay_min_ms,
        delay_max_ms: scrape.delay_max_ms,
    };

    info!("Collecting reviews");
    let report = collect_all_pages(
        session,
        &feelunique::REVIEW_PAGES,
        &items,
        sink,
        &options,
        cancel,
    )
    .await;

    info!(
        "Collected {} reviews over {} pages ({})",
        report.records.len(),
        report.pages,
        report.stop
    );
    report
}
