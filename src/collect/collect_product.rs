use anyhow::{Context, Result};
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::config::config::ScrapeConfig;
use crate::extractors::{extract, feelunique};
use crate::record::{Record, PRODUCT_TEMPLATE};
use crate::session::{wait_for, BrowserSession, SessionError};
use crate::storage::RecordSink;
use crate::utilities::generate_random_delay::generate_random_delay;

/// Loads the product page, reads the product fields and saves them as a
/// one-element record set.
///
/// An interrupt before the page is read fails with [`SessionError::Cancelled`]
/// and nothing is written.
pub async fn collect_product<S, K>(
    session: &S,
    product_url: &str,
    scrape: &ScrapeConfig,
    sink: &mut K,
    cancel: &CancellationToken,
) -> Result<Record>
where
    S: BrowserSession,
    K: RecordSink + ?Sized,
{
    if cancel.is_cancelled() {
        return Err(SessionError::Cancelled.into());
    }

    info!("Loading the page {}", product_url);
    tokio::select! {
        _ = cancel.cancelled() => return Err(SessionError::Cancelled.into()),
        loaded = session.goto(product_url) => {
            loaded.with_context(|| format!("Failed to load {}", product_url))?
        }
    }

    accept_cookies(session, scrape, cancel).await;

    if cancel.is_cancelled() {
        return Err(SessionError::Cancelled.into());
    }

    info!("Collecting product data");
    let record = extract(session, None, &PRODUCT_TEMPLATE, feelunique::PRODUCT_RULES).await;

    info!("Saving the product data");
    sink.persist(std::slice::from_ref(&record))?;

    Ok(record)
}

/// Clicks the cookie banner away when there is one. Never fails.
async fn accept_cookies<S: BrowserSession>(
    session: &S,
    scrape: &ScrapeConfig,
    cancel: &CancellationToken,
) {
    let button = match wait_for(session, feelunique::COOKIE_CONSENT, scrape.wait_options(), cancel).await {
        Ok(button) => button,
        Err(e) => {
            debug!("No cookie banner to dismiss: {}", e);
            return;
        }
    };

    if let Err(e) = session.click(&button).await {
        debug!("Cookie button could not be clicked: {}", e);
        return;
    }
    info!("Clicked the cookies button");

    generate_random_delay(scrape.delay_min_ms, scrape.delay_max_ms, cancel).await;
}
