use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use super::{BrowserSession, SessionError};

#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

/// Polls until at least one element matches `selector` in the document.
///
/// Gives up with [`SessionError::Timeout`] once `timeout` has elapsed, or with
/// [`SessionError::Cancelled`] as soon as `cancel` fires.
pub async fn wait_for_all<S: BrowserSession>(
    session: &S,
    selector: &str,
    options: WaitOptions,
    cancel: &CancellationToken,
) -> Result<Vec<S::Element>, SessionError> {
    let started = Instant::now();

    loop {
        if cancel.is_cancelled() {
            return Err(SessionError::Cancelled);
        }

        let found = session.find_all(None, selector).await?;
        if !found.is_empty() {
            return Ok(found);
        }

        let waited = started.elapsed();
        if waited >= options.timeout {
            return Err(SessionError::Timeout {
                selector: selector.to_string(),
                waited,
            });
        }

        let pause = options.poll_interval.min(options.timeout - waited);
        tokio::select! {
            _ = cancel.cancelled() => return Err(SessionError::Cancelled),
            _ = sleep(pause) => {}
        }
    }
}

/// Like [`wait_for_all`], keeping only the first match.
pub async fn wait_for<S: BrowserSession>(
    session: &S,
    selector: &str,
    options: WaitOptions,
    cancel: &CancellationToken,
) -> Result<S::Element, SessionError> {
    let mut found = wait_for_all(session, selector, options, cancel).await?;
    Ok(found.swap_remove(0))
}
