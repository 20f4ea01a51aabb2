use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

/// Sleeps for a random number of milliseconds in `min_delay..max_delay`.
///
/// Returns `false` when `cancel` fired before the delay ran out.
pub async fn generate_random_delay(
    min_delay: u64,
    max_delay: u64,
    cancel: &CancellationToken,
) -> bool {
    let delay = pick_delay(&mut StdRng::from_entropy(), min_delay, max_delay);

    debug!("Delay: {} milliseconds", delay);
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = sleep(Duration::from_millis(delay)) => true,
    }
}

fn pick_delay<R: Rng>(rng: &mut R, min_delay: u64, max_delay: u64) -> u64 {
    if min_delay >= max_delay {
        return min_delay;
    }
    rng.gen_range(min_delay..max_delay)
}
