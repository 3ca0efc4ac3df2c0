//! Bounded, time-budgeted polling until a search matches
//!
//! A search against an eventually-consistent inbox may legitimately return
//! zero matches for a while after the triggering event. The loop below
//! re-issues the query until a match appears or the caller's time budget is
//! exhausted. Each attempt runs with the *remaining* budget as its network
//! timeout, so stacked slow attempts can never overrun the overall deadline
//! by more than the remaining budget itself.

use std::time::{Duration, Instant};

use crate::error::Result;

/// Overall deadline applied when waiting is enabled and the caller did not
/// supply a timeout (5 minutes)
pub(crate) const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Cap on the idle wait between attempts
const MAX_IDLE_WAIT: Duration = Duration::from_secs(9);

/// Floor for the per-attempt timeout; an exhausted budget polls once more
/// with this and then fails through the transport's own timeout
const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(1);

/// A search response page that knows its total match count
///
/// Only the count drives the retry decision; the page body is opaque here.
pub trait SearchPage {
    fn total_count(&self) -> u64;
}

/// Time source and sleep capability used by the polling loop
///
/// Injectable so tests can simulate elapsed time without real delays.
pub(crate) trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock: `Instant::now` plus a blocking thread sleep
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Re-issue `attempt` until it returns a page with a non-zero match count
///
/// `attempt` receives the timeout for that single attempt: the full
/// `deadline` on the first call, the remaining budget afterwards. A
/// transport error is terminal and propagates unchanged; only a successful
/// zero-match response is retried. Between attempts the loop sleeps for the
/// remaining budget, capped at nine seconds.
pub(crate) fn poll_until_found<T, C, F>(clock: &C, deadline: Duration, mut attempt: F) -> Result<T>
where
    T: SearchPage,
    C: Clock,
    F: FnMut(Duration) -> Result<T>,
{
    let start = clock.now();
    let mut attempt_timeout = deadline;
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let page = attempt(attempt_timeout)?;
        if page.total_count() != 0 {
            log::debug!(
                "search matched {} item(s) on attempt {}",
                page.total_count(),
                attempts
            );
            return Ok(page);
        }

        let elapsed = clock.now().duration_since(start);
        attempt_timeout = deadline
            .saturating_sub(elapsed)
            .max(MIN_ATTEMPT_TIMEOUT);
        log::debug!(
            "no matches on attempt {}, {}ms of budget left",
            attempts,
            attempt_timeout.as_millis()
        );
        clock.sleep(attempt_timeout.min(MAX_IDLE_WAIT));
    }
}
