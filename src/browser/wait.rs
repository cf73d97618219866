//! Bounded waits and settle delays
//!
//! Every suspension point of the workflow goes through a `Clock`, so the
//! same workflow runs against real time (`TokioClock`) or virtual time
//! (`ManualClock`) without a live browser.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

use super::driver::{BrowserDriver, ElementSnapshot, Locator};
use crate::config::SessionConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Source of time for waits
#[async_trait]
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;

    /// Suspend for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock time backed by `tokio::time`
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Virtual clock: `sleep` returns immediately and advances time
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed_nanos: AtomicU64,
    sleeps: AtomicUsize,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total virtual time slept so far
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }

    /// Number of `sleep` calls so far
    #[must_use]
    pub fn sleep_count(&self) -> usize {
        self.sleeps.load(Ordering::SeqCst)
    }

    /// Move time forward without counting a sleep
    pub fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::SeqCst);
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        self.advance(duration);
    }
}

/// Bounded-wait helper shared by every workflow step
#[derive(Clone)]
pub struct Waiter {
    clock: Arc<dyn Clock>,
    timeout: Duration,
    poll_interval: Duration,
}

impl Waiter {
    pub fn new(clock: Arc<dyn Clock>, timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            clock,
            timeout,
            poll_interval,
        }
    }

    /// Waiter using the session's timeout and poll interval
    pub fn from_config(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, config.wait_timeout(), config.poll_interval())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Unconditional settle delay
    pub async fn settle(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        trace!("Settling for {:?}", delay);
        self.clock.sleep(delay).await;
    }

    /// Poll `probe` until it yields a value or the timeout passes.
    ///
    /// The first probe runs immediately. Probe errors count as "not yet".
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Timeout` naming `what` once the timeout passes.
    pub async fn poll_until<T, F, Fut>(&self, what: &str, mut probe: F) -> ScrapeResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ScrapeResult<Option<T>>>,
    {
        let start = self.clock.now();
        loop {
            match probe().await {
                Ok(Some(value)) => {
                    debug!(
                        "{} ready after {:?}",
                        what,
                        self.clock.now().saturating_sub(start)
                    );
                    return Ok(value);
                }
                Ok(None) => {}
                Err(e) => trace!("Probe for {} failed: {}", what, e),
            }

            if self.clock.now().saturating_sub(start) >= self.timeout {
                return Err(ScrapeError::Timeout {
                    what: what.to_string(),
                    timeout: self.timeout,
                });
            }

            self.clock.sleep(self.poll_interval).await;
        }
    }

    /// Wait until at least one element matches, then return every match
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Timeout` if nothing matches within the timeout.
    pub async fn until_all_present<D>(
        &self,
        driver: &D,
        locator: &Locator,
    ) -> ScrapeResult<Vec<ElementSnapshot>>
    where
        D: BrowserDriver + ?Sized,
    {
        let what = locator.to_string();
        self.poll_until(&what, move || async move {
            let found = driver.query(locator).await?;
            Ok((!found.is_empty()).then_some(found))
        })
        .await
    }

    /// Wait until an element matches, then return the first match
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Timeout` if nothing matches within the timeout.
    pub async fn until_present<D>(&self, driver: &D, locator: &Locator) -> ScrapeResult<ElementSnapshot>
    where
        D: BrowserDriver + ?Sized,
    {
        let mut found = self.until_all_present(driver, locator).await?;
        Ok(found.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waiter(clock: &Arc<ManualClock>) -> Waiter {
        Waiter::new(
            clock.clone(),
            Duration::from_secs(10),
            Duration::from_millis(500),
        )
    }

    #[tokio::test]
    async fn returns_immediately_when_ready() {
        let clock = Arc::new(ManualClock::new());
        let value = waiter(&clock)
            .poll_until("ready", || async { Ok(Some(7)) })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert_eq!(clock.sleep_count(), 0);
    }

    #[tokio::test]
    async fn polls_until_value_appears() {
        let clock = Arc::new(ManualClock::new());
        let mut attempts = 0;
        let value = waiter(&clock)
            .poll_until("third attempt", || {
                attempts += 1;
                let ready = attempts >= 3;
                async move { Ok(ready.then_some("done")) }
            })
            .await
            .unwrap();
        assert_eq!(value, "done");
        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn times_out_after_configured_duration() {
        let clock = Arc::new(ManualClock::new());
        let err = waiter(&clock)
            .poll_until::<(), _, _>("never", || async { Ok(None) })
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(clock.elapsed(), Duration::from_secs(10));
        assert!(err.to_string().contains("never"));
    }

    #[tokio::test]
    async fn probe_errors_count_as_not_ready() {
        let clock = Arc::new(ManualClock::new());
        let mut attempts = 0;
        let value = waiter(&clock)
            .poll_until("flaky", || {
                attempts += 1;
                let attempt = attempts;
                async move {
                    if attempt == 1 {
                        Err(ScrapeError::Browser("detached".to_string()))
                    } else {
                        Ok(Some(attempt))
                    }
                }
            })
            .await
            .unwrap();
        assert_eq!(value, 2);
    }

    #[tokio::test]
    async fn zero_settle_does_not_sleep() {
        let clock = Arc::new(ManualClock::new());
        let waiter = waiter(&clock);
        waiter.settle(Duration::ZERO).await;
        waiter.settle(Duration::from_secs(3)).await;
        assert_eq!(clock.sleep_count(), 1);
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
    }
}
