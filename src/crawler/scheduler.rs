//! Request pacing
//!
//! This module handles:
//! - Per-origin request bookkeeping (count and last request time)
//! - Enforcing a minimum pause between the end of one request and the start
//!   of the next to the same origin
//! - Keeping the pacing policy separate from the crawl loop, so a token
//!   bucket or similar can replace it without touching the crawler

use crate::url::origin_key;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use url::Url;

/// Decides when the next request to an origin may start
pub trait RatePolicy: Send {
    /// Returns how long to wait before a request to `origin`, or None if it may start now
    fn delay_for(&self, origin: &str, now: Instant) -> Option<Duration>;

    /// Records that a request to `origin` finished at `now`
    fn record_request(&mut self, origin: &str, now: Instant);

    /// Number of requests recorded for `origin`
    fn request_count(&self, origin: &str) -> u32;
}

/// Tracks request state for a single origin
#[derive(Debug, Clone, Default)]
pub struct OriginState {
    /// Number of requests made to this origin in the current run
    pub request_count: u32,

    /// When the last request to this origin finished
    pub last_request_time: Option<Instant>,
}

impl OriginState {
    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, interval: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed < interval {
            Some(interval - elapsed)
        } else {
            None
        }
    }

    /// Updates the request count and last request time
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }
}

/// Waits at least `interval` after each response before the next request
/// to the same origin
///
/// The first request to an origin never waits, so no delay follows the
/// last request of a run.
#[derive(Debug, Clone)]
pub struct MinIntervalPolicy {
    interval: Duration,
    origins: HashMap<String, OriginState>,
}

impl MinIntervalPolicy {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            origins: HashMap::new(),
        }
    }
}

impl RatePolicy for MinIntervalPolicy {
    fn delay_for(&self, origin: &str, now: Instant) -> Option<Duration> {
        self.origins
            .get(origin)?
            .time_until_next_request(self.interval, now)
    }

    fn record_request(&mut self, origin: &str, now: Instant) {
        self.origins
            .entry(origin.to_string())
            .or_default()
            .record_request(now);
    }

    fn request_count(&self, origin: &str) -> u32 {
        self.origins
            .get(origin)
            .map(|state| state.request_count)
            .unwrap_or(0)
    }
}

/// Paces requests through a rate policy
///
/// Requests go out one at a time: `wait_turn` sleeps until the policy allows
/// the next request to the URL's origin, and `finish` records when the
/// response came back, whether or not it succeeded.
pub struct Scheduler {
    policy: Box<dyn RatePolicy>,
}

impl Scheduler {
    /// Creates a scheduler with a minimum interval between requests per origin
    pub fn with_interval(interval: Duration) -> Self {
        Self::new(Box::new(MinIntervalPolicy::new(interval)))
    }

    pub fn new(policy: Box<dyn RatePolicy>) -> Self {
        Self { policy }
    }

    /// Waits until a request to `url` is allowed
    pub async fn wait_turn(&mut self, url: &Url) {
        let origin = origin_key(url);

        if let Some(wait) = self.policy.delay_for(&origin, Instant::now()) {
            tracing::debug!("Waiting {:?} before next request to {}", wait, origin);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records that the request to `url` has finished
    pub fn finish(&mut self, url: &Url) {
        self.policy.record_request(&origin_key(url), Instant::now());
    }

    /// Number of requests sent to the origin of `url`
    pub fn request_count(&self, url: &Url) -> u32 {
        self.policy.request_count(&origin_key(url))
    }
}
