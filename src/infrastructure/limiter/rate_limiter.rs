use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

const EVICTION_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Outcome of a rate-limit check for one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterDecision {
    pub allowed: bool,
    pub remaining_tokens: f64,
    pub retry_after_secs: Option<u64>,
}

/// Fractional token bucket. Fractions matter because the comment refill
/// rate is well below one token per second.
#[derive(Debug)]
struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn new(capacity: f64, refill_per_sec: f64) -> Self {
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec,
            last_refill: Instant::now(),
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        if elapsed > 0.0 {
            self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
            self.last_refill = now;
        }
    }

    /// Epsilon guards against fp rounding just below a whole token.
    fn try_consume(&mut self) -> bool {
        self.refill();
        if self.tokens + 1e-12 >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn remaining(&self) -> f64 {
        self.tokens
    }

    fn secs_until_next_token(&self) -> u64 {
        let deficit = 1.0 - self.tokens;
        if deficit <= 0.0 || self.refill_per_sec <= 0.0 {
            return 1;
        }
        ((deficit / self.refill_per_sec).ceil() as u64).max(1)
    }
}

/// Weighted sliding window over a fixed interval. Smooths the boundary
/// between windows by counting a decaying share of the previous one.
#[derive(Debug)]
struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    window_start: Instant,
    current_count: u64,
    prev_count: u64,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64) -> Self {
        Self {
            window_size,
            limit,
            window_start: Instant::now(),
            current_count: 0,
            prev_count: 0,
        }
    }

    fn allow(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.window_start);

        if elapsed >= self.window_size {
            self.prev_count = self.current_count;
            self.current_count = 0;
            self.window_start = now;
        }

        let weight = elapsed.as_secs_f64() / self.window_size.as_secs_f64();
        let effective = (self.prev_count as f64) * (1.0 - weight) + self.current_count as f64;

        if effective < self.limit as f64 {
            self.current_count += 1;
            true
        } else {
            false
        }
    }
}

/// Per-key limiter: the bucket absorbs short bursts, the window caps the
/// hourly total. Both must reject before a submission is refused.
#[derive(Debug)]
struct HybridLimiter {
    bucket: TokenBucket,
    window: SlidingWindow,
    last_seen: Instant,
}

impl HybridLimiter {
    fn new(capacity: f64, refill_per_sec: f64, window_size: Duration, limit: u64) -> Self {
        Self {
            bucket: TokenBucket::new(capacity, refill_per_sec),
            window: SlidingWindow::new(window_size, limit),
            last_seen: Instant::now(),
        }
    }

    fn check(&mut self) -> LimiterDecision {
        self.last_seen = Instant::now();

        if self.bucket.try_consume() {
            return LimiterDecision {
                allowed: true,
                remaining_tokens: self.bucket.remaining(),
                retry_after_secs: None,
            };
        }

        if self.window.allow() {
            return LimiterDecision {
                allowed: true,
                remaining_tokens: self.bucket.remaining().max(0.0),
                retry_after_secs: None,
            };
        }

        LimiterDecision {
            allowed: false,
            remaining_tokens: self.bucket.remaining(),
            retry_after_secs: Some(self.bucket.secs_until_next_token()),
        }
    }
}

/// Shared store of per-user limiters. Idle entries are evicted by a
/// background sweep so the map does not grow with every visitor ever
/// seen.
#[derive(Clone)]
pub struct SubmissionLimiterStore {
    map: Arc<DashMap<String, Arc<Mutex<HybridLimiter>>>>,
    burst_capacity: f64,
    refill_per_sec: f64,
    window_size: Duration,
    window_limit: u64,
    idle_ttl: Duration,
}

impl SubmissionLimiterStore {
    pub fn new(
        burst_capacity: f64,
        refill_per_sec: f64,
        window_size: Duration,
        window_limit: u64,
        idle_ttl: Duration,
    ) -> Self {
        let store = Self {
            map: Arc::new(DashMap::new()),
            burst_capacity,
            refill_per_sec,
            window_size,
            window_limit,
            idle_ttl,
        };

        store.spawn_eviction_task();
        store
    }

    pub fn check(&self, key: &str) -> LimiterDecision {
        let limiter = self.limiter_for(key);
        let mut guard = limiter.lock();
        guard.check()
    }

    fn limiter_for(&self, key: &str) -> Arc<Mutex<HybridLimiter>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }

        let fresh = Arc::new(Mutex::new(HybridLimiter::new(
            self.burst_capacity,
            self.refill_per_sec,
            self.window_size,
            self.window_limit,
        )));

        // A concurrent insert may have won the race; keep whichever
        // entry is already in the map.
        match self.map.entry(key.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(entry) => entry.get().clone(),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(fresh.clone());
                fresh
            }
        }
    }

    fn spawn_eviction_task(&self) {
        let map = self.map.clone();
        let ttl = self.idle_ttl;

        tokio::spawn(async move {
            loop {
                sleep(EVICTION_SWEEP_INTERVAL).await;
                let now = Instant::now();
                let stale: Vec<String> = map
                    .iter()
                    .filter_map(|entry| {
                        let limiter = entry.value().lock();
                        if now.duration_since(limiter.last_seen) > ttl {
                            Some(entry.key().clone())
                        } else {
                            None
                        }
                    })
                    .collect();

                for key in stale {
                    map.remove(&key);
                }
            }
        });
    }
}
