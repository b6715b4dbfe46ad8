//! Clocks and wall-clock conversion.
//!
//! Everything inside the server works on Unix epoch milliseconds. The clock is
//! injected so that rate windows, caches and phase timers can be driven by
//! hand in tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, FixedOffset, LocalResult, Offset, TimeZone, Utc};

/// Source of "now" in epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: i64,
}

impl FixedClock {
    pub fn new(at_millis: i64) -> Self {
        Self { at: at_millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.at
    }
}

/// Clock moved explicitly by the test (quota windows, cache TTL, rate windows)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Epoch milliseconds as a date-time at `utc_offset_hours`.
///
/// Offsets outside ±24 h are treated as UTC.
pub fn timestamp_to_local(timestamp_millis: i64, utc_offset_hours: i32) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix());
    match offset.timestamp_millis_opt(timestamp_millis) {
        LocalResult::Single(dt) => dt,
        _ => DateTime::<Utc>::UNIX_EPOCH.with_timezone(&offset),
    }
}
