//! Fixed-bucket rolling window counter.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::clock::Clock;

/// Sum aggregator for [`RollingWindow::reduce`].
pub fn sum(buckets: &[u64]) -> u64 {
    buckets.iter().sum()
}

struct WindowInner {
    /// One bucket per `bucket_width` slice of the window.
    buckets: Vec<u64>,
    /// Index of the bucket covering `last_tick`.
    cursor: usize,
    /// Whole bucket-widths elapsed between `origin` and the last access.
    last_tick: u64,
}

/// A time-decaying counter over a fixed trailing window.
///
/// Values appended more than `window` ago stop contributing to
/// [`reduce`](Self::reduce). Expiry is lazy: stale buckets are zeroed on
/// the next append or reduce, never by a background task, so an idle
/// counter holds stale buckets until it is touched again.
pub struct RollingWindow {
    inner: Mutex<WindowInner>,
    clock: Arc<dyn Clock>,
    origin: Instant,
    bucket_width: Duration,
}

impl RollingWindow {
    /// Create a counter spanning `window`, bucketed to `bucket_width`.
    ///
    /// A window no wider than one bucket degenerates to a single
    /// continuously-overwritten bucket.
    pub fn new(window: Duration, bucket_width: Duration, clock: Arc<dyn Clock>) -> Self {
        let width_secs = bucket_width.as_secs().max(1);
        let buckets = (window.as_secs() / width_secs).max(1) as usize;
        let origin = clock.now();
        Self {
            inner: Mutex::new(WindowInner {
                buckets: vec![0; buckets],
                cursor: 0,
                last_tick: 0,
            }),
            clock,
            origin,
            bucket_width,
        }
    }

    /// Add `value` into the bucket for the current instant, expiring any
    /// buckets that fell out of the window since the last access.
    pub fn append(&self, value: u64) {
        let mut inner = self.inner.lock().expect("rolling window mutex poisoned");
        self.advance(&mut inner);
        let cursor = inner.cursor;
        inner.buckets[cursor] += value;
    }

    /// Apply `aggregate` over the currently-valid buckets.
    ///
    /// Performs the same lazy expiry pass as [`append`](Self::append), so
    /// a reduce alone also retires stale buckets.
    pub fn reduce<F>(&self, aggregate: F) -> u64
    where
        F: FnOnce(&[u64]) -> u64,
    {
        let mut inner = self.inner.lock().expect("rolling window mutex poisoned");
        self.advance(&mut inner);
        aggregate(&inner.buckets)
    }

    /// Zero the buckets that expired since the last access and move the
    /// cursor to the bucket for "now". Must hold the inner lock.
    fn advance(&self, inner: &mut WindowInner) {
        let elapsed = self.clock.now().duration_since(self.origin);
        let tick = (elapsed.as_nanos() / self.bucket_width.as_nanos()) as u64;

        let distance = tick.saturating_sub(inner.last_tick);
        if distance == 0 {
            return;
        }

        let len = inner.buckets.len();
        if distance >= len as u64 {
            // The whole window has expired.
            inner.buckets.fill(0);
            inner.cursor = (tick % len as u64) as usize;
        } else {
            for _ in 0..distance {
                inner.cursor = (inner.cursor + 1) % len;
                let cursor = inner.cursor;
                inner.buckets[cursor] = 0;
            }
        }
        inner.last_tick = tick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const SECOND: Duration = Duration::from_secs(1);

    fn window(secs: u64) -> (RollingWindow, Arc<ManualClock>) {
        let clock = ManualClock::new();
        let w = RollingWindow::new(Duration::from_secs(secs), SECOND, clock.clone());
        (w, clock)
    }

    #[test]
    fn test_empty_window_sums_to_zero() {
        let (w, _clock) = window(10);
        assert_eq!(w.reduce(sum), 0);
    }

    #[test]
    fn test_appends_accumulate_within_window() {
        let (w, clock) = window(10);

        w.append(1);
        w.append(2);
        clock.advance(Duration::from_secs(3));
        w.append(4);

        assert_eq!(w.reduce(sum), 7);
    }

    #[test]
    fn test_old_buckets_fall_out_as_time_advances() {
        let (w, clock) = window(5);

        w.append(10);
        clock.advance(Duration::from_secs(3));
        w.append(1);

        // First bucket is still within the 5s window.
        assert_eq!(w.reduce(sum), 11);

        // Another 3s pushes the first bucket (t=0) out but keeps t=3.
        clock.advance(Duration::from_secs(3));
        assert_eq!(w.reduce(sum), 1);
    }

    #[test]
    fn test_whole_window_expiry_clears_everything() {
        let (w, clock) = window(5);

        w.append(3);
        clock.advance(Duration::from_secs(2));
        w.append(3);

        clock.advance(Duration::from_secs(60));
        assert_eq!(w.reduce(sum), 0);

        // Still usable after a full clear.
        w.append(2);
        assert_eq!(w.reduce(sum), 2);
    }

    #[test]
    fn test_reduce_alone_expires_buckets() {
        let (w, clock) = window(3);

        w.append(5);
        clock.advance(Duration::from_secs(4));

        // No append in between; the read itself must retire the bucket.
        assert_eq!(w.reduce(sum), 0);
    }

    #[test]
    fn test_single_bucket_window_overwrites() {
        let (w, clock) = window(1);

        w.append(1);
        w.append(1);
        assert_eq!(w.reduce(sum), 2);

        clock.advance(SECOND);
        assert_eq!(w.reduce(sum), 0);

        w.append(1);
        assert_eq!(w.reduce(sum), 1);
    }

    #[test]
    fn test_sub_second_advances_stay_in_bucket() {
        let (w, clock) = window(2);

        w.append(1);
        clock.advance(Duration::from_millis(900));
        w.append(1);
        assert_eq!(w.reduce(sum), 2);

        // Crossing the 1s boundary moves to the next bucket but keeps both.
        clock.advance(Duration::from_millis(200));
        w.append(1);
        assert_eq!(w.reduce(sum), 3);
    }
}
