//! Real-time playback.
//!
//! The stream itself never sleeps between frames; it produces them as fast
//! as the consumer pulls.  A [`Pacer`] spaces pulls out so one simulated
//! `time_step` takes roughly one wall-clock `time_step`.

use std::time::{Duration, Instant};

/// Enforces a minimum interval between successive [`wait`][Pacer::wait] calls.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    last:     Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// One tick per simulated `time_step` seconds.  Non-finite or negative
    /// steps give a zero interval, i.e. no pacing.
    pub fn from_time_step(time_step: f64) -> Self {
        let interval = Duration::try_from_secs_f64(time_step).unwrap_or(Duration::ZERO);
        Self::new(interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until at least `interval` has passed since the previous call.
    /// The first call returns immediately.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }

    /// Wrap `iter` so every `next()` is paced.
    pub fn pace<I: Iterator>(self, iter: I) -> Paced<I> {
        Paced { inner: iter, pacer: self }
    }
}

/// Iterator adapter returned by [`Pacer::pace`].
#[derive(Debug)]
pub struct Paced<I> {
    inner: I,
    pacer: Pacer,
}

impl<I> Paced<I> {
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator> Iterator for Paced<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.pacer.wait();
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
