// Single-shot monotonic stopwatch.

use std::time::{Duration, Instant};

/// A unit elapsed time can be reported in.
pub trait TimeUnit {
    const PER_SECOND: f64;
}

pub struct Seconds;
pub struct Milliseconds;
pub struct Microseconds;
pub struct Nanoseconds;

impl TimeUnit for Seconds {
    const PER_SECOND: f64 = 1.0;
}

impl TimeUnit for Milliseconds {
    const PER_SECOND: f64 = 1e3;
}

impl TimeUnit for Microseconds {
    const PER_SECOND: f64 = 1e6;
}

impl TimeUnit for Nanoseconds {
    const PER_SECOND: f64 = 1e9;
}

/// Measures the time between `start` and `stop`.
///
/// Until `stop` is called, the elapsed time runs up to the moment it is
/// queried. Not meant to be shared between threads or restarted mid-run.
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    begin: Instant,
    end: Option<Instant>,
}

impl Stopwatch {
    /// A stopwatch that is already running.
    pub fn started() -> Self {
        Self {
            begin: Instant::now(),
            end: None,
        }
    }

    pub fn start(&mut self) {
        self.begin = Instant::now();
        self.end = None;
    }

    pub fn stop(&mut self) {
        self.end = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.end
            .unwrap_or_else(Instant::now)
            .saturating_duration_since(self.begin)
    }

    pub fn elapsed_in<U: TimeUnit>(&self) -> f64 {
        self.elapsed().as_secs_f64() * U::PER_SECOND
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_in::<Milliseconds>()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::started()
    }
}
