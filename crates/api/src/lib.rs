pub mod course;
pub mod student;

pub use course::Course;
pub use student::Student;

use log::debug;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("network error: {}", .0)]
    Network(String),
}

/// Tuning knobs for the simulated backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Simulated round-trip time of a catalog fetch.
    pub latency: Duration,

    /// Simulated round-trip time of a single-course lookup.
    pub lookup_latency: Duration,

    /// Probability in `[0, 1]` that a catalog fetch fails.
    pub failure_rate: f64,

    /// What a successful fetch returns, in order.
    pub catalog: Vec<Course>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(800),
            lookup_latency: Duration::from_millis(300),
            failure_rate: 0.1,
            catalog: Course::catalog(),
        }
    }
}

/// Source of samples in `[0, 1)`, drawn once per catalog fetch to decide
/// whether it fails.
///
/// Injectable so tests can pin the outcome rather than depend on an unseeded
/// global generator. Any `FnMut() -> f64` closure works.
pub trait Sampler: Send {
    fn sample(&mut self) -> f64;
}

impl<F: FnMut() -> f64 + Send> Sampler for F {
    fn sample(&mut self) -> f64 {
        self()
    }
}

/// Samples the thread-local RNG.
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
    fn sample(&mut self) -> f64 {
        rand::thread_rng().gen()
    }
}

/// Suspends the caller for the simulated network delay.
///
/// Injectable so tests don't have to spend wall-clock time on fake latency.
pub trait Delay: Send {
    fn sleep(&mut self, d: Duration);
}

/// Really sleeps. The API is expected to be driven from a worker thread, so
/// this never stalls a UI.
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d)
    }
}

/// A stand-in for a real course-listing backend.
///
/// Each call suspends for a fixed simulated latency, and catalog fetches fail
/// at a configured rate so callers are forced to exercise their error paths.
/// There is no backing state to corrupt: every success hands out a fresh copy
/// of the catalog.
pub struct MockApi {
    config: ApiConfig,
    sampler: Box<dyn Sampler>,
    delay: Box<dyn Delay>,
}

impl MockApi {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_parts(config, ThreadRngSampler, ThreadDelay)
    }

    /// Build with an explicit randomness source and delay, for tests.
    pub fn with_parts(
        config: ApiConfig,
        sampler: impl Sampler + 'static,
        delay: impl Delay + 'static,
    ) -> Self {
        Self {
            config,
            sampler: Box::new(sampler),
            delay: Box::new(delay),
        }
    }

    /// Fetch the full course catalog.
    ///
    /// All-or-nothing: success is always the complete catalog in definition
    /// order, never a subset. Fails with [`Error::Network`] at the configured
    /// rate; failures are resampled per call, so a retry may succeed.
    pub fn courses(&mut self) -> Result<Vec<Course>> {
        self.delay.sleep(self.config.latency);

        let roll = self.sampler.sample();
        if roll < self.config.failure_rate {
            debug!("injecting fetch failure (rolled {})", roll);
            return Err(Error::Network("Unable to fetch courses".to_string()));
        }

        Ok(self.config.catalog.clone())
    }

    /// Look up a single course. Never fails: an unknown id is `None`, not an
    /// error, and no failure is injected.
    pub fn course_by_id(&mut self, id: u32) -> Option<Course> {
        self.delay.sleep(self.config.lookup_latency);

        self.config.catalog.iter().find(|c| c.id == id).cloned()
    }
}
