//! Fixed-interval throttle in front of a backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sift_core::models::Prompt;
use sift_core::traits::ILanguageModel;
use sift_core::SiftResult;
use tracing::trace;

/// Sleeps a fixed delay before every call to the wrapped backend.
///
/// The delay applies per call, so a unit making several calls pays it each time.
pub struct Throttled {
    inner: Arc<dyn ILanguageModel>,
    delay: Duration,
    calls: AtomicU64,
}

impl Throttled {
    pub fn new(inner: Arc<dyn ILanguageModel>, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            calls: AtomicU64::new(0),
        }
    }

    pub fn from_millis(inner: Arc<dyn ILanguageModel>, delay_ms: u64) -> Self {
        Self::new(inner, Duration::from_millis(delay_ms))
    }

    /// Calls forwarded so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl ILanguageModel for Throttled {
    fn invoke(&self, prompt: &Prompt) -> SiftResult<String> {
        if !self.delay.is_zero() {
            trace!(backend = self.inner.name(), delay_ms = self.delay.as_millis() as u64, "throttling");
            std::thread::sleep(self.delay);
        }
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.invoke(prompt)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
