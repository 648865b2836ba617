//! Simulated inference latency

use std::sync::Arc;
use std::time::Duration;

use super::scorer::Scorer;

#[derive(Clone)]
pub struct LatencySimulator {
    enabled: bool,
    scorer: Arc<dyn Scorer>,
}

impl LatencySimulator {
    pub fn new(enabled: bool, scorer: Arc<dyn Scorer>) -> Self {
        Self { enabled, scorer }
    }

    pub fn disabled(scorer: Arc<dyn Scorer>) -> Self {
        Self::new(false, scorer)
    }

    /// Delay drawn from `[min, max)` milliseconds, zero when disabled
    pub fn delay_for(&self, window_ms: (u64, u64)) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let (min, max) = window_ms;
        let ms = self.scorer.integer(min as i64, max as i64).max(0) as u64;
        Duration::from_millis(ms)
    }

    pub async fn pause(&self, window_ms: (u64, u64)) {
        let delay = self.delay_for(window_ms);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
