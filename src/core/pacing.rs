use crate::domain::ports::Pacer;
use async_trait::async_trait;
use std::time::Duration;

/// Sleeps a fixed interval before every remote call to stay under the service's rate limit.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelayPacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::debug!("Pacing remote call by {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_pause_waits_configured_delay() {
        let pacer = FixedDelayPacer::new(Duration::from_millis(1500));
        let started = Instant::now();
        pacer.pause().await;
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_zero_delay_returns_immediately() {
        let pacer = FixedDelayPacer::new(Duration::ZERO);
        let started = std::time::Instant::now();
        pacer.pause().await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_default_delay_is_one_second() {
        assert_eq!(FixedDelayPacer::default().delay(), Duration::from_secs(1));
    }
}
