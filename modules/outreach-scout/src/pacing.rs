use std::time::Duration;

use async_trait::async_trait;

/// Rate-limiting policy awaited between upstream calls.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps for a fixed interval on every pause.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "Pacing");
        tokio::time::sleep(self.delay).await;
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_waits_full_interval() {
        let pacer = FixedDelay::new(Duration::from_secs(3));
        let start = tokio::time::Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn no_delay_does_not_advance_time() {
        let start = tokio::time::Instant::now();
        NoDelay.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
