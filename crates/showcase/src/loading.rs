//! Short-lived UI flags driven by timers.
//!
//! Catalog views show skeleton placeholders for a moment before their static
//! content "loads", and flash an "added to cart" indicator after a cart add.
//! Both are an [`ExpiringFlag`].

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A flag that is set on creation and clears itself after `delay`.
///
/// The timer runs on a spawned tokio task. Dropping the flag aborts it, so
/// a torn-down view is never touched by a late timer.
#[derive(Debug)]
pub struct ExpiringFlag {
    state: watch::Receiver<bool>,
    timer: JoinHandle<()>,
}

impl ExpiringFlag {
    /// Start the timer. Must be called inside a tokio runtime.
    #[must_use]
    pub fn start(delay: Duration) -> Self {
        let (tx, state) = watch::channel(true);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send_replace(false);
        });
        Self { state, timer }
    }

    /// Whether the delay has not yet elapsed.
    #[must_use]
    pub fn is_set(&self) -> bool {
        *self.state.borrow()
    }

    /// Wait until the flag clears.
    pub async fn cleared(&mut self) {
        // Errors only once the timer is gone.
        let _ = self.state.wait_for(|set| !*set).await;
    }
}

impl Drop for ExpiringFlag {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_clears_after_delay() {
        let mut flag = ExpiringFlag::start(Duration::from_millis(1500));
        assert!(flag.is_set());

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert!(flag.is_set());

        flag.cleared().await;
        assert!(!flag.is_set());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleared_returns_immediately_once_clear() {
        let mut flag = ExpiringFlag::start(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(20)).await;
        flag.cleared().await;
        flag.cleared().await;
        assert!(!flag.is_set());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timer() {
        let flag = ExpiringFlag::start(Duration::from_secs(2));
        let mut state = flag.state.clone();
        drop(flag);

        // The aborted task drops its sender without ever clearing.
        assert!(state.changed().await.is_err());
        assert!(*state.borrow());
    }
}
