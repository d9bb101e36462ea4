//! Repeating game timer with an explicit cancel handle
//!
//! At most one interval exists at a time: `start` replaces any previous
//! interval before ticks from the new one can be observed, so a restart can
//! never leave two timers advancing the game at once.

use std::future;
use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

pub struct Ticker {
    interval: Option<Interval>,
}

impl Ticker {
    /// A ticker that never fires until started
    pub fn stopped() -> Self {
        Self { interval: None }
    }

    /// Begin ticking every `period`, starting one full period from now.
    /// Any previous interval is dropped, canceling its pending ticks.
    pub fn start(&mut self, period: Duration) {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(interval);
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Completes on the next tick; pends forever while stopped.
    /// Cancel-safe, suitable for select loops.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::stopped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_a_full_period() {
        let mut ticker = Ticker::stopped();
        ticker.start(Duration::from_millis(100));

        let begin = Instant::now();
        ticker.tick().await;

        assert!(ticker.is_running());
        assert_eq!(begin.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_never_fires() {
        let mut ticker = Ticker::stopped();
        assert!(!ticker.is_running());

        let outcome = timeout(Duration::from_millis(500), ticker.tick()).await;
        assert!(outcome.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_the_previous_interval() {
        let mut ticker = Ticker::stopped();
        ticker.start(Duration::from_millis(100));
        ticker.start(Duration::from_millis(40));

        // Only the 40ms cadence survives; nothing fires at the 100ms mark
        let begin = Instant::now();
        ticker.tick().await;
        assert_eq!(begin.elapsed(), Duration::from_millis(40));

        ticker.tick().await;
        assert_eq!(begin.elapsed(), Duration::from_millis(80));

        ticker.tick().await;
        assert_eq!(begin.elapsed(), Duration::from_millis(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_pending_ticks() {
        let mut ticker = Ticker::stopped();
        ticker.start(Duration::from_millis(50));
        ticker.stop();

        assert!(!ticker.is_running());
        let outcome = timeout(Duration::from_millis(200), ticker.tick()).await;
        assert!(outcome.is_err());
    }
}
