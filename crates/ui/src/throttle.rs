use std::sync::Arc;
use std::time::Duration;

use quartz_core::{Clock, RenderStatistics};

/// Default time between refreshes of the displayed statistics.
pub const DEFAULT_STATISTICS_INTERVAL: Duration = Duration::from_millis(400);

/// Holds the statistics shown on screen and only refreshes them every `interval`,
/// so the numbers stay readable.
pub struct StatisticsThrottle {
    clock: Arc<dyn Clock>,
    interval: Duration,
    last_update: Option<Duration>,
    saved: RenderStatistics,
}

impl StatisticsThrottle {
    pub fn new(clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            last_update: None,
            saved: RenderStatistics::default(),
        }
    }

    /// Offer the latest statistics and get back the ones to display.
    ///
    /// The saved snapshot is replaced when strictly more than `interval` has passed
    /// since the last replacement. The first observation is always taken.
    pub fn observe(&mut self, latest: RenderStatistics) -> RenderStatistics {
        let now = self.clock.now();
        let due = match self.last_update {
            Some(last) => now.saturating_sub(last) > self.interval,
            None => true,
        };
        if due {
            self.last_update = Some(now);
            self.saved = latest;
        }
        self.saved
    }

    pub fn saved(&self) -> RenderStatistics {
        self.saved
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl std::fmt::Debug for StatisticsThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticsThrottle")
            .field("interval", &self.interval)
            .field("last_update", &self.last_update)
            .field("saved", &self.saved)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartz_core::ManualClock;

    fn stats(fps: f64) -> RenderStatistics {
        RenderStatistics {
            average_fps: fps,
            ..RenderStatistics::default()
        }
    }

    #[test]
    fn updates_inside_the_interval_are_held_back() {
        let clock = Arc::new(ManualClock::new());
        let mut throttle = StatisticsThrottle::new(clock.clone(), DEFAULT_STATISTICS_INTERVAL);

        assert_eq!(throttle.observe(stats(60.0)).average_fps, 60.0);
        clock.advance_secs(0.3);
        assert_eq!(throttle.observe(stats(30.0)).average_fps, 60.0);
    }

    #[test]
    fn updates_after_the_interval_replace_the_snapshot() {
        let clock = Arc::new(ManualClock::new());
        let mut throttle = StatisticsThrottle::new(clock.clone(), DEFAULT_STATISTICS_INTERVAL);

        throttle.observe(stats(60.0));
        clock.advance_secs(0.5);
        assert_eq!(throttle.observe(stats(30.0)).average_fps, 30.0);

        // The interval restarts from the replacement, not from the first observation.
        clock.advance_secs(0.2);
        assert_eq!(throttle.observe(stats(10.0)).average_fps, 30.0);
        clock.advance_secs(0.25);
        assert_eq!(throttle.observe(stats(10.0)).average_fps, 10.0);
    }

    #[test]
    fn exactly_the_interval_is_not_enough() {
        let clock = Arc::new(ManualClock::new());
        let mut throttle = StatisticsThrottle::new(clock.clone(), Duration::from_millis(400));

        throttle.observe(stats(60.0));
        clock.advance(Duration::from_millis(400));
        assert_eq!(throttle.observe(stats(30.0)).average_fps, 60.0);
    }
}
