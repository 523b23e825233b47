use crate::estimator::StateEstimator;

/// Coarse counts describing the tracked state after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerMetrics {
    pub step_count: u32,
    pub live_agents: usize,
    pub dead_agents: usize,
    pub stationary_bombs: usize,
    pub moving_bombs: usize,
    pub items: usize,
}

impl TrackerMetrics {
    pub fn from_estimator(estimator: &StateEstimator) -> Self {
        let (moving_bombs, stationary_bombs) = estimator
            .bombs()
            .fold((0, 0), |(moving, stationary), bomb| {
                if bomb.moving {
                    (moving + 1, stationary)
                } else {
                    (moving, stationary + 1)
                }
            });

        Self {
            step_count: estimator.step_count().unwrap_or(0),
            live_agents: estimator.agents().count(),
            dead_agents: estimator.dead_agents().count(),
            stationary_bombs,
            moving_bombs,
            items: estimator.items().count(),
        }
    }

    pub fn log(&self) {
        tracing::debug!(
            target: "pommer_core::estimator",
            step = self.step_count,
            live_agents = self.live_agents,
            dead_agents = self.dead_agents,
            stationary_bombs = self.stationary_bombs,
            moving_bombs = self.moving_bombs,
            items = self.items,
            "tracker metrics"
        );
    }
}
