use std::path::PathBuf;
use std::time::Duration;

use crate::dijkstra::Termination;

pub const DEFAULT_OBSTACLE_FILE: &str = "obstacle.csv";
pub const DEFAULT_FRAME_DELAY_MS: u64 = 500;

/// Settings for one planning run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// CSV file with one obstacle `x,y` per row after the header.
    pub obstacles: PathBuf,
    /// Pause after each animation frame.
    pub frame_delay: Duration,
    pub termination: Termination,
    /// Clear the terminal before drawing each frame.
    pub clear_screen: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            obstacles: PathBuf::from(DEFAULT_OBSTACLE_FILE),
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
            termination: Termination::OnSettle,
            clear_screen: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.obstacles, PathBuf::from("obstacle.csv"));
        assert_eq!(config.frame_delay, Duration::from_millis(500));
        assert_eq!(config.termination, Termination::OnSettle);
        assert!(config.clear_screen);
    }
}
