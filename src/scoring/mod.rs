//! Scoring module - score tracking and shot classification

mod classifier;

pub use classifier::*;

use crate::constants::POINTS_PER_MAKE;

/// Session totals. Only the simulation step mutates this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub attempts: u32,
    pub made: u32,
    pub points: u32,
}

impl Score {
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Count a make. Never lets `made` exceed `attempts`.
    pub fn record_make(&mut self) {
        if self.made < self.attempts {
            self.made += 1;
            self.points += POINTS_PER_MAKE;
        }
    }

    /// Percentage of attempts made (0.0 with no attempts)
    pub fn accuracy_percent(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.made as f32 / self.attempts as f32 * 100.0
        }
    }

    pub fn accuracy_label(&self) -> String {
        format!("{:.1}%", self.accuracy_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_score() {
        let score = Score::default();
        assert_eq!(score.accuracy_label(), "0.0%");
    }

    #[test]
    fn test_accuracy_label() {
        let mut score = Score::default();
        for _ in 0..3 {
            score.record_attempt();
        }
        score.record_make();
        assert_eq!(score.points, 2);
        assert_eq!(score.accuracy_label(), "33.3%");
    }

    #[test]
    fn test_make_without_attempt_ignored() {
        let mut score = Score::default();
        score.record_make();
        assert_eq!(score, Score::default());
    }
}
