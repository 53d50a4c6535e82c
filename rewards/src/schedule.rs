//! Piecewise-constant daily reward rate schedule

use serde::{Deserialize, Serialize};
use stakepool_core::{Amount, Timestamp};

use crate::error::{Result, RewardError};

/// One schedule stage: `daily_rate` applies to epochs before `period_end`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stage {
    pub period_end: Timestamp,
    pub daily_rate: Amount,
}

/// Ordered stage list, immutable after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSchedule {
    stages: Vec<Stage>,
}

impl RateSchedule {
    /// Validate and build a schedule from an ordered stage list.
    ///
    /// The list must be non-empty and strictly increasing in `period_end`.
    pub fn new(stages: Vec<Stage>) -> Result<Self> {
        if stages.is_empty() {
            return Err(RewardError::EmptySchedule);
        }
        if stages.windows(2).any(|w| w[1].period_end <= w[0].period_end) {
            return Err(RewardError::UnorderedSchedule);
        }
        Ok(Self { stages })
    }

    /// Daily rate in force at `timestamp`.
    ///
    /// The first stage whose `period_end` lies strictly beyond the timestamp
    /// wins, so an epoch landing exactly on a boundary already belongs to the
    /// next stage. Past the final boundary the last stage applies
    /// indefinitely.
    pub fn rate_at(&self, timestamp: Timestamp) -> Amount {
        for stage in &self.stages {
            if stage.period_end > timestamp {
                return stage.daily_rate;
            }
        }
        self.stages[self.stages.len() - 1].daily_rate
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> RateSchedule {
        RateSchedule::new(vec![
            Stage {
                period_end: 100,
                daily_rate: 5,
            },
            Stage {
                period_end: 200,
                daily_rate: 7,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            RateSchedule::new(Vec::new()).unwrap_err(),
            RewardError::EmptySchedule
        );
    }

    #[test]
    fn test_rejects_unordered() {
        let stages = vec![
            Stage {
                period_end: 200,
                daily_rate: 5,
            },
            Stage {
                period_end: 200,
                daily_rate: 7,
            },
        ];
        assert_eq!(
            RateSchedule::new(stages).unwrap_err(),
            RewardError::UnorderedSchedule
        );
    }

    #[test]
    fn test_rate_within_stage() {
        assert_eq!(schedule().rate_at(0), 5);
        assert_eq!(schedule().rate_at(99), 5);
        assert_eq!(schedule().rate_at(150), 7);
    }

    #[test]
    fn test_rate_on_boundary_uses_next_stage() {
        // boundary is exclusive on the lower stage
        assert_eq!(schedule().rate_at(100), 7);
    }

    #[test]
    fn test_last_stage_has_no_upper_bound() {
        assert_eq!(schedule().rate_at(200), 7);
        assert_eq!(schedule().rate_at(1_000_000), 7);
    }
}
