use std::fmt;

use crate::scatter::commit::{CommitSummary, WriteFailure};
use crate::scatter::compute::ScheduledKey;
use crate::scatter::pairing::PairingPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// At least one pairing was committed (possibly with rejected writes).
    Completed,
    /// No targets remained after excluding the source. Nothing was written.
    NoTargets,
}

/// Everything a caller needs to report on a finished run.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub source_name: String,
    pub point_count: usize,
    pub target_count: usize,
    pub plan: PairingPlan,
    pub keys: Vec<ScheduledKey>,
    pub writes: usize,
    pub keyframes: usize,
    pub failures: Vec<WriteFailure>,
}

impl RunReport {
    pub(crate) fn new(
        source_name: String,
        point_count: usize,
        target_count: usize,
        plan: PairingPlan,
        keys: Vec<ScheduledKey>,
        summary: CommitSummary,
    ) -> Self {
        let outcome = if target_count == 0 {
            RunOutcome::NoTargets
        } else {
            RunOutcome::Completed
        };
        Self {
            outcome,
            source_name,
            point_count,
            target_count,
            plan,
            keys,
            writes: summary.writes,
            keyframes: summary.keyframes,
            failures: summary.failures,
        }
    }

    /// Number of pairings, `min(points, targets)`.
    #[inline]
    #[must_use]
    pub fn pairing_len(&self) -> usize {
        self.plan.len()
    }

    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            RunOutcome::NoTargets => write!(
                f,
                "No targets selected besides source '{}'; nothing to do",
                self.source_name
            ),
            RunOutcome::Completed => {
                write!(
                    f,
                    "Scattered {} of {} vertices from '{}' onto {} targets: {} writes, {} keyframes",
                    self.pairing_len(),
                    self.point_count,
                    self.source_name,
                    self.target_count,
                    self.writes,
                    self.keyframes,
                )?;
                if !self.failures.is_empty() {
                    write!(f, ", {} rejected", self.failures.len())?;
                }
                Ok(())
            }
        }
    }
}
