use super::tasks::quality_score::{self, QualityBreakdown};
use crate::core::models::partition::Partition;
use tracing::trace;

/// A completed attempt together with its quality score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPartition {
    /// Index of the attempt that produced the partition.
    pub attempt: usize,
    pub partition: Partition,
    pub quality: QualityBreakdown,
}

impl ScoredPartition {
    pub fn new(attempt: usize, partition: Partition) -> Self {
        let quality = quality_score::run(&partition);
        Self {
            attempt,
            partition,
            quality,
        }
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.quality.total()
    }
}

/// Picks the highest scoring non-empty partition.
///
/// Candidates are considered in the order given; a later candidate only replaces the current
/// best with a strictly greater score. Returns `None` when there is nothing to choose from.
pub fn select_best(candidates: impl IntoIterator<Item = ScoredPartition>) -> Option<ScoredPartition> {
    let mut best: Option<ScoredPartition> = None;
    for candidate in candidates {
        if candidate.partition.is_empty() {
            trace!(attempt = candidate.attempt, "Skipping empty partition.");
            continue;
        }
        let replaces = best
            .as_ref()
            .is_none_or(|current| candidate.score() > current.score());
        if replaces {
            best = Some(candidate);
        }
    }
    best
}
