//! Greedy Team Optimizer
//!
//! Builds a high-affinity subset of a candidate pool:
//!
//! 1. Seed with the single best-scoring pair.
//! 2. Repeatedly append the candidate that maximizes the resulting team
//!    average, without backtracking.
//!
//! Seeding costs O(p²) lookups; growth costs O((k-2)·p) team averages, each
//! O(k²). Meant for rosters of tens of members, not thousands.
//!
//! Ties go to the earliest candidate in pool order. The engine hands the
//! optimizer a pool sorted by member id, so ties resolve to the lowest id.

use crate::affinity::AffinityMatrix;
use crate::config::EngineConfig;
use crate::error::{Result, TeamError};
use crate::members::Member;
use crate::team::{TeamAffinityResult, TeamAggregator};

#[derive(Debug, Clone, Copy)]
pub struct GreedyOptimizer<'a> {
    matrix: &'a AffinityMatrix,
    aggregator: TeamAggregator<'a>,
}

impl<'a> GreedyOptimizer<'a> {
    pub fn new(matrix: &'a AffinityMatrix, config: &EngineConfig) -> Self {
        Self {
            matrix,
            aggregator: TeamAggregator::new(matrix, config),
        }
    }

    /// Select exactly `target_size` members from `pool`.
    ///
    /// Candidate teams are scored through references into `pool`; members are
    /// cloned once, for the final result.
    pub fn find_optimal_team(
        &self,
        target_size: usize,
        pool: &[Member],
    ) -> Result<TeamAffinityResult> {
        if target_size < 2 {
            return Err(TeamError::TargetTooSmall(target_size).into());
        }
        if pool.len() < target_size {
            return Err(TeamError::PoolTooSmall {
                pool: pool.len(),
                target: target_size,
            }
            .into());
        }

        let mut taken = vec![false; pool.len()];
        let (first, second) = self.best_pair(pool)?;
        taken[first] = true;
        taken[second] = true;
        let mut selection: Vec<&Member> = vec![&pool[first], &pool[second]];

        while selection.len() < target_size {
            let mut best: Option<(usize, u64)> = None;

            for (idx, candidate) in pool.iter().enumerate() {
                if taken[idx] {
                    continue;
                }
                selection.push(candidate);
                let average = self.aggregator.average_hundredths(&selection);
                selection.pop();
                let average = average?;

                if best.map_or(true, |(_, top)| average > top) {
                    best = Some((idx, average));
                }
            }

            // The pool holds at least `target_size` members, so a candidate always remains
            let Some((idx, _)) = best else { break };
            taken[idx] = true;
            selection.push(&pool[idx]);
        }

        tracing::debug!(
            pool = pool.len(),
            target = target_size,
            selected = selection.len(),
            "greedy team selection finished"
        );
        let team: Vec<Member> = selection.into_iter().cloned().collect();
        self.aggregator.aggregate(&team)
    }

    /// Indices of the strictly highest-scoring pair; first found wins ties
    fn best_pair(&self, pool: &[Member]) -> Result<(usize, usize)> {
        let mut best: Option<(usize, usize, u8)> = None;

        for (i, a) in pool.iter().enumerate() {
            for (j, b) in pool.iter().enumerate().skip(i + 1) {
                let score = self.matrix.overall(a.category, b.category)?;
                if best.map_or(true, |(_, _, top)| score > top) {
                    best = Some((i, j, score));
                }
            }
        }

        // pool.len() >= 2 is checked by the caller
        Ok(best.map(|(i, j, _)| (i, j)).unwrap_or((0, 1)))
    }
}
