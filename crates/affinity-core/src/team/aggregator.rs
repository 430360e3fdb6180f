//! Team Aggregator
//!
//! Reduces every unordered pair of a member list to a [`TeamAffinityResult`].

use std::borrow::Borrow;

use crate::affinity::AffinityMatrix;
use crate::config::EngineConfig;
use crate::error::{Result, TeamError};
use crate::members::Member;
use crate::team::{ElementHistogram, PairAffinity, TeamAffinityResult};
use crate::types::{hundredths_half_up, AffinityLevel};

/// Aggregates pairwise affinities over a group
#[derive(Debug, Clone, Copy)]
pub struct TeamAggregator<'a> {
    matrix: &'a AffinityMatrix,
    conflict_threshold: u8,
    best_pair_count: usize,
}

impl<'a> TeamAggregator<'a> {
    pub fn new(matrix: &'a AffinityMatrix, config: &EngineConfig) -> Self {
        Self {
            matrix,
            conflict_threshold: config.conflict_threshold,
            best_pair_count: config.best_pair_count,
        }
    }

    /// Aggregate a team. Members are paired in slice order (i < j).
    pub fn aggregate(&self, members: &[Member]) -> Result<TeamAffinityResult> {
        ensure_team_size(members.len())?;

        let pairs = self.pairs(members)?;
        let average_score = average_of(&pairs);
        let level = AffinityLevel::from_score(average_score);
        let element_histogram = ElementHistogram::from_members(members);

        let conflicts: Vec<PairAffinity> = pairs
            .iter()
            .filter(|p| p.overall_score < self.conflict_threshold)
            .cloned()
            .collect();

        let mut best_pairs = pairs.clone();
        // sort_by is stable: equal scores keep discovery order
        best_pairs.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
        best_pairs.truncate(self.best_pair_count);

        let insights = self.insights(average_score, &element_histogram, conflicts.len());

        tracing::debug!(
            team_size = members.len(),
            pairs = pairs.len(),
            average = average_score,
            conflicts = conflicts.len(),
            "team aggregated"
        );

        Ok(TeamAffinityResult {
            team_size: members.len(),
            member_ids: members.iter().map(|m| m.id).collect(),
            average_score,
            level,
            element_histogram,
            pairs,
            conflicts,
            best_pairs,
            insights,
        })
    }

    /// Team average in hundredths (half-up), without building a full result.
    /// Accepts owned members or references so candidate teams need no clones.
    pub fn average_hundredths<M: Borrow<Member>>(&self, members: &[M]) -> Result<u64> {
        ensure_team_size(members.len())?;

        let mut sum: u64 = 0;
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                let (a, b) = (a.borrow(), b.borrow());
                sum += u64::from(self.matrix.overall(a.category, b.category)?);
            }
        }
        Ok(hundredths_half_up(sum, pair_count(members.len())))
    }

    /// Every unordered pair in discovery order
    pub fn pairs(&self, members: &[Member]) -> Result<Vec<PairAffinity>> {
        let mut pairs = Vec::with_capacity(pair_count(members.len()) as usize);
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                let entry = self.matrix.lookup(a.category, b.category)?;
                pairs.push(PairAffinity::new(a, b, entry));
            }
        }
        Ok(pairs)
    }

    fn insights(
        &self,
        average: f64,
        histogram: &ElementHistogram,
        conflict_count: usize,
    ) -> Vec<String> {
        let mut insights = Vec::with_capacity(3);

        insights.push(match AffinityLevel::from_score(average) {
            AffinityLevel::Excellent => format!(
                "Excellent overall compatibility ({:.2}): this team is likely to collaborate smoothly.",
                average
            ),
            AffinityLevel::Good => format!(
                "Good overall compatibility ({:.2}): most members work well together.",
                average
            ),
            AffinityLevel::Moderate => format!(
                "Moderate overall compatibility ({:.2}): clear roles will help the team.",
                average
            ),
            AffinityLevel::Challenging | AffinityLevel::Difficult => format!(
                "Low overall compatibility ({:.2}): expect friction without active facilitation.",
                average
            ),
        });

        if histogram.is_balanced() {
            insights.push(
                "All four elements are represented, giving the team a balanced range of styles."
                    .to_string(),
            );
        } else {
            let missing: Vec<&str> = histogram.missing().iter().map(|e| e.name()).collect();
            insights.push(format!(
                "Element mix is incomplete (missing: {}); consider adding members to broaden perspectives.",
                missing.join(", ")
            ));
        }

        insights.push(if conflict_count == 0 {
            "No conflict-prone pairs detected.".to_string()
        } else {
            format!(
                "{} pair(s) score below {} and may need mediation.",
                conflict_count, self.conflict_threshold
            )
        });

        insights
    }
}

fn ensure_team_size(size: usize) -> Result<()> {
    if size < 2 {
        return Err(TeamError::TooFewMembers(size).into());
    }
    Ok(())
}

fn pair_count(n: usize) -> u64 {
    (n as u64) * (n as u64).saturating_sub(1) / 2
}

fn average_of(pairs: &[PairAffinity]) -> f64 {
    let sum: u64 = pairs.iter().map(|p| u64::from(p.overall_score)).sum();
    hundredths_half_up(sum, pairs.len() as u64) as f64 / 100.0
}
