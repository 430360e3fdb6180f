//! Team - group-level affinity aggregation
//!
//! A [`TeamAffinityResult`] is computed on demand from a member list and never
//! persisted by the engine. It reduces every pairwise affinity of the group to
//! an average score, an element histogram, the conflicting pairs and the best
//! pairs.

pub mod aggregator;
pub mod histogram;

pub use aggregator::TeamAggregator;
pub use histogram::ElementHistogram;

use serde::{Deserialize, Serialize};

use crate::affinity::AffinityEntry;
use crate::catalog::Category;
use crate::members::Member;
use crate::types::{AffinityLevel, ElementHarmony, MemberId};

/// Affinity of one member pair inside a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairAffinity {
    pub member_a: MemberId,
    pub member_b: MemberId,
    pub category_a: Category,
    pub category_b: Category,
    pub overall_score: u8,
    pub level: AffinityLevel,
    pub element_harmony: ElementHarmony,
}

impl PairAffinity {
    pub fn new(a: &Member, b: &Member, entry: &AffinityEntry) -> Self {
        Self {
            member_a: a.id,
            member_b: b.id,
            category_a: a.category,
            category_b: b.category,
            overall_score: entry.overall_score,
            level: entry.level,
            element_harmony: entry.element_harmony,
        }
    }

    pub fn involves(&self, id: MemberId) -> bool {
        self.member_a == id || self.member_b == id
    }
}

/// Aggregated compatibility of a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAffinityResult {
    pub team_size: usize,

    /// Members in the order they were aggregated
    pub member_ids: Vec<MemberId>,

    /// Mean pair score, rounded half-up to 2 decimals
    pub average_score: f64,
    pub level: AffinityLevel,
    pub element_histogram: ElementHistogram,

    /// Every pair, in discovery order (i < j)
    pub pairs: Vec<PairAffinity>,

    /// Pairs below the conflict threshold, in discovery order
    pub conflicts: Vec<PairAffinity>,

    /// Highest-scoring pairs, descending, ties in discovery order
    pub best_pairs: Vec<PairAffinity>,

    pub insights: Vec<String>,
}

impl TeamAffinityResult {
    /// All four elements are represented
    pub fn is_balanced(&self) -> bool {
        self.element_histogram.is_balanced()
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.member_ids.contains(&id)
    }
}
