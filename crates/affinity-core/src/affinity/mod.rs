//! Affinity - pairwise scoring and the affinity matrix
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   score(c1, c2)   ┌──────────────────┐
//! │ PairScorer   │ ────────────────► │  AffinityMatrix  │
//! │ (ElementScorer)                  │  78 canonical    │
//! └──────────────┘                   │  pairs, O(1)     │
//!                                    └────────┬─────────┘
//!                                             │ lookup(c1, c2)
//!                                             ▼
//!                                      &AffinityEntry
//! ```
//!
//! The scorer is a pure function. The matrix invokes it once per unordered
//! pair (`index(c1) <= index(c2)`) and normalizes every lookup to that order,
//! so symmetry holds by construction.

pub mod matrix;
pub mod scorer;

pub use matrix::AffinityMatrix;
pub use scorer::{ElementScorer, PairScorer};

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::types::{AffinityLevel, ElementHarmony};

/// Scores for one unordered category pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinityEntry {
    /// First category of the scored pair (canonical order once in a matrix)
    pub category1: Category,
    pub category2: Category,

    /// Overall compatibility (0-100)
    pub overall_score: u8,
    pub work_score: u8,
    pub communication_score: u8,

    /// Stored explicitly as `100 - overall` at generation time; never re-derived
    pub conflict_potential: u8,
    pub synergy_score: u8,

    pub level: AffinityLevel,
    pub element_harmony: ElementHarmony,

    pub strengths: String,
    pub challenges: String,
    pub tips: String,
    pub best_collaboration: String,
}

impl AffinityEntry {
    /// Canonical key for an unordered pair
    pub fn pair_key(c1: Category, c2: Category) -> (Category, Category) {
        if c1.index() <= c2.index() {
            (c1, c2)
        } else {
            (c2, c1)
        }
    }

    /// The pair this entry is stored under
    pub fn key(&self) -> (Category, Category) {
        Self::pair_key(self.category1, self.category2)
    }

    pub fn involves(&self, category: Category) -> bool {
        self.category1 == category || self.category2 == category
    }
}
