//! Affinity Matrix
//!
//! Stores one [`AffinityEntry`] per unordered category pair (78 for the
//! 12-category catalog, self-pairs included). Built once, read-only after.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

use crate::affinity::scorer::{ElementScorer, PairScorer};
use crate::affinity::AffinityEntry;
use crate::catalog::Category;
use crate::error::{LookupError, Result};

/// Number of unordered pairs (self-pairs included) over the catalog
pub const CANONICAL_PAIRS: usize = Category::ALL.len() * (Category::ALL.len() + 1) / 2;

lazy_static! {
    static ref SHARED: Arc<AffinityMatrix> = Arc::new(AffinityMatrix::build());
}

/// Symmetric lookup table over all category pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinityMatrix {
    entries: HashMap<(Category, Category), AffinityEntry>,
}

impl AffinityMatrix {
    /// Build the matrix with the element heuristic
    pub fn build() -> Self {
        Self::build_with(&ElementScorer::new())
    }

    /// Build the matrix with any scorer, invoking it once per canonical pair
    pub fn build_with<S: PairScorer + ?Sized>(scorer: &S) -> Self {
        let mut entries = HashMap::with_capacity(CANONICAL_PAIRS);

        for (i, &c1) in Category::ALL.iter().enumerate() {
            for &c2 in &Category::ALL[i..] {
                entries.insert((c1, c2), scorer.score(c1, c2));
            }
        }

        tracing::debug!(entries = entries.len(), "affinity matrix built");
        Self { entries }
    }

    /// Process-wide matrix, built on first use behind a single-flight guard
    pub fn shared() -> Arc<AffinityMatrix> {
        Arc::clone(&SHARED)
    }

    /// Assemble a matrix from pre-scored entries (e.g. an imported table).
    ///
    /// Entries are re-keyed under their canonical pair; a later entry for the
    /// same pair replaces an earlier one. Pairs left out fail lookup.
    pub fn from_entries(entries: impl IntoIterator<Item = AffinityEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.key(), entry))
            .collect();
        Self { entries }
    }

    /// Look up the entry for a pair in either order
    pub fn lookup(&self, c1: Category, c2: Category) -> Result<&AffinityEntry> {
        self.entries
            .get(&AffinityEntry::pair_key(c1, c2))
            .ok_or_else(|| LookupError::PairNotFound(c1, c2).into())
    }

    /// Shorthand for `lookup(..)?.overall_score`
    pub fn overall(&self, c1: Category, c2: Category) -> Result<u8> {
        self.lookup(c1, c2).map(|entry| entry.overall_score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every canonical pair has an entry
    pub fn is_complete(&self) -> bool {
        self.len() == CANONICAL_PAIRS
    }

    /// Entries in canonical order (row-major over the upper triangle)
    pub fn entries(&self) -> impl Iterator<Item = &AffinityEntry> + '_ {
        Category::ALL.iter().enumerate().flat_map(move |(i, &c1)| {
            Category::ALL[i..]
                .iter()
                .filter_map(move |&c2| self.entries.get(&(c1, c2)))
        })
    }

    /// Full 12x12 grid of overall scores, `None` where a pair is missing
    pub fn grid(&self) -> [[Option<u8>; 12]; 12] {
        let mut grid = [[None; 12]; 12];
        for (i, &c1) in Category::ALL.iter().enumerate() {
            for (j, &c2) in Category::ALL.iter().enumerate() {
                grid[i][j] = self.overall(c1, c2).ok();
            }
        }
        grid
    }
}

impl Default for AffinityMatrix {
    fn default() -> Self {
        Self::build()
    }
}
