//! Affinity Core - profile affinity scoring and team optimization
//!
//! Affinity Core assigns each organization member one of twelve profile
//! categories (grouped into four elements) and uses a precomputed pairwise
//! affinity matrix to score members, teams and whole organizations.
//!
//! # Architecture
//!
//! The engine is built from small layers, leaves first:
//!
//! 1. **Category Catalog** (`catalog`): the 12 categories and their 4 elements
//! 2. **Pairwise Scorer** (`affinity::scorer`): element-based scores for a category pair
//! 3. **Affinity Matrix** (`affinity::matrix`): 78 canonical entries, symmetric O(1) lookup
//! 4. **Member Resolver** (`members`): member ids to categories to matrix entries
//! 5. **Team Aggregator** (`team`): averages, element histogram, conflicts, best pairs
//! 6. **Conflict Scanner** (`conflict`): organization-wide low-affinity pairs by severity
//! 7. **Greedy Optimizer** (`optimizer`): best-pair seeding plus greedy growth
//!
//! [`AffinityEngine`] ties them together behind the five public operations.
//!
//! # Quick Start
//!
//! ```
//! use affinity_core::{AffinityEngine, Category, InMemoryDirectory, Member, MemberId};
//!
//! let directory = InMemoryDirectory::from_members(vec![
//!     Member::new(MemberId::from_u128(1), "Ada", Category::Aries),
//!     Member::new(MemberId::from_u128(2), "Grace", Category::Gemini),
//!     Member::new(MemberId::from_u128(3), "Alan", Category::Cancer),
//! ])
//! .unwrap();
//!
//! let engine = AffinityEngine::new(directory);
//!
//! // Category-level lookup
//! let entry = engine.lookup_affinity(Category::Aries, Category::Gemini).unwrap();
//! assert_eq!(entry.overall_score, 92);
//!
//! // Team-level aggregation
//! let ids = [MemberId::from_u128(1), MemberId::from_u128(2), MemberId::from_u128(3)];
//! let team = engine.aggregate_team(&ids).unwrap();
//! assert_eq!(team.element_histogram.len(), 4);
//!
//! // Pick the best pair out of the three
//! let best = engine.optimize_team(2, &ids).unwrap();
//! assert_eq!(best.average_score, 92.0);
//! ```
//!
//! # Design Principles
//!
//! 1. **Closed enums over lookup tables**: every category/element/band mapping is an exhaustive `match`
//! 2. **Explicit initialization**: the matrix is built by a constructor and shared by `Arc`
//! 3. **Exact arithmetic**: averages are rounded half-up to 2 decimals in integer hundredths
//! 4. **Determinism**: identical inputs (in any order) give identical results

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations, clippy::all)]

pub mod affinity;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod members;
pub mod optimizer;
pub mod team;
pub mod types;

// Re-export commonly used types for convenience
pub use affinity::{AffinityEntry, AffinityMatrix, ElementScorer, PairScorer};
pub use cache::TeamCache;
pub use catalog::{Category, Element};
pub use config::EngineConfig;
pub use conflict::{ConflictAlert, ConflictScanner};
pub use engine::AffinityEngine;
pub use error::{AffinityError, LookupError, Result, ResultExt, TeamError};
pub use members::{InMemoryDirectory, Member, MemberDirectory, MemberResolver};
pub use optimizer::GreedyOptimizer;
pub use team::{ElementHistogram, PairAffinity, TeamAffinityResult, TeamAggregator};
pub use types::{AffinityLevel, ElementHarmony, MemberId, Severity};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
