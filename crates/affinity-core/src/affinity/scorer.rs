//! Pairwise Scorer
//!
//! Derives the five affinity scores of a category pair purely from the
//! relationship between the two categories' elements.

use crate::affinity::AffinityEntry;
use crate::catalog::{Category, Element};
use crate::types::{AffinityLevel, ElementHarmony};

/// Anything that can score a pair of categories
///
/// The matrix is generic over this so alternative heuristics (or fixtures
/// in tests) can be plugged in without touching lookup or aggregation.
pub trait PairScorer {
    /// Score an ordered pair. Must be deterministic and total.
    fn score(&self, c1: Category, c2: Category) -> AffinityEntry;
}

/// The element-relationship heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementScorer;

impl ElementScorer {
    pub fn new() -> Self {
        Self
    }

    /// Overall score for a pair of categories
    pub fn overall(c1: Category, c2: Category) -> u8 {
        if c1 == c2 {
            return 85;
        }

        use Element::*;
        match (c1.element(), c2.element()) {
            (Fire, Air) | (Air, Fire) => 92,
            (Earth, Water) | (Water, Earth) => 90,
            (e1, e2) if e1 == e2 => 78,
            (Fire, Water) | (Water, Fire) => 45,
            (Earth, Air) | (Air, Earth) => 55,
            // Fire-Earth and Air-Water
            _ => 60,
        }
    }

    pub fn harmony(e1: Element, e2: Element) -> ElementHarmony {
        use Element::*;
        match (e1, e2) {
            (a, b) if a == b => ElementHarmony::Harmonious,
            (Fire, Air) | (Air, Fire) | (Earth, Water) | (Water, Earth) => {
                ElementHarmony::Harmonious
            }
            (Fire, Water) | (Water, Fire) | (Earth, Air) | (Air, Earth) => {
                ElementHarmony::Challenging
            }
            _ => ElementHarmony::Neutral,
        }
    }
}

impl PairScorer for ElementScorer {
    fn score(&self, c1: Category, c2: Category) -> AffinityEntry {
        let (e1, e2) = (c1.element(), c2.element());
        let overall = Self::overall(c1, c2);

        let communication = if e1 == Element::Air || e2 == Element::Air {
            85
        } else {
            overall
        };
        let level = AffinityLevel::from_score(f64::from(overall));

        AffinityEntry {
            category1: c1,
            category2: c2,
            overall_score: overall,
            work_score: overall.saturating_add(5).min(100),
            communication_score: communication,
            conflict_potential: 100 - overall,
            synergy_score: overall.saturating_sub(5),
            level,
            element_harmony: Self::harmony(e1, e2),
            strengths: strengths_text(c1, c2, level),
            challenges: challenges_text(c1, c2, level),
            tips: tips_text(c1, c2, level),
            best_collaboration: collaboration_text(c1, c2, level),
        }
    }
}

fn strengths_text(c1: Category, c2: Category, level: AffinityLevel) -> String {
    format!(
        "{} and {} share a {} rapport and complement each other's working styles.",
        c1,
        c2,
        level.label()
    )
}

fn challenges_text(c1: Category, c2: Category, level: AffinityLevel) -> String {
    match level {
        AffinityLevel::Excellent | AffinityLevel::Good => format!(
            "{} and {} may become too comfortable and overlook blind spots.",
            c1, c2
        ),
        _ => format!(
            "{} and {} approach problems differently and may need to align on priorities.",
            c1, c2
        ),
    }
}

fn tips_text(c1: Category, c2: Category, level: AffinityLevel) -> String {
    match level {
        AffinityLevel::Excellent | AffinityLevel::Good => format!(
            "Give {} and {} shared ownership of high-impact work.",
            c1, c2
        ),
        AffinityLevel::Moderate => format!(
            "Set clear roles so {} and {} play to their strengths.",
            c1, c2
        ),
        _ => format!(
            "Schedule regular check-ins between {} and {} and agree on how decisions are made.",
            c1, c2
        ),
    }
}

fn collaboration_text(c1: Category, c2: Category, level: AffinityLevel) -> String {
    match level {
        AffinityLevel::Excellent => format!("{} and {} excel at joint leadership and planning.", c1, c2),
        AffinityLevel::Good => format!("{} and {} work well on shared projects.", c1, c2),
        AffinityLevel::Moderate => format!("{} and {} suit clearly divided tasks.", c1, c2),
        AffinityLevel::Challenging | AffinityLevel::Difficult => {
            format!("{} and {} are best paired with a mediating third member.", c1, c2)
        }
    }
}
